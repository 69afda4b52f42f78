use std::{fs, io::Write, path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing::{error, Level};
use vw_allsat::{io, solve_cnf, validate, Cdcl, Cnf, Config, Error, Model, Solutions, VERSION};

/// Decides a CNF instance or enumerates all of its models.
#[derive(Parser, Debug)]
#[command(name = "vw-allsat", version = VERSION)]
struct Args {
    /// DIMACS CNF file (or JSON with --json)
    input: PathBuf,

    /// Enumerate all models instead of stopping at the first
    #[arg(short, long)]
    all: bool,

    /// Stop after this many models (with --all)
    #[arg(short = 'n', long, requires = "all")]
    limit: Option<usize>,

    /// Read the input as a JSON array of clauses
    #[arg(long)]
    json: bool,

    /// Declared variable count (overrides the DIMACS header)
    #[arg(long)]
    vars: Option<usize>,

    /// Propagation budget, 0 for unbounded
    #[arg(long, default_value_t = 0)]
    prop_limit: u64,

    /// Verbosity, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load(args: &Args) -> Result<Cnf, Error> {
    if args.json {
        let text = fs::read_to_string(&args.input)?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|err| Error::Malformed(format!("invalid JSON: {err}")))?;
        return validate::from_json(&value, args.vars);
    }

    let mut file = fs::File::open(&args.input)?;
    let cnf = io::read_problem(&mut file)?;
    match args.vars {
        Some(vars) => Cnf::new(cnf.clauses().to_vec(), Some(vars)),
        None => Ok(cnf),
    }
}

fn check(cnf: &Cnf, model: &Model) {
    if !cnf.is_satisfied_by(model) {
        error!(model = ?model.lits(), "model does not satisfy the instance");
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let cnf = load(args)?;
    let config = Config {
        vars: args.vars,
        prop_limit: args.prop_limit,
        verbose: args.verbose,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !args.all {
        let solution = solve_cnf(&mut Cdcl, &cnf, &config);
        if let Some(model) = solution.model() {
            check(&cnf, model);
        }
        io::write_solution(&mut out, &solution)?;
        return Ok(());
    }

    let mut solutions = Solutions::from_cnf(Cdcl, cnf.clone(), &config);
    for model in solutions.by_ref().take(args.limit.unwrap_or(usize::MAX)) {
        check(&cnf, &model);
        io::write_model(&mut out, model.lits())?;
    }
    let status = match solutions.termination() {
        Some(vw_allsat::Termination::Exhausted) => "ALL",
        Some(vw_allsat::Termination::Interrupted) => "UNKNOWN",
        None => "PARTIAL",
    };
    writeln!(out, "c {} models", solutions.found())?;
    writeln!(out, "s {status}")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vw-allsat: {err}");
            ExitCode::FAILURE
        }
    }
}
