use tracing::{debug, info};

use crate::{
    cnf::Cnf,
    config::Config,
    encode::encode,
    engine::{Engine, Status},
    error::Result,
    io,
    solver::Cdcl,
    types::Solution,
    validate::{self, Literal},
};

/// Decides `clauses` with the bundled engine.
///
/// ```
/// use vw_allsat::{solve, Config, Solution};
///
/// let clauses = vec![vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]];
/// let solution = solve(&clauses, &Config::default().vars(5)).unwrap();
/// assert_eq!(solution.model().unwrap().lits(), &[1, -2, -3, -4, 5]);
///
/// let solution = solve(vec![vec![-1], vec![1]], &Config::default()).unwrap();
/// assert_eq!(solution, Solution::Unsat);
/// ```
pub fn solve<I, C>(clauses: I, config: &Config) -> Result<Solution>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Literal,
{
    solve_with(&mut Cdcl, clauses, config)
}

/// Like [`solve`], with a caller-supplied engine.
///
/// Input is validated completely before the engine is called.
pub fn solve_with<E, I, C>(engine: &mut E, clauses: I, config: &Config) -> Result<Solution>
where
    E: Engine + ?Sized,
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Literal,
{
    let cnf = validate::clauses(clauses, config.vars)?;
    Ok(solve_cnf(engine, &cnf, config))
}

/// Decides an already validated instance. `config.vars` is ignored, the
/// instance carries its own variable count.
pub fn solve_cnf<E: Engine + ?Sized>(engine: &mut E, cnf: &Cnf, config: &Config) -> Solution {
    log_instance(cnf, config.verbose);
    let (solution, _) = run(engine, cnf, config.budget(), config.verbose);
    solution
}

pub(crate) fn run<E: Engine + ?Sized>(
    engine: &mut E,
    cnf: &Cnf,
    budget: Option<u64>,
    verbose: u8,
) -> (Solution, u64) {
    let problem = cnf.to_problem();
    let run = engine.run(&problem, budget);

    let solution = match run.status {
        Status::Sat(values) => Solution::Sat {
            model: encode(&values, problem.var_count),
        },
        Status::Unsat => Solution::Unsat,
        Status::Unknown => Solution::Unknown,
    };

    if verbose >= 1 {
        info!(
            vars = problem.var_count,
            clauses = problem.clauses.len(),
            propagations = run.propagations,
            verdict = solution.verdict(),
            "solve finished"
        );
    } else {
        debug!(
            propagations = run.propagations,
            verdict = solution.verdict(),
            "solve finished"
        );
    }

    (solution, run.propagations)
}

/// Dumps the instance in DIMACS form at verbosity 2 and above.
pub(crate) fn log_instance(cnf: &Cnf, verbose: u8) {
    if verbose < 2 {
        return;
    }
    let mut buf = vec![];
    match io::write_problem(&mut buf, cnf) {
        Ok(()) => info!("instance:\n{}", String::from_utf8_lossy(&buf)),
        Err(err) => debug!(%err, "could not render instance"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        engine::{Engine, Run, Status},
        error::Error,
        types::{Problem, Solution},
    };

    use super::{solve, solve_with};

    struct Scripted {
        status: Status,
        calls: usize,
        var_counts: Vec<usize>,
    }

    impl Scripted {
        fn new(status: Status) -> Self {
            Self {
                status,
                calls: 0,
                var_counts: vec![],
            }
        }
    }

    impl Engine for Scripted {
        fn run(&mut self, problem: &Problem, _budget: Option<u64>) -> Run {
            self.calls += 1;
            self.var_counts.push(problem.var_count);
            Run {
                status: self.status.clone(),
                propagations: 0,
            }
        }
    }

    #[test]
    fn unique_first_model() {
        let clauses = vec![vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]];
        let solution = solve(&clauses, &Config::default().vars(5)).unwrap();
        assert_eq!(solution.model().unwrap().lits(), &[1, -2, -3, -4, 5]);
    }

    #[test]
    fn unsat() {
        let solution = solve(vec![vec![-1], vec![1]], &Config::default()).unwrap();
        assert_eq!(solution, Solution::Unsat);
    }

    #[test]
    fn prop_limit_gives_unknown() {
        let clauses = vec![vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]];
        let solution = solve(&clauses, &Config::default().prop_limit(1)).unwrap();
        assert_eq!(solution, Solution::Unknown);
    }

    #[test]
    fn declared_vars_widen_model() {
        let solution = solve(vec![vec![1], vec![-2]], &Config::default().vars(4)).unwrap();
        assert_eq!(solution.model().unwrap().lits(), &[1, -2, -3, -4]);
    }

    #[test]
    fn verbosity_does_not_change_outcome() {
        let clauses = vec![vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]];
        let quiet = solve(&clauses, &Config::default()).unwrap();
        let loud = solve(&clauses, &Config::default().verbose(2)).unwrap();
        assert_eq!(quiet, loud);
    }

    #[test]
    fn invalid_input_never_reaches_engine() {
        let mut engine = Scripted::new(Status::Unsat);

        let err = solve_with(&mut engine, vec![vec![1, 2], vec![0]], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::ZeroLiteral { clause: 1, .. }));

        let err = solve_with(&mut engine, vec![vec![7i64]], &Config::default().vars(3)).unwrap_err();
        assert!(err.is_value_error());

        let err = solve_with(&mut engine, vec![vec![u64::MAX]], &Config::default()).unwrap_err();
        assert!(err.is_shape_error());

        let err = solve_with(&mut engine, vec![vec![i32::MAX]], &Config::default()).unwrap_err();
        assert!(err.is_value_error());

        assert_eq!(engine.calls, 0);
    }

    #[test]
    fn exactly_one_engine_call() {
        let mut engine = Scripted::new(Status::Sat(vec![true]));
        let solution = solve_with(&mut engine, vec![vec![1], vec![-3]], &Config::default()).unwrap();
        assert_eq!(engine.calls, 1);
        assert_eq!(engine.var_counts, vec![3]);
        // variables missing from the engine buffer read as false
        assert_eq!(solution.model().unwrap().lits(), &[1, -2, -3]);
    }

    #[test]
    fn verdicts_are_not_errors() {
        let mut engine = Scripted::new(Status::Unknown);
        let solution = solve_with(&mut engine, vec![vec![1]], &Config::default()).unwrap();
        assert!(solution.is_unknown());
    }
}
