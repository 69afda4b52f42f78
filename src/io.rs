use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use crate::{
    cnf::Cnf,
    error::{Error, Result},
    types::{Clause, Lit, Solution},
    validate, VERSION,
};

fn dimacs_error(line: usize, message: impl Into<String>) -> Error {
    Error::Dimacs {
        line,
        message: message.into(),
    }
}

fn parse_count(line: usize, word: Option<&str>, what: &str) -> Result<usize> {
    let word = word.ok_or_else(|| dimacs_error(line, format!("missing {what} count")))?;
    word.parse::<usize>()
        .map_err(|_| dimacs_error(line, format!("invalid {what} count '{word}'")))
}

/// Reads a DIMACS CNF instance. The header's variable count is declared,
/// so literals beyond it are rejected.
pub fn read_problem(reader: &mut impl Read) -> Result<Cnf> {
    let mut lines = BufReader::new(reader).lines().enumerate();

    let (var_count, clause_count) = loop {
        let Some((i, line)) = lines.next() else {
            return Err(dimacs_error(0, "missing problem line"));
        };
        let line = line?;

        if line.starts_with('c') || line.trim().is_empty() {
            // comment line
            continue;
        }

        // problem line
        let mut parts = line.split_whitespace();
        if parts.next() != Some("p") || parts.next() != Some("cnf") {
            return Err(dimacs_error(i + 1, "expected 'p cnf <vars> <clauses>'"));
        }
        let var_count = parse_count(i + 1, parts.next(), "variable")?;
        let clause_count = parse_count(i + 1, parts.next(), "clause")?;
        break (var_count, clause_count);
    };

    let mut clauses: Vec<Clause> = vec![];
    let mut clause = vec![];

    for (i, line) in lines {
        let line = line?;

        if line.starts_with('%') {
            // end marker of the SATLIB benchmark files
            break;
        }
        if line.starts_with('c') {
            continue;
        }

        for word in line.split_whitespace() {
            let lit = word
                .parse::<Lit>()
                .map_err(|_| dimacs_error(i + 1, format!("invalid literal '{word}'")))?;
            match lit {
                0 => {
                    clauses.push(std::mem::take(&mut clause));
                }
                _ => {
                    clause.push(lit);
                }
            }
        }
    }

    if !clause.is_empty() {
        // last clause without its terminating 0
        clauses.push(clause);
    }

    if clauses.len() != clause_count {
        return Err(dimacs_error(
            0,
            format!("header announces {clause_count} clauses, found {}", clauses.len()),
        ));
    }

    validate::clauses(clauses, Some(var_count))
}

fn clause_line(clause: &[Lit]) -> String {
    clause
        .iter()
        .fold(String::new(), |str, lit| str + &lit.to_string() + " ")
}

pub fn write_problem(writer: &mut impl Write, cnf: &Cnf) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "p cnf {} {}", cnf.var_count(), cnf.clauses().len())?;
    for clause in cnf.clauses() {
        writeln!(writer, "{}0", clause_line(clause))?;
    }
    writer.flush()
}

pub fn write_model(writer: &mut impl Write, model: &[Lit]) -> std::io::Result<()> {
    const PER_LINE: usize = 10;
    for chunk in model.chunks(PER_LINE) {
        writeln!(writer, "v {}", clause_line(chunk))?;
    }
    writeln!(writer, "v 0")
}

pub fn write_solution(writer: &mut impl Write, solution: &Solution) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "c vw-allsat {VERSION}")?;
    writeln!(writer, "s {}", solution.verdict())?;

    if let Solution::Sat { model } = solution {
        write_model(&mut writer, model.lits())?;
    }
    writer.flush()
}
