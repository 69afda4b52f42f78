use serde_json::Value;

use crate::{
    cnf::Cnf,
    error::{Error, Result},
    types::{Clause, Lit},
};

pub trait Literal: Copy {
    fn try_lit(self) -> std::result::Result<Lit, String>;
}

macro_rules! impl_literal {
    ($($t:ty),*) => {
        $(
            impl Literal for $t {
                fn try_lit(self) -> std::result::Result<Lit, String> {
                    Lit::try_from(self).map_err(|_| format!("{} is not representable as a literal", self))
                }
            }
        )*
    };
}

impl_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Literal> Literal for &T {
    fn try_lit(self) -> std::result::Result<Lit, String> {
        (*self).try_lit()
    }
}

/// Largest variable count an instance may declare or imply. The engine
/// allocates per-literal state up front, so counts are capped well below
/// `i32::MAX`.
pub const MAX_VARS: usize = 1 << 24;

fn var_count(vars: usize) -> Result<usize> {
    if vars > MAX_VARS {
        return Err(Error::TooManyVars(vars));
    }
    Ok(vars)
}

pub(crate) fn clause(index: usize, clause: &[Lit], declared: Option<usize>) -> Result<()> {
    for (position, &lit) in clause.iter().enumerate() {
        if lit == 0 {
            return Err(Error::ZeroLiteral {
                clause: index,
                position,
            });
        }
        let limit = declared.unwrap_or(MAX_VARS);
        if lit == Lit::MIN || lit.unsigned_abs() as usize > limit {
            return Err(Error::LiteralOutOfRange {
                clause: index,
                lit,
                vars: limit,
            });
        }
    }
    Ok(())
}

/// Validates a sequence of clauses and builds an instance from it.
pub fn clauses<I, C>(input: I, vars: Option<usize>) -> Result<Cnf>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Literal,
{
    let declared = vars.map(var_count).transpose()?;

    let mut clauses = vec![];
    for (i, item) in input.into_iter().enumerate() {
        let lits = item
            .into_iter()
            .enumerate()
            .map(|(position, lit)| {
                lit.try_lit()
                    .map_err(|reason| Error::Malformed(format!("clause {i}, position {position}: {reason}")))
            })
            .collect::<Result<Clause>>()?;
        clause(i, &lits, declared)?;
        clauses.push(lits);
    }

    Ok(Cnf::from_validated(clauses, declared))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn json_lit(value: &Value) -> std::result::Result<Lit, String> {
    if let Some(n) = value.as_i64() {
        n.try_lit()
    } else if let Some(n) = value.as_u64() {
        n.try_lit()
    } else {
        Err(format!("expected an integer, found {}", describe(value)))
    }
}

/// Validates clauses given as a JSON array of arrays of integers.
pub fn from_json(value: &Value, vars: Option<usize>) -> Result<Cnf> {
    let outer = value.as_array().ok_or_else(|| {
        Error::Malformed(format!("expected an array of clauses, found {}", describe(value)))
    })?;

    let mut parsed: Vec<Clause> = Vec::with_capacity(outer.len());
    for (i, item) in outer.iter().enumerate() {
        let items = item.as_array().ok_or_else(|| {
            Error::Malformed(format!("clause {i}: expected an array, found {}", describe(item)))
        })?;
        let lits = items
            .iter()
            .enumerate()
            .map(|(position, lit)| {
                json_lit(lit)
                    .map_err(|reason| Error::Malformed(format!("clause {i}, position {position}: {reason}")))
            })
            .collect::<Result<Clause>>()?;
        parsed.push(lits);
    }

    clauses(parsed, vars)
}
