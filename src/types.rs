use crate::encode::Model;

pub type Lit = i32;

pub type Var = usize;

pub type Clause = Vec<Lit>;

pub fn to_var(lit: Lit) -> Var {
    debug_assert_ne!(lit, 0);
    lit.unsigned_abs() as Var
}

/// Engine-facing instance: every literal is nonzero and within `1..=var_count`.
#[derive(Clone, Debug)]
pub struct Problem {
    pub var_count: usize,
    pub clauses: Vec<Clause>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    Sat { model: Model },
    Unsat,
    Unknown,
}

impl Solution {
    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat { .. })
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Solution::Unsat)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Solution::Unknown)
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Solution::Sat { .. } => "SATISFIABLE",
            Solution::Unsat => "UNSATISFIABLE",
            Solution::Unknown => "UNKNOWN",
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Solution::Sat { model } => Some(model),
            _ => None,
        }
    }
}
