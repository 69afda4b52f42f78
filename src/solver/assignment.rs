use crate::types::{to_var, Lit, Var};

use super::map::{var_map, VarMap};

#[derive(Clone, Copy, Debug)]
pub enum Reason {
    Decision,
    Propagation { i_clause: usize },
}

#[derive(Clone)]
struct VarData {
    value: bool,
    level: usize,
    reason: Reason,
}

pub struct Assignment {
    data: VarMap<Option<VarData>>,
    trail: Vec<Lit>,
    levels: Vec<usize>,
    // last value of each variable, restored on its next decision
    phases: VarMap<bool>,
}

impl Assignment {
    pub fn new(phases: VarMap<bool>) -> Self {
        let var_count = phases.len().saturating_sub(1);
        Self {
            data: var_map(var_count),
            trail: vec![],
            levels: vec![],
            phases,
        }
    }

    pub fn eval(&self, lit: Lit) -> Option<bool> {
        self.data[to_var(lit)]
            .as_ref()
            .map(|data| data.value == lit.is_positive())
    }

    pub fn set(&mut self, lit: Lit, reason: Reason) {
        self.trail.push(lit);

        if let Reason::Decision = reason {
            self.levels.push(self.trail.len() - 1);
        }

        let data = VarData {
            value: lit.is_positive(),
            level: self.last_level(),
            reason,
        };
        self.data[to_var(lit)] = Some(data);
    }

    /// Opens a new level by assigning `var` its saved phase.
    pub fn decide(&mut self, var: Var) {
        let lit = var as Lit;
        let lit = if self.phases[var] { lit } else { -lit };
        self.set(lit, Reason::Decision);
    }

    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    pub fn level(&self, lit: Lit) -> Option<usize> {
        self.data[to_var(lit)].as_ref().map(|data| data.level)
    }

    pub fn reason(&self, lit: Lit) -> Option<Reason> {
        self.data[to_var(lit)].as_ref().map(|data| data.reason)
    }

    pub fn last_level(&self) -> usize {
        self.levels.len()
    }

    /// Revert all changes at `level` (incl.) and above.
    pub fn backtrack(&mut self, level: usize) {
        debug_assert!(level >= 1 && level <= self.last_level());
        self.levels.drain(level..);
        let i = self.levels.pop().unwrap_or(0);
        for lit in self.trail.drain(i..) {
            let var = to_var(lit);
            self.phases[var] = lit.is_positive();
            self.data[var] = None;
        }
    }

    pub fn values(&self) -> Vec<bool> {
        self.data[1..]
            .iter()
            .map(|data| data.as_ref().is_some_and(|data| data.value))
            .collect()
    }
}
