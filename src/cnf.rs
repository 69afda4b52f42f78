use crate::{
    encode::Model,
    error::Result,
    types::{to_var, Clause, Problem},
    validate,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarCount {
    /// Set by the caller (or a DIMACS header); literals may not exceed it.
    Declared(usize),
    /// Largest variable mentioned by any clause. Variables that appear in no
    /// clause are invisible to inference.
    Inferred(usize),
}

impl VarCount {
    pub fn get(self) -> usize {
        match self {
            VarCount::Declared(n) | VarCount::Inferred(n) => n,
        }
    }

    pub fn is_declared(self) -> bool {
        matches!(self, VarCount::Declared(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cnf {
    clauses: Vec<Clause>,
    vars: VarCount,
}

pub(crate) fn max_var(clauses: &[Clause]) -> usize {
    clauses.iter().flatten().map(|&lit| to_var(lit)).max().unwrap_or(0)
}

impl Cnf {
    /// Validates `clauses` and builds an instance. With `vars` set, every
    /// literal must lie within `1..=vars`; without it the count is inferred.
    pub fn new(clauses: Vec<Clause>, vars: Option<usize>) -> Result<Self> {
        validate::clauses(clauses, vars)
    }

    pub(crate) fn from_validated(clauses: Vec<Clause>, declared: Option<usize>) -> Self {
        let vars = match declared {
            Some(n) => VarCount::Declared(n),
            None => VarCount::Inferred(max_var(&clauses)),
        };
        Self { clauses, vars }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn var_count(&self) -> usize {
        self.vars.get()
    }

    pub fn vars(&self) -> VarCount {
        self.vars
    }

    /// Appends a clause, validating it against the current variable count.
    /// An inferred count grows to cover the new clause.
    pub fn push(&mut self, clause: Clause) -> Result<()> {
        let declared = match self.vars {
            VarCount::Declared(n) => Some(n),
            VarCount::Inferred(_) => None,
        };
        validate::clause(self.clauses.len(), &clause, declared)?;

        if let VarCount::Inferred(n) = self.vars {
            let m = clause.iter().map(|&lit| to_var(lit)).max().unwrap_or(0);
            self.vars = VarCount::Inferred(n.max(m));
        }
        self.clauses.push(clause);
        Ok(())
    }

    /// Appends the clause that excludes exactly `model` and returns its
    /// index. The model must cover this instance's variables.
    pub(crate) fn block(&mut self, model: &Model) -> usize {
        debug_assert_eq!(model.len(), self.var_count());
        self.clauses.push(model.blocking_clause());
        self.clauses.len() - 1
    }

    pub fn to_problem(&self) -> Problem {
        Problem {
            var_count: self.var_count(),
            clauses: self.clauses.clone(),
        }
    }

    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| model.value(to_var(lit)) == Some(lit > 0)))
    }
}

#[cfg(test)]
mod tests {
    use crate::encode::Model;

    use super::{Cnf, VarCount};

    #[test]
    fn inferred_count() {
        let cnf = Cnf::new(vec![vec![1, -5, 4], vec![-3]], None).unwrap();
        assert_eq!(cnf.vars(), VarCount::Inferred(5));
        assert!(!cnf.vars().is_declared());
    }

    #[test]
    fn declared_count_above_max() {
        let cnf = Cnf::new(vec![vec![1, -2]], Some(7)).unwrap();
        assert_eq!(cnf.vars(), VarCount::Declared(7));
        assert_eq!(cnf.to_problem().var_count, 7);
    }

    #[test]
    fn push_rederives_inferred_count() {
        let mut cnf = Cnf::new(vec![vec![1, 2]], None).unwrap();
        cnf.push(vec![-9, 3]).unwrap();
        assert_eq!(cnf.var_count(), 9);
        assert_eq!(cnf.clauses().len(), 2);
    }

    #[test]
    fn push_respects_declared_count() {
        let mut cnf = Cnf::new(vec![vec![1, 2]], Some(2)).unwrap();
        assert!(cnf.push(vec![3]).is_err());
        assert!(cnf.push(vec![0]).is_err());
        assert_eq!(cnf.clauses().len(), 1);
    }

    #[test]
    fn empty_instance() {
        let cnf = Cnf::new(vec![], None).unwrap();
        assert_eq!(cnf.var_count(), 0);
        assert!(cnf.is_satisfied_by(&Model::from_lits(vec![]).unwrap()));
    }

    #[test]
    fn satisfaction() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![2, 3]], None).unwrap();
        assert!(cnf.is_satisfied_by(&Model::from_lits(vec![1, 2, -3]).unwrap()));
        assert!(!cnf.is_satisfied_by(&Model::from_lits(vec![-1, 2, -3]).unwrap()));

        let empty_clause = Cnf::new(vec![vec![]], None).unwrap();
        assert!(!empty_clause.is_satisfied_by(&Model::from_lits(vec![]).unwrap()));
    }

    #[test]
    fn block_appends_negated_model() {
        let mut cnf = Cnf::new(vec![vec![1, 2]], None).unwrap();
        let model = Model::from_lits(vec![1, -2]).unwrap();
        assert!(cnf.is_satisfied_by(&model));

        let index = cnf.block(&model);
        assert_eq!(index, 1);
        assert_eq!(cnf.clauses()[index], vec![-1, 2]);
        assert!(!cnf.is_satisfied_by(&model));
    }
}
