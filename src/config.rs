/// Options shared by [`solve`](crate::solve()) and
/// [`iter_solutions`](crate::iter_solutions()).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Declared variable count. Must cover every literal; without it the
    /// count is inferred from the largest variable in the clauses.
    pub vars: Option<usize>,
    /// Propagation budget, 0 for unbounded. An enumeration shares one
    /// budget across all of its steps.
    pub prop_limit: u64,
    /// Diagnostic verbosity: 1 logs run summaries, 2 also dumps the instance.
    /// Never changes the outcome.
    pub verbose: u8,
}

impl Config {
    pub fn vars(mut self, vars: usize) -> Self {
        self.vars = Some(vars);
        self
    }

    pub fn prop_limit(mut self, prop_limit: u64) -> Self {
        self.prop_limit = prop_limit;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn budget(&self) -> Option<u64> {
        (self.prop_limit != 0).then_some(self.prop_limit)
    }
}
