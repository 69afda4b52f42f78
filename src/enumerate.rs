//! Enumeration of all models by blocking clauses.

use std::iter::FusedIterator;

use tracing::{debug, info};

use crate::{
    cnf::Cnf,
    config::Config,
    encode::Model,
    engine::Engine,
    error::Result,
    solve,
    solver::Cdcl,
    types::{Lit, Solution},
    validate::{self, Literal},
};

/// Why an enumeration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The engine proved no further model exists: all were yielded.
    Exhausted,
    /// The propagation budget ran out. Models may remain unexplored.
    Interrupted,
}

/// Lazy, non-restartable sequence of distinct models.
///
/// Owns a private copy of the instance that grows by one blocking clause
/// per yielded model.
pub struct Solutions<E: Engine = Cdcl> {
    engine: E,
    cnf: Cnf,
    limit: Option<u64>,
    spent: u64,
    verbose: u8,
    found: usize,
    last_blocking: Option<usize>,
    termination: Option<Termination>,
}

/// Enumerates the models of `clauses` with the bundled engine.
///
/// ```
/// use vw_allsat::{iter_solutions, Config, Termination};
///
/// let clauses = vec![vec![1, -5, 4], vec![-1, 5, 3, 4], vec![-3, -4]];
/// let mut solutions = iter_solutions(&clauses, &Config::default()).unwrap();
/// assert_eq!(solutions.by_ref().count(), 18);
/// assert_eq!(solutions.termination(), Some(Termination::Exhausted));
/// ```
pub fn iter_solutions<I, C>(clauses: I, config: &Config) -> Result<Solutions<Cdcl>>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Literal,
{
    iter_solutions_with(Cdcl, clauses, config)
}

/// Like [`iter_solutions`], with a caller-supplied engine.
pub fn iter_solutions_with<E, I, C>(engine: E, clauses: I, config: &Config) -> Result<Solutions<E>>
where
    E: Engine,
    I: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Literal,
{
    let cnf = validate::clauses(clauses, config.vars)?;
    Ok(Solutions::from_cnf(engine, cnf, config))
}

impl<E: Engine> Solutions<E> {
    pub fn from_cnf(engine: E, cnf: Cnf, config: &Config) -> Self {
        solve::log_instance(&cnf, config.verbose);
        Self {
            engine,
            cnf,
            limit: config.budget(),
            spent: 0,
            verbose: config.verbose,
            found: 0,
            last_blocking: None,
            termination: None,
        }
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_complete(&self) -> bool {
        self.termination == Some(Termination::Exhausted)
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn propagations(&self) -> u64 {
        self.spent
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    pub fn last_blocking_clause(&self) -> Option<&[Lit]> {
        self.last_blocking.map(|i| self.cnf.clauses()[i].as_slice())
    }

    fn remaining(&self) -> Option<u64> {
        self.limit.map(|limit| limit.saturating_sub(self.spent))
    }

    fn finish(&mut self, termination: Termination) {
        self.termination = Some(termination);
        if self.verbose >= 1 {
            info!(found = self.found, propagations = self.spent, ?termination, "enumeration finished");
        } else {
            debug!(found = self.found, propagations = self.spent, ?termination, "enumeration finished");
        }
    }
}

impl<E: Engine> Iterator for Solutions<E> {
    type Item = Model;

    fn next(&mut self) -> Option<Self::Item> {
        if self.termination.is_some() {
            return None;
        }

        let budget = self.remaining();
        let (solution, spent) = solve::run(&mut self.engine, &self.cnf, budget, self.verbose);
        self.spent += spent;

        match solution {
            Solution::Sat { model } => {
                self.last_blocking = Some(self.cnf.block(&model));
                self.found += 1;
                debug!(found = self.found, propagations = self.spent, "model found");
                Some(model)
            }
            Solution::Unsat => {
                self.finish(Termination::Exhausted);
                None
            }
            Solution::Unknown => {
                self.finish(Termination::Interrupted);
                None
            }
        }
    }
}

impl<E: Engine> FusedIterator for Solutions<E> {}
