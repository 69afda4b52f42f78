use crate::types::Problem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Sat(Vec<bool>),
    Unsat,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub status: Status,
    pub propagations: u64,
}

/// A SAT decision procedure.
pub trait Engine {
    /// Decides `problem`, giving up with [`Status::Unknown`] once `budget`
    /// propagations have been spent. `None` means unbounded.
    fn run(&mut self, problem: &Problem, budget: Option<u64>) -> Run;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn run(&mut self, problem: &Problem, budget: Option<u64>) -> Run {
        (**self).run(problem, budget)
    }
}
