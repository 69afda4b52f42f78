mod assignment;
mod branching;
mod map;
mod restart;

use tracing::debug;

use crate::{
    engine::{Engine, Run, Status},
    types::{to_var, Clause, Problem},
};

use self::{
    assignment::{Assignment, Reason},
    branching::{initial_phases, Chooser},
    map::LitMap,
    restart::Restarts,
};

const RESTART_BASE: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub decisions: u64,
    pub conflicts: u64,
    pub propagations: u64,
    pub restarts: usize,
    pub learnt: usize,
}

pub struct Solver {
    clauses: Vec<Clause>,

    assignment: Assignment,

    watched: LitMap<Vec<usize>>,
    prop_head: usize,

    chooser: Chooser,
    restarts: Restarts,

    budget: Option<u64>,
    stats: Stats,
}

impl Solver {
    pub fn new(problem: &Problem) -> Self {
        let var_count = problem.var_count;

        let mut solver = Solver {
            clauses: Vec::with_capacity(problem.clauses.len()),
            assignment: Assignment::new(initial_phases(problem)),
            watched: LitMap::<Vec<usize>>::new(var_count),
            prop_head: 0,
            chooser: Chooser::new(var_count),
            restarts: Restarts::new(RESTART_BASE),
            budget: None,
            stats: Stats::default(),
        };

        for clause in &problem.clauses {
            let mut clause = clause.clone();
            clause.sort();
            clause.dedup();
            solver.add(clause);
        }

        solver
    }

    /// Gives up once `budget` propagations have been spent.
    pub fn with_budget(mut self, budget: Option<u64>) -> Self {
        self.budget = budget;
        self
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn add(&mut self, clause: Clause) -> usize {
        let i = self.clauses.len();
        if let [lit0, lit1, ..] = clause[..] {
            self.watched[lit0].push(i);
            self.watched[lit1].push(i);
        }
        self.clauses.push(clause);
        i
    }

    fn exhausted(&self) -> bool {
        self.budget
            .is_some_and(|budget| self.stats.propagations >= budget)
    }

    fn propagate(&mut self) -> Option<usize> {
        while let Some(lit) = self.assignment.trail().get(self.prop_head) {
            let lit = -lit;
            self.stats.propagations += 1;

            let mut i = 0;
            'clause: while i < self.watched[lit].len() {
                let c = self.watched[lit][i];
                let clause = &mut self.clauses[c];

                // The two watched literals always sit at index 0 and 1.
                if clause[1] != lit {
                    clause.swap(0, 1);
                }
                debug_assert_eq!(clause[1], lit);

                for j in 0..clause.len() {
                    match self.assignment.eval(clause[j]) {
                        Some(true) => {
                            i += 1;
                            continue 'clause;
                        }
                        None if j != 0 => {
                            clause.swap(1, j);
                            debug_assert_ne!(clause[0], clause[1]);

                            self.watched[lit].swap_remove(i);
                            debug_assert!(!self.watched[clause[1]].contains(&c));
                            self.watched[clause[1]].push(c);

                            continue 'clause;
                        }
                        _ => (),
                    }
                }

                if self.assignment.eval(clause[0]).is_none() {
                    // unit clause
                    let unit_lit = clause[0];
                    self.assignment
                        .set(unit_lit, Reason::Propagation { i_clause: c });
                } else {
                    // conflict
                    return Some(c);
                }

                i += 1;
            }

            self.prop_head += 1;
        }

        None
    }

    // basic clause minimization: drop literals implied by the rest of the clause
    fn minimize(&self, learnt: &mut Clause) {
        let mut i = 1;
        while i < learnt.len() {
            if let Some(Reason::Propagation { i_clause }) = self.assignment.reason(learnt[i]) {
                let remove = self.clauses[i_clause].iter().all(|&lit| {
                    learnt.contains(&lit)
                        || learnt.contains(&-lit)
                        || self.assignment.level(lit) == Some(0)
                });
                if remove {
                    learnt.swap_remove(i);
                    continue;
                }
            }
            i += 1;
        }
    }

    /// First-UIP conflict analysis. Returns the learnt clause with its
    /// asserting literal first, and the level to backtrack to.
    fn analyze(&mut self, i_conflict: usize) -> (Clause, usize) {
        let mut learnt = self.clauses[i_conflict].clone();
        let last_level = self.assignment.last_level();

        let mut i_trail = self.assignment.trail().len();
        let i_assert = loop {
            for &lit in &learnt {
                self.chooser.touch(to_var(lit));
            }

            let mut iter = learnt
                .iter()
                .enumerate()
                .filter(|(_, &lit)| self.assignment.level(lit).unwrap_or(0) >= last_level);
            // the conflict involves at least one literal of the current level
            let (i, _) = iter.next().unwrap();
            if iter.next().is_none() {
                break i;
            }

            i_trail -= 1;
            let on_lit = self.assignment.trail()[i_trail];

            let i_reason = match self.assignment.reason(on_lit) {
                Some(Reason::Propagation { i_clause }) => i_clause,
                _ => unreachable!("decision literal reached before the first UIP"),
            };
            let reason = &self.clauses[i_reason];
            debug_assert!(reason.contains(&on_lit));

            let len_before = learnt.len();
            learnt.retain(|&lit| lit != -on_lit);
            if learnt.len() != len_before {
                // learnt contained -on_lit, finish the resolution
                learnt.extend(reason.iter().filter(|&&lit| lit != on_lit));
                // dedup so the literals per level are counted correctly
                learnt.sort();
                learnt.dedup();
            }
        };

        learnt.swap(0, i_assert);

        self.minimize(&mut learnt);

        let backtrack_level = if learnt.len() == 1 {
            1
        } else {
            let (i_max, _) = learnt[1..]
                .iter()
                .enumerate()
                .max_by_key(|(_, &lit)| self.assignment.level(lit).unwrap_or(0))
                .unwrap();
            learnt.swap(1, i_max + 1);

            self.assignment.level(learnt[1]).unwrap_or(0) + 1
        };

        self.chooser.rescale();

        (learnt, backtrack_level)
    }

    fn backtrack(&mut self, level: usize) {
        self.assignment.backtrack(level);
        self.prop_head = std::cmp::min(self.prop_head, self.assignment.trail().len());
    }

    pub fn solve(&mut self) -> Status {
        let status = self.search();
        debug!(
            decisions = self.stats.decisions,
            conflicts = self.stats.conflicts,
            propagations = self.stats.propagations,
            restarts = self.stats.restarts,
            learnt = self.stats.learnt,
            "cdcl run finished"
        );
        status
    }

    fn search(&mut self) -> Status {
        for (i, clause) in self.clauses.iter().enumerate() {
            match clause[..] {
                [] => return Status::Unsat,
                [lit] => match self.assignment.eval(lit) {
                    None => self
                        .assignment
                        .set(lit, Reason::Propagation { i_clause: i }),
                    Some(false) => return Status::Unsat,
                    Some(true) => (),
                },
                _ => (),
            }
        }

        if let Some(_i_conflict) = self.propagate() {
            return Status::Unsat;
        }

        while let Some(var) = self.chooser.choose(&self.assignment) {
            if self.exhausted() {
                return Status::Unknown;
            }
            self.stats.decisions += 1;
            self.assignment.decide(var);

            while let Some(i_conflict) = self.propagate() {
                self.stats.conflicts += 1;
                self.restarts.conflict();

                if self.assignment.last_level() == 0 {
                    return Status::Unsat;
                }

                let (learnt, level) = self.analyze(i_conflict);
                self.backtrack(level);

                let lit_assert = learnt[0];
                let i_clause = self.add(learnt);
                self.stats.learnt += 1;
                self.assignment
                    .set(lit_assert, Reason::Propagation { i_clause });

                if self.exhausted() {
                    return Status::Unknown;
                }
            }

            if self.restarts.due() && self.assignment.last_level() >= 1 {
                self.stats.restarts = self.restarts.count();
                self.backtrack(1);
            }
        }

        Status::Sat(self.assignment.values())
    }
}

/// The bundled engine: a fresh [`Solver`] per run.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cdcl;

impl Engine for Cdcl {
    fn run(&mut self, problem: &Problem, budget: Option<u64>) -> Run {
        let mut solver = Solver::new(problem).with_budget(budget);
        let status = solver.solve();
        Run {
            status,
            propagations: solver.stats().propagations,
        }
    }
}
