//! # vw-allsat
//!
//! Satisfiability of CNF formulas and enumeration of all their models.
//!
//! Clauses are sequences of nonzero signed integers: the magnitude names a
//! variable (1-based), the sign its polarity. [`solve`] decides an instance
//! under an optional propagation budget; [`iter_solutions`] lazily yields
//! every model exactly once by appending a blocking clause after each one.
//!
//! ```
//! use vw_allsat::{iter_solutions, solve, Config, Solution};
//!
//! let clauses = vec![vec![1, 2], vec![-1, -2]];
//! assert!(solve(&clauses, &Config::default()).unwrap().is_sat());
//! assert_eq!(iter_solutions(&clauses, &Config::default()).unwrap().count(), 2);
//!
//! let clauses = vec![vec![1], vec![-1]];
//! assert_eq!(solve(&clauses, &Config::default()).unwrap(), Solution::Unsat);
//! ```

pub mod cnf;
pub mod config;
pub mod encode;
pub mod engine;
pub mod enumerate;
pub mod error;
pub mod io;
pub mod solve;
pub mod solver;
pub mod types;
pub mod validate;

pub use cnf::{Cnf, VarCount};
pub use config::Config;
pub use encode::Model;
pub use engine::{Engine, Run, Status};
pub use enumerate::{iter_solutions, iter_solutions_with, Solutions, Termination};
pub use error::{Error, Result};
pub use solve::{solve, solve_cnf, solve_with};
pub use solver::Cdcl;
pub use types::{Clause, Lit, Solution};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
