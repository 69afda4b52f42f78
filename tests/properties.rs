//! Solving and enumeration checked against brute force on small instances.

use std::collections::HashSet;

use proptest::prelude::*;
use vw_allsat::{iter_solutions, solve, Cnf, Config, Model, Solution, Termination};

const VARS: i32 = 6;

fn literal() -> impl Strategy<Value = i32> {
    (1..=VARS, any::<bool>()).prop_map(|(var, negated)| if negated { -var } else { var })
}

fn clauses() -> impl Strategy<Value = Vec<Vec<i32>>> {
    prop::collection::vec(prop::collection::vec(literal(), 1..=3), 0..14)
}

/// Number of assignments over `VARS` variables that satisfy every clause.
fn brute_force_count(clauses: &[Vec<i32>]) -> usize {
    (0..1u32 << VARS)
        .filter(|bits| {
            clauses.iter().all(|clause| {
                clause
                    .iter()
                    .any(|&lit| (bits >> (lit.abs() - 1) & 1 == 1) == (lit > 0))
            })
        })
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn solve_agrees_with_brute_force(clauses in clauses()) {
        let cnf = Cnf::new(clauses.clone(), Some(VARS as usize)).unwrap();
        let solution = solve(&clauses, &Config::default().vars(VARS as usize)).unwrap();

        match solution {
            Solution::Sat { model } => {
                prop_assert_eq!(model.len(), VARS as usize);
                prop_assert!(cnf.is_satisfied_by(&model));
            }
            Solution::Unsat => prop_assert_eq!(brute_force_count(&clauses), 0),
            Solution::Unknown => prop_assert!(false, "unbounded solve gave up"),
        }
    }

    #[test]
    fn enumeration_is_exact(clauses in clauses()) {
        let cnf = Cnf::new(clauses.clone(), Some(VARS as usize)).unwrap();
        let mut solutions = iter_solutions(&clauses, &Config::default().vars(VARS as usize)).unwrap();
        let models: Vec<Model> = solutions.by_ref().collect();

        prop_assert_eq!(solutions.termination(), Some(Termination::Exhausted));
        prop_assert_eq!(models.len(), brute_force_count(&clauses));
        prop_assert_eq!(models.iter().collect::<HashSet<_>>().len(), models.len());
        for model in &models {
            prop_assert!(cnf.is_satisfied_by(model));
        }
    }

    #[test]
    fn inferred_count_sizes_models(clauses in clauses()) {
        let max_var = clauses.iter().flatten().map(|lit| lit.unsigned_abs() as usize).max().unwrap_or(0);
        if let Solution::Sat { model } = solve(&clauses, &Config::default()).unwrap() {
            prop_assert_eq!(model.len(), max_var);
        }
    }

    #[test]
    fn budget_never_changes_models(clauses in clauses(), limit in 1u64..60) {
        let all: Vec<Model> = iter_solutions(&clauses, &Config::default()).unwrap().collect();
        let mut bounded = iter_solutions(&clauses, &Config::default().prop_limit(limit)).unwrap();
        let prefix: Vec<Model> = bounded.by_ref().collect();

        prop_assert!(prefix.len() <= all.len());
        prop_assert_eq!(&prefix[..], &all[..prefix.len()]);
        if bounded.termination() == Some(Termination::Exhausted) {
            prop_assert_eq!(prefix.len(), all.len());
        }
    }
}
