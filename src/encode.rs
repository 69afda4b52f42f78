use crate::{
    error::{Error, Result},
    types::{to_var, Clause, Lit, Var},
};

/// A full assignment: entry `i` is the literal of variable `i + 1`,
/// positive when the variable is true.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Model(Vec<Lit>);

impl Model {
    /// Wraps literals listed in variable order, one per variable starting
    /// at 1.
    pub fn from_lits(lits: Vec<Lit>) -> Result<Self> {
        if let Some((i, &lit)) = lits
            .iter()
            .enumerate()
            .find(|&(i, &lit)| lit == 0 || lit == Lit::MIN || to_var(lit) != i + 1)
        {
            return Err(Error::Malformed(format!(
                "model position {i} holds {lit}, expected a literal of variable {}",
                i + 1
            )));
        }
        Ok(Self(lits))
    }

    pub fn lits(&self) -> &[Lit] {
        &self.0
    }

    pub fn into_lits(self) -> Vec<Lit> {
        self.0
    }

    pub fn to_bools(&self) -> Vec<bool> {
        self.0.iter().map(|&lit| lit > 0).collect()
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        var.checked_sub(1)
            .and_then(|i| self.0.get(i))
            .map(|&lit| lit > 0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn blocking_clause(&self) -> Clause {
        self.0.iter().map(|&lit| -lit).collect()
    }
}

/// Builds a model of `var_count` variables from an engine polarity buffer.
/// Variables the engine never saw are reported false.
pub fn encode(native: &[bool], var_count: usize) -> Model {
    let lits = (1..=var_count)
        .map(|var| {
            let lit = var as Lit;
            match native.get(var - 1) {
                Some(true) => lit,
                _ => -lit,
            }
        })
        .collect();
    Model(lits)
}

#[cfg(test)]
mod tests {
    use super::{encode, Model};

    #[test]
    fn variable_order() {
        let model = encode(&[true, false, false, false, true], 5);
        assert_eq!(model.lits(), &[1, -2, -3, -4, 5]);
        assert_eq!(model.to_bools(), vec![true, false, false, false, true]);
    }

    #[test]
    fn pads_missing_vars_false() {
        let model = encode(&[true], 3);
        assert_eq!(model.lits(), &[1, -2, -3]);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn value_lookup() {
        let model = Model::from_lits(vec![1, -2]).unwrap();
        assert_eq!(model.value(1), Some(true));
        assert_eq!(model.value(2), Some(false));
        assert_eq!(model.value(0), None);
        assert_eq!(model.value(3), None);
    }

    #[test]
    fn from_lits_checks_variable_order() {
        assert!(Model::from_lits(vec![-1, 2]).is_ok());
        assert!(Model::from_lits(vec![2, 1]).unwrap_err().is_shape_error());
        assert!(Model::from_lits(vec![1, 0]).is_err());
        assert!(Model::from_lits(vec![1, -3]).is_err());
        assert!(Model::from_lits(vec![i32::MIN]).is_err());
    }

    #[test]
    fn blocking_clause() {
        let model = Model::from_lits(vec![1, -2, 3]).unwrap();
        assert_eq!(model.blocking_clause(), vec![-1, 2, -3]);
        assert_eq!(Model::from_lits(vec![]).unwrap().blocking_clause(), Vec::<i32>::new());
    }
}
