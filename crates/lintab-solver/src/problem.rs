use thiserror::Error;

/// Represents a linear programming problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

/// A malformed problem definition, rejected before any tableau is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("objective has no coefficients")]
    EmptyObjective,
    #[error("problem has no constraints")]
    NoConstraints,
    #[error("objective has {found} coefficients for {expected} variables")]
    ObjectiveLength { expected: usize, found: usize },
    #[error("constraint {name} has {found} coefficients, expected {expected}")]
    ConstraintLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("objective contains a non-finite coefficient")]
    NonFiniteObjective,
    #[error("constraint {name} contains a non-finite value")]
    NonFiniteConstraint { name: String },
}

impl LpProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                minimize: false,
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective {
            coefficients,
            minimize,
        };
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        coefficients: Vec<f64>,
        op: ConstraintOp,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            op,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Checks that all dimensions agree and every number is finite.
    ///
    /// Note: `rhs >= 0` is not checked. Rows with a negative right-hand
    /// side fall outside the standard form the tableau construction
    /// assumes, which is a documented limitation rather than an error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let n = self.num_variables();
        if n == 0 || self.objective.coefficients.is_empty() {
            return Err(ValidationError::EmptyObjective);
        }
        if self.objective.coefficients.len() != n {
            return Err(ValidationError::ObjectiveLength {
                expected: n,
                found: self.objective.coefficients.len(),
            });
        }
        if self.objective.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ValidationError::NonFiniteObjective);
        }
        if self.constraints.is_empty() {
            return Err(ValidationError::NoConstraints);
        }
        for c in &self.constraints {
            if c.coefficients.len() != n {
                return Err(ValidationError::ConstraintLength {
                    name: c.name.clone(),
                    expected: n,
                    found: c.coefficients.len(),
                });
            }
            if c.coefficients.iter().any(|v| !v.is_finite()) || !c.rhs.is_finite() {
                return Err(ValidationError::NonFiniteConstraint {
                    name: c.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_problem() -> LpProblem {
        let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
        problem.set_objective(vec![1.0, 2.0], false);
        problem.add_constraint("c1", vec![1.0, 1.0], ConstraintOp::Le, 4.0);
        problem
    }

    #[test]
    fn valid_problem_passes() {
        assert_eq!(base_problem().validate(), Ok(()));
    }

    #[test]
    fn objective_length_mismatch() {
        let mut problem = base_problem();
        problem.set_objective(vec![1.0], false);
        assert_eq!(
            problem.validate(),
            Err(ValidationError::ObjectiveLength {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn constraint_length_mismatch() {
        let mut problem = base_problem();
        problem.add_constraint("bad", vec![1.0], ConstraintOp::Ge, 1.0);
        assert_eq!(
            problem.validate(),
            Err(ValidationError::ConstraintLength {
                name: "bad".to_string(),
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn missing_constraints_rejected() {
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0], false);
        assert_eq!(problem.validate(), Err(ValidationError::NoConstraints));
    }

    #[test]
    fn non_finite_values_rejected() {
        let mut problem = base_problem();
        problem.add_constraint("nan", vec![1.0, f64::NAN], ConstraintOp::Le, 1.0);
        assert_eq!(
            problem.validate(),
            Err(ValidationError::NonFiniteConstraint {
                name: "nan".to_string()
            })
        );
    }
}
