pub mod elimination;
mod problem;
mod simplex;
mod solution;
mod tableau;
mod trace;

pub use problem::{Constraint, ConstraintOp, LpProblem, Objective, ValidationError};
pub use simplex::Solver;
pub use solution::{Solution, SolutionStatus};
pub use trace::{Phase, PivotStep, TableauSnapshot, Trace};
