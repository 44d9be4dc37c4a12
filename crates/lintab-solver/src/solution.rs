use crate::trace::Trace;

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal values for each variable (empty unless optimal)
    pub values: Vec<f64>,
    /// Optimal objective value
    pub objective_value: f64,
    /// Pivot-by-pivot record of the solve
    pub trace: Trace,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (Phase I could not zero the auxiliary objective)
    Infeasible,
    /// The problem is unbounded (no valid leaving row for an improving column)
    Unbounded,
    /// The iteration cap was reached before either phase converged
    NonConvergent,
}

impl Solution {
    pub(crate) fn infeasible(trace: Trace) -> Self {
        Self {
            status: SolutionStatus::Infeasible,
            values: Vec::new(),
            objective_value: 0.0,
            trace,
        }
    }

    pub(crate) fn unbounded(minimize: bool, trace: Trace) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: if minimize {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
            trace,
        }
    }

    pub(crate) fn non_convergent(trace: Trace) -> Self {
        Self {
            status: SolutionStatus::NonConvergent,
            values: Vec::new(),
            objective_value: 0.0,
            trace,
        }
    }
}
