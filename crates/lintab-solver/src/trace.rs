use std::fmt;

/// Which simplex phase a pivot belongs to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Feasibility: drive the artificial variables out of the basis.
    One,
    /// Optimization of the original objective.
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => write!(f, "I"),
            Phase::Two => write!(f, "II"),
        }
    }
}

/// Copy of the tableau state at one point in the solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TableauSnapshot {
    /// Constraint rows, then the z row, then the w row when present.
    pub rows: Vec<Vec<f64>>,
    /// Basic variable column per constraint row.
    pub basis: Vec<usize>,
}

/// One pivot: the selection that was made and the tableau it produced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PivotStep {
    pub phase: Phase,
    /// 1-based iteration count within the phase.
    pub iteration: usize,
    /// Entering variable (column index).
    pub entering: usize,
    /// Constraint row the entering variable replaced.
    pub leaving_row: usize,
    /// Variable displaced from the basis.
    pub leaving_var: usize,
    /// Tableau state after the pivot.
    pub after: TableauSnapshot,
}

/// Ordered record of everything the solver did, for external reporting.
/// The solver itself never prints.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub initial: Option<TableauSnapshot>,
    pub steps: Vec<PivotStep>,
}
