use crate::problem::{LpProblem, ValidationError};
use crate::solution::{Solution, SolutionStatus};
use crate::tableau::Tableau;
use crate::trace::{Phase, PivotStep, Trace};

/// Auxiliary objective must be within this of zero after Phase I.
const FEASIBILITY_TOL: f64 = 1e-10;

/// Two-phase simplex solver.
///
/// Phase I minimizes the sum of artificial variables (skipped when no
/// constraint needs one); Phase II optimizes the original objective. Both
/// phases pivot with Dantzig's rule by default, which can cycle on
/// degenerate tableaus; Bland's rule is available behind
/// [`with_blands_rule`](Solver::with_blands_rule).
pub struct Solver {
    /// Maximum pivots per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
    /// Use Bland's anti-cycling rule for entering selection
    blands_rule: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-9,
            blands_rule: false,
        }
    }
}

enum PhaseOutcome {
    Converged,
    Unbounded,
    IterationLimit,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_blands_rule(mut self, enabled: bool) -> Self {
        self.blands_rule = enabled;
        self
    }

    /// Solve the LP problem using the two-phase simplex method.
    ///
    /// `Err` is reserved for malformed input; infeasibility,
    /// unboundedness, and hitting the iteration cap are terminal statuses
    /// on the returned [`Solution`].
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, ValidationError> {
        problem.validate()?;

        let mut tableau = Tableau::build(problem);
        let mut trace = Trace {
            initial: Some(tableau.snapshot()),
            steps: Vec::new(),
        };
        let minimize = problem.objective.minimize;

        if tableau.has_artificials() {
            match self.run_phase(&mut tableau, Phase::One, &mut trace) {
                PhaseOutcome::Converged => {}
                PhaseOutcome::Unbounded => return Ok(Solution::unbounded(minimize, trace)),
                PhaseOutcome::IterationLimit => return Ok(Solution::non_convergent(trace)),
            }

            if tableau.w_value().abs() > FEASIBILITY_TOL {
                return Ok(Solution::infeasible(trace));
            }
            tableau.drop_w_row();
        }

        match self.run_phase(&mut tableau, Phase::Two, &mut trace) {
            PhaseOutcome::Converged => Ok(self.extract(problem, &tableau, trace)),
            PhaseOutcome::Unbounded => Ok(Solution::unbounded(minimize, trace)),
            PhaseOutcome::IterationLimit => Ok(Solution::non_convergent(trace)),
        }
    }

    fn run_phase(&self, tableau: &mut Tableau, phase: Phase, trace: &mut Trace) -> PhaseOutcome {
        let (objective_row, limit) = match phase {
            // Phase I scans the w row over every non-RHS column.
            Phase::One => (tableau.w_row(), tableau.rhs_col()),
            // Phase II scans the z row; artificial columns are never
            // re-entered even though they stay in the buffer.
            Phase::Two => (tableau.z_row(), tableau.artificial_start()),
        };

        for iteration in 1..=self.max_iterations {
            let Some(entering) =
                tableau.entering_column(objective_row, limit, self.tolerance, self.blands_rule)
            else {
                return PhaseOutcome::Converged;
            };
            let Some(leaving_row) = tableau.leaving_row(entering, self.tolerance) else {
                return PhaseOutcome::Unbounded;
            };
            let leaving_var = tableau.pivot(leaving_row, entering);
            trace.steps.push(PivotStep {
                phase,
                iteration,
                entering,
                leaving_row,
                leaving_var,
                after: tableau.snapshot(),
            });
        }

        // Distinguish converging exactly on the last allowed pivot from
        // running out of iterations.
        if tableau
            .entering_column(objective_row, limit, self.tolerance, self.blands_rule)
            .is_none()
        {
            PhaseOutcome::Converged
        } else {
            PhaseOutcome::IterationLimit
        }
    }

    fn extract(&self, problem: &LpProblem, tableau: &Tableau, trace: Trace) -> Solution {
        let n = problem.num_variables();
        let mut values = vec![0.0; n];
        for (i, &var) in tableau.basis().iter().enumerate() {
            if var < n {
                values[var] = tableau.rhs(i);
            }
        }

        let z = tableau.z_value();
        let objective_value = if problem.objective.minimize { -z } else { z };

        Solution {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
            trace,
        }
    }
}
