use crate::problem::{ConstraintOp, LpProblem};
use crate::trace::TableauSnapshot;

/// Dense simplex tableau in standard form.
///
/// Rows are the `m` constraint rows, then the objective row `z`, then a
/// transient auxiliary row `w` while artificial variables are in play.
/// Columns are the decision variables, slack columns, surplus columns,
/// artificial columns, and the right-hand side, in that order. The buffer
/// is owned; caller data is copied in during construction and never
/// aliased.
pub(crate) struct Tableau {
    rows: Vec<Vec<f64>>,
    /// Basic variable column for each constraint row.
    basis: Vec<usize>,
    /// All non-basic, non-RHS columns, kept sorted.
    non_basis: Vec<usize>,
    n_vars: usize,
    n_slack: usize,
    n_surplus: usize,
    n_artificial: usize,
    has_w_row: bool,
}

impl Tableau {
    /// Builds the initial tableau. The problem must already be validated.
    pub(crate) fn build(problem: &LpProblem) -> Self {
        let n = problem.num_variables();
        let m = problem.num_constraints();

        let mut n_slack = 0;
        let mut n_surplus = 0;
        let mut n_artificial = 0;
        for c in &problem.constraints {
            match c.op {
                ConstraintOp::Le => n_slack += 1,
                ConstraintOp::Ge => {
                    n_surplus += 1;
                    n_artificial += 1;
                }
                ConstraintOp::Eq => n_artificial += 1,
            }
        }

        let total_cols = n + n_slack + n_surplus + n_artificial + 1;
        let rhs = total_cols - 1;

        let mut rows = vec![vec![0.0; total_cols]; m];
        let mut basis = vec![0usize; m];
        let mut slack_idx = n;
        let mut surplus_idx = n + n_slack;
        let mut artificial_idx = n + n_slack + n_surplus;
        // (owning row, column) of every artificial variable
        let mut artificials: Vec<(usize, usize)> = Vec::new();

        for (i, c) in problem.constraints.iter().enumerate() {
            for (j, &coef) in c.coefficients.iter().enumerate() {
                rows[i][j] = coef;
            }
            rows[i][rhs] = c.rhs;

            match c.op {
                ConstraintOp::Le => {
                    rows[i][slack_idx] = 1.0;
                    basis[i] = slack_idx;
                    slack_idx += 1;
                }
                ConstraintOp::Ge => {
                    rows[i][surplus_idx] = -1.0;
                    surplus_idx += 1;
                    rows[i][artificial_idx] = 1.0;
                    basis[i] = artificial_idx;
                    artificials.push((i, artificial_idx));
                    artificial_idx += 1;
                }
                ConstraintOp::Eq => {
                    rows[i][artificial_idx] = 1.0;
                    basis[i] = artificial_idx;
                    artificials.push((i, artificial_idx));
                    artificial_idx += 1;
                }
            }
        }

        // z row: negated objective for maximization; minimizing c*x is
        // maximizing (-c)*x, so minimization keeps the coefficients as-is.
        let mut z = vec![0.0; total_cols];
        for (j, &coef) in problem.objective.coefficients.iter().enumerate() {
            z[j] = if problem.objective.minimize { coef } else { -coef };
        }
        rows.push(z);

        let has_w_row = !artificials.is_empty();
        if has_w_row {
            // w row: 1 in each artificial column, then each artificial's
            // owning row subtracted out so basic artificials have zero
            // reduced cost in w.
            let mut w = vec![0.0; total_cols];
            for &(_, col) in &artificials {
                w[col] = 1.0;
            }
            for &(row, _) in &artificials {
                for j in 0..total_cols {
                    w[j] -= rows[row][j];
                }
            }
            rows.push(w);
        }

        let non_basis = (0..rhs).filter(|j| !basis.contains(j)).collect();

        Tableau {
            rows,
            basis,
            non_basis,
            n_vars: n,
            n_slack,
            n_surplus,
            n_artificial,
            has_w_row,
        }
    }

    pub(crate) fn num_constraints(&self) -> usize {
        self.basis.len()
    }

    pub(crate) fn rhs_col(&self) -> usize {
        self.rows[0].len() - 1
    }

    /// Index of the first artificial column (equals the RHS column when
    /// there are no artificials).
    pub(crate) fn artificial_start(&self) -> usize {
        self.n_vars + self.n_slack + self.n_surplus
    }

    pub(crate) fn has_artificials(&self) -> bool {
        self.n_artificial > 0
    }

    pub(crate) fn z_row(&self) -> usize {
        self.num_constraints()
    }

    pub(crate) fn w_row(&self) -> usize {
        debug_assert!(self.has_w_row);
        self.rows.len() - 1
    }

    pub(crate) fn rhs(&self, row: usize) -> f64 {
        self.rows[row][self.rhs_col()]
    }

    /// Objective value cell of the z row.
    pub(crate) fn z_value(&self) -> f64 {
        self.rhs(self.z_row())
    }

    /// Auxiliary objective value; must be driven to zero for feasibility.
    pub(crate) fn w_value(&self) -> f64 {
        self.rhs(self.w_row())
    }

    pub(crate) fn basis(&self) -> &[usize] {
        &self.basis
    }

    #[cfg(test)]
    pub(crate) fn non_basis(&self) -> &[usize] {
        &self.non_basis
    }

    pub(crate) fn snapshot(&self) -> TableauSnapshot {
        TableauSnapshot {
            rows: self.rows.clone(),
            basis: self.basis.clone(),
        }
    }

    /// Dantzig's rule: most negative coefficient of the given objective
    /// row among columns `0..limit`, first index on ties. `None` means no
    /// improving column remains. With `blands` set, picks the lowest
    /// negative index instead.
    pub(crate) fn entering_column(
        &self,
        objective_row: usize,
        limit: usize,
        tolerance: f64,
        blands: bool,
    ) -> Option<usize> {
        let row = &self.rows[objective_row];
        if blands {
            return (0..limit).find(|&j| row[j] < -tolerance);
        }
        let mut best = -tolerance;
        let mut best_col = None;
        for j in 0..limit {
            if row[j] < best {
                best = row[j];
                best_col = Some(j);
            }
        }
        best_col
    }

    /// Minimum-ratio test over the constraint rows. `None` means no row
    /// has a positive coefficient in the entering column: unbounded.
    pub(crate) fn leaving_row(&self, entering: usize, tolerance: f64) -> Option<usize> {
        let rhs = self.rhs_col();
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;
        for i in 0..self.num_constraints() {
            let coef = self.rows[i][entering];
            if coef > tolerance {
                let ratio = self.rows[i][rhs] / coef;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }
        min_row
    }

    /// Exchanges the basis: column `entering` becomes the unit vector for
    /// `row`, every other row (objective rows included) is eliminated.
    /// Returns the displaced variable.
    pub(crate) fn pivot(&mut self, row: usize, entering: usize) -> usize {
        let pivot = self.rows[row][entering];
        for v in &mut self.rows[row] {
            *v /= pivot;
        }

        let pivot_row = self.rows[row].clone();
        for (i, other) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = other[entering];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in other.iter_mut().zip(&pivot_row) {
                *v -= factor * p;
            }
        }

        let leaving = self.basis[row];
        self.basis[row] = entering;
        if let Some(pos) = self.non_basis.iter().position(|&v| v == entering) {
            self.non_basis.remove(pos);
        }
        self.non_basis.push(leaving);
        self.non_basis.sort_unstable();
        leaving
    }

    /// Ends Phase I: the w row goes away. Artificial columns stay in the
    /// buffer but are excluded from entering selection from here on.
    pub(crate) fn drop_w_row(&mut self) {
        debug_assert!(self.has_w_row);
        self.rows.pop();
        self.has_w_row = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ConstraintOp;

    fn mixed_problem() -> LpProblem {
        // max 2x1 + 3x2
        //   x1 + x2  = 10
        //   x1      <= 6
        //        x2 <= 8
        let mut problem = LpProblem::new(vec!["x1".to_string(), "x2".to_string()]);
        problem.set_objective(vec![2.0, 3.0], false);
        problem.add_constraint("c1", vec![1.0, 1.0], ConstraintOp::Eq, 10.0);
        problem.add_constraint("c2", vec![1.0, 0.0], ConstraintOp::Le, 6.0);
        problem.add_constraint("c3", vec![0.0, 1.0], ConstraintOp::Le, 8.0);
        problem
    }

    #[test]
    fn construction_layout() {
        // Columns: x1 x2 | s1 s2 | a1 | rhs
        let tableau = Tableau::build(&mixed_problem());
        assert_eq!(tableau.rhs_col(), 5);
        assert_eq!(tableau.artificial_start(), 4);
        assert!(tableau.has_artificials());
        assert_eq!(tableau.basis(), &[4, 2, 3]);
        assert_eq!(tableau.non_basis(), &[0, 1]);

        let snap = tableau.snapshot();
        assert_eq!(snap.rows[0], vec![1.0, 1.0, 0.0, 0.0, 1.0, 10.0]);
        assert_eq!(snap.rows[1], vec![1.0, 0.0, 1.0, 0.0, 0.0, 6.0]);
        assert_eq!(snap.rows[2], vec![0.0, 1.0, 0.0, 1.0, 0.0, 8.0]);
        // z row is the negated objective
        assert_eq!(snap.rows[3], vec![-2.0, -3.0, 0.0, 0.0, 0.0, 0.0]);
        // w row is the artificial indicator minus its owning row
        assert_eq!(snap.rows[4], vec![-1.0, -1.0, 0.0, 0.0, 0.0, -10.0]);
    }

    #[test]
    fn surplus_and_artificial_for_ge() {
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0], false);
        problem.add_constraint("c1", vec![1.0], ConstraintOp::Ge, 2.0);

        let tableau = Tableau::build(&problem);
        let snap = tableau.snapshot();
        // Columns: x | surplus | artificial | rhs
        assert_eq!(snap.rows[0], vec![1.0, -1.0, 1.0, 2.0]);
        assert_eq!(tableau.basis(), &[2]);
    }

    #[test]
    fn pivot_keeps_basis_partition_and_unit_column() {
        let mut tableau = Tableau::build(&mixed_problem());
        let rhs = tableau.rhs_col();

        let entering = tableau
            .entering_column(tableau.w_row(), rhs, 1e-9, false)
            .unwrap();
        let row = tableau.leaving_row(entering, 1e-9).unwrap();
        let leaving = tableau.pivot(row, entering);

        // Entering column is now a unit vector across all rows.
        let snap = tableau.snapshot();
        for (i, r) in snap.rows.iter().enumerate() {
            let expected = if i == row { 1.0 } else { 0.0 };
            assert!((r[entering] - expected).abs() < 1e-12);
        }

        // basis and non_basis partition the non-RHS columns.
        let mut all: Vec<usize> = tableau
            .basis()
            .iter()
            .chain(tableau.non_basis())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..rhs).collect::<Vec<_>>());
        assert!(tableau.non_basis().contains(&leaving));
        assert!(tableau.non_basis().is_sorted());
    }

    #[test]
    fn entering_prefers_most_negative_then_lowest_index() {
        let mut problem = LpProblem::new(vec!["a".to_string(), "b".to_string()]);
        problem.set_objective(vec![2.0, 3.0], false);
        problem.add_constraint("c1", vec![1.0, 1.0], ConstraintOp::Le, 1.0);
        let tableau = Tableau::build(&problem);
        // z = [-2, -3, ...]: column 1 is the most negative
        assert_eq!(
            tableau.entering_column(tableau.z_row(), tableau.rhs_col(), 1e-9, false),
            Some(1)
        );
        // Bland's rule takes the first negative index instead
        assert_eq!(
            tableau.entering_column(tableau.z_row(), tableau.rhs_col(), 1e-9, true),
            Some(0)
        );
    }

    #[test]
    fn leaving_row_is_minimum_ratio() {
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0], false);
        problem.add_constraint("c1", vec![1.0], ConstraintOp::Le, 9.0);
        problem.add_constraint("c2", vec![3.0], ConstraintOp::Le, 6.0);
        let tableau = Tableau::build(&problem);
        // Ratios: 9/1 = 9 vs 6/3 = 2
        assert_eq!(tableau.leaving_row(0, 1e-9), Some(1));
    }

    #[test]
    fn leaving_row_none_when_no_positive_entry() {
        let mut problem = LpProblem::new(vec!["x".to_string()]);
        problem.set_objective(vec![1.0], false);
        problem.add_constraint("c1", vec![-1.0], ConstraintOp::Le, 4.0);
        let tableau = Tableau::build(&problem);
        assert_eq!(tableau.leaving_row(0, 1e-9), None);
    }
}
