//! Dense linear-system solving by Gauss-Jordan elimination with partial
//! pivoting. Small companion to the simplex solver for square systems.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EliminationError {
    #[error("matrix has {rows} rows but right-hand side has {rhs} entries")]
    DimensionMismatch { rows: usize, rhs: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("matrix is singular (no usable pivot in column {column})")]
    SingularMatrix { column: usize },
}

const PIVOT_TOL: f64 = 1e-12;

/// Solves `a * x = b` for a square matrix `a`.
///
/// Rows are swapped so the largest remaining absolute value sits on the
/// diagonal before each elimination step. Inputs are copied; the caller's
/// data is never mutated.
pub fn solve_system(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, EliminationError> {
    let n = a.len();
    if b.len() != n {
        return Err(EliminationError::DimensionMismatch {
            rows: n,
            rhs: b.len(),
        });
    }
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(EliminationError::RaggedMatrix {
                row: i,
                expected: n,
                found: row.len(),
            });
        }
    }

    let mut m: Vec<Vec<f64>> = a.to_vec();
    let mut rhs = b.to_vec();

    for col in 0..n {
        let mut pivot_row = col;
        for i in col + 1..n {
            if m[i][col].abs() > m[pivot_row][col].abs() {
                pivot_row = i;
            }
        }
        if m[pivot_row][col].abs() < PIVOT_TOL {
            return Err(EliminationError::SingularMatrix { column: col });
        }
        m.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        let pivot = m[col][col];
        for v in &mut m[col] {
            *v /= pivot;
        }
        rhs[col] /= pivot;

        let pivot_vals = m[col].clone();
        let pivot_rhs = rhs[col];
        for i in 0..n {
            if i == col {
                continue;
            }
            let factor = m[i][col];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in m[i].iter_mut().zip(&pivot_vals) {
                *v -= factor * p;
            }
            rhs[i] -= factor * pivot_rhs;
        }
    }

    Ok(rhs)
}
