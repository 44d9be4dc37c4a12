//! Line-oriented text format for LP problem files.
//!
//! Blank lines and lines starting with `//` are ignored. The first
//! significant line holds the objective coefficients, optionally prefixed
//! with `max` or `min` (default `max`). Each following line is one
//! constraint: coefficients, an operator (`<=`, `>=`, `=`), then the
//! right-hand side.
//!
//! ```text
//! // maximize 3x1 + 2x2
//! max 3 2
//! 1 1 <= 4
//! 1 3 <= 6
//! ```

use lintab_solver::{ConstraintOp, LpProblem};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("no objective line found")]
    MissingObjective,
    #[error("file defines an objective but no constraints")]
    NoConstraints,
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: missing constraint operator (one of <=, >=, =)")]
    MissingOperator { line: usize },
    #[error("line {line}: expected exactly one right-hand side value after the operator")]
    MalformedRhs { line: usize },
    #[error("line {line}: constraint has {found} coefficients, expected {expected}")]
    CoefficientCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Parses problem text into an [`LpProblem`] with synthesized variable
/// names `x1..xn` and constraint names `c1..cm`.
pub fn parse_problem(source: &str) -> Result<LpProblem, FormatError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with("//"));

    let (line, objective) = lines.next().ok_or(FormatError::MissingObjective)?;
    let mut tokens: Vec<&str> = objective.split_whitespace().collect();
    let minimize = match tokens.first() {
        Some(&"min") => {
            tokens.remove(0);
            true
        }
        Some(&"max") => {
            tokens.remove(0);
            false
        }
        _ => false,
    };
    let coefficients = parse_numbers(&tokens, line)?;
    if coefficients.is_empty() {
        return Err(FormatError::MissingObjective);
    }

    let n = coefficients.len();
    let variables = (1..=n).map(|i| format!("x{i}")).collect();
    let mut problem = LpProblem::new(variables);
    problem.set_objective(coefficients, minimize);

    let mut count = 0;
    for (line, text) in lines {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let op_idx = tokens
            .iter()
            .position(|t| matches!(*t, "<=" | ">=" | "="))
            .ok_or(FormatError::MissingOperator { line })?;
        let op = match tokens[op_idx] {
            "<=" => ConstraintOp::Le,
            ">=" => ConstraintOp::Ge,
            _ => ConstraintOp::Eq,
        };

        let coefficients = parse_numbers(&tokens[..op_idx], line)?;
        if coefficients.len() != n {
            return Err(FormatError::CoefficientCount {
                line,
                expected: n,
                found: coefficients.len(),
            });
        }

        let rest = &tokens[op_idx + 1..];
        if rest.len() != 1 {
            return Err(FormatError::MalformedRhs { line });
        }
        let rhs = rest[0].parse().map_err(|_| FormatError::InvalidNumber {
            line,
            token: rest[0].to_string(),
        })?;

        count += 1;
        problem.add_constraint(format!("c{count}"), coefficients, op, rhs);
    }

    if count == 0 {
        return Err(FormatError::NoConstraints);
    }
    Ok(problem)
}

fn parse_numbers(tokens: &[&str], line: usize) -> Result<Vec<f64>, FormatError> {
    tokens
        .iter()
        .map(|t| {
            t.parse().map_err(|_| FormatError::InvalidNumber {
                line,
                token: t.to_string(),
            })
        })
        .collect()
}
