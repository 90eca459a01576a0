//! Static description of a bilevel linear program.

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Immutable data of a bilevel linear program.
///
/// The upper level chooses `x` (box-bounded, optionally integer) and the
/// lower level responds with `y`:
///
/// ```text
/// min  cx·x + cy·y
/// s.t. G·x + H·y <= q
///      xl <= x <= xu,  x[j] integer for j in jx
///      y solves:  min  d·y + xᵀ·F·y
///                 s.t. A·x + B·y <= b_rhs
///                      y[j] >= 0 for j with yl[j]
/// ```
///
/// Matrices are dense row-major (`Vec` of rows). `F` couples `x` to the
/// lower-level objective, so its shape is `nu x nl`; its transpose enters
/// the stationarity system `d + Fᵀ·x + Bᵀ·λ - σ = 0`.
///
/// The struct is constructed once by the caller and treated as read-only by
/// every builder; [`ProblemData::validate`] runs before any model mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemData {
    /// Upper-level variable count.
    pub nu: usize,
    /// Lower-level variable count.
    pub nl: usize,
    /// Upper-level constraint count.
    pub mu: usize,
    /// Lower-level constraint count.
    pub ml: usize,

    /// Upper constraints, `x` block (`mu x nu`).
    pub g: Vec<Vec<f64>>,
    /// Upper constraints, `y` block (`mu x nl`).
    pub h: Vec<Vec<f64>>,
    /// Upper constraint right-hand sides (length `mu`).
    pub q: Vec<f64>,
    /// Objective coefficients on `x` (length `nu`).
    pub cx: Vec<f64>,
    /// Objective coefficients on `y` (length `nl`).
    pub cy: Vec<f64>,
    /// Lower box bounds on `x` (length `nu`).
    pub xl: Vec<f64>,
    /// Upper box bounds on `x` (length `nu`).
    pub xu: Vec<f64>,
    /// Zero-based indices of integer-restricted `x` entries.
    pub jx: Vec<usize>,

    /// Lower constraints, `x` block (`ml x nu`).
    pub a: Vec<Vec<f64>>,
    /// Lower constraints, `y` block (`ml x nl`).
    pub b: Vec<Vec<f64>>,
    /// Lower constraint right-hand sides (length `ml`).
    pub b_rhs: Vec<f64>,
    /// Lower objective linear coefficients on `y` (length `nl`).
    pub d: Vec<f64>,
    /// Cross-term matrix of the lower objective `xᵀ·F·y` (`nu x nl`).
    pub f: Vec<Vec<f64>>,
    /// Per lower variable: `true` = restricted to `y[j] >= 0`, `false` = free.
    pub yl: Vec<bool>,
}

fn check_vector(field: &'static str, values: &[f64], expected: usize) -> Result<(), BuildError> {
    if values.len() != expected {
        return Err(BuildError::DimensionMismatch {
            field,
            expected,
            found: values.len(),
        });
    }
    Ok(())
}

fn check_matrix(
    rows_field: &'static str,
    width_field: &'static str,
    matrix: &[Vec<f64>],
    rows: usize,
    cols: usize,
) -> Result<(), BuildError> {
    if matrix.len() != rows {
        return Err(BuildError::DimensionMismatch {
            field: rows_field,
            expected: rows,
            found: matrix.len(),
        });
    }
    for row in matrix {
        if row.len() != cols {
            return Err(BuildError::DimensionMismatch {
                field: width_field,
                expected: cols,
                found: row.len(),
            });
        }
    }
    Ok(())
}

impl ProblemData {
    /// Check every shape against the declared sizes.
    ///
    /// Builders call this before creating any variable or constraint, so a
    /// rejected instance leaves the target model untouched.
    pub fn validate(&self) -> Result<(), BuildError> {
        check_matrix("g (rows)", "g (row width)", &self.g, self.mu, self.nu)?;
        check_matrix("h (rows)", "h (row width)", &self.h, self.mu, self.nl)?;
        check_vector("q", &self.q, self.mu)?;
        check_vector("cx", &self.cx, self.nu)?;
        check_vector("cy", &self.cy, self.nl)?;
        check_vector("xl", &self.xl, self.nu)?;
        check_vector("xu", &self.xu, self.nu)?;

        check_matrix("a (rows)", "a (row width)", &self.a, self.ml, self.nu)?;
        check_matrix("b (rows)", "b (row width)", &self.b, self.ml, self.nl)?;
        check_vector("b_rhs", &self.b_rhs, self.ml)?;
        check_vector("d", &self.d, self.nl)?;
        check_matrix("f (rows)", "f (row width)", &self.f, self.nu, self.nl)?;
        if self.yl.len() != self.nl {
            return Err(BuildError::DimensionMismatch {
                field: "yl",
                expected: self.nl,
                found: self.yl.len(),
            });
        }

        for &index in &self.jx {
            if index >= self.nu {
                return Err(BuildError::InvalidIndex {
                    field: "jx",
                    index,
                    len: self.nu,
                });
            }
        }

        for j in 0..self.nu {
            let (lower, upper) = (self.xl[j], self.xu[j]);
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(BuildError::BoundInconsistency {
                    index: j,
                    lower,
                    upper,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_problem() -> ProblemData {
        // nu=2, nl=2, mu=1, ml=2
        ProblemData {
            nu: 2,
            nl: 2,
            mu: 1,
            ml: 2,
            g: vec![vec![1.0, 0.0]],
            h: vec![vec![0.0, 1.0]],
            q: vec![10.0],
            cx: vec![1.0, 2.0],
            cy: vec![3.0, 0.0],
            xl: vec![0.0, 0.0],
            xu: vec![5.0, 5.0],
            jx: vec![0],
            a: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            b: vec![vec![-1.0, 0.0], vec![0.0, -1.0]],
            b_rhs: vec![0.0, 0.0],
            d: vec![1.0, 1.0],
            f: vec![vec![0.0, 0.0], vec![0.0, 0.0]],
            yl: vec![true, true],
        }
    }

    #[test]
    fn valid_problem_passes() {
        small_problem().validate().unwrap();
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let mut problem = small_problem();
        problem.g.push(vec![0.0, 0.0]);
        let err = problem.validate().unwrap_err();
        assert_eq!(
            err,
            BuildError::DimensionMismatch {
                field: "g (rows)",
                expected: 1,
                found: 2,
            }
        );
    }

    #[test]
    fn ragged_row_is_rejected() {
        let mut problem = small_problem();
        problem.b[1] = vec![0.0];
        let err = problem.validate().unwrap_err();
        assert_eq!(
            err,
            BuildError::DimensionMismatch {
                field: "b (row width)",
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn integer_index_out_of_range() {
        let mut problem = small_problem();
        problem.jx = vec![2];
        let err = problem.validate().unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidIndex {
                field: "jx",
                index: 2,
                len: 2,
            }
        );
    }

    #[test]
    fn crossed_box_bounds_are_rejected() {
        let mut problem = small_problem();
        problem.xl[1] = 6.0;
        let err = problem.validate().unwrap_err();
        assert!(matches!(
            err,
            BuildError::BoundInconsistency { index: 1, .. }
        ));
    }

    #[test]
    fn nan_bound_is_inconsistent() {
        let mut problem = small_problem();
        problem.xu[0] = f64::NAN;
        assert!(matches!(
            problem.validate().unwrap_err(),
            BuildError::BoundInconsistency { index: 0, .. }
        ));
    }

    #[test]
    fn yl_length_must_match() {
        let mut problem = small_problem();
        problem.yl = vec![true];
        assert!(matches!(
            problem.validate().unwrap_err(),
            BuildError::DimensionMismatch { field: "yl", .. }
        ));
    }

    #[test]
    fn cross_term_matrix_is_nu_by_nl() {
        let mut problem = small_problem();
        problem.f = vec![vec![0.0, 0.0]];
        assert!(matches!(
            problem.validate().unwrap_err(),
            BuildError::DimensionMismatch {
                field: "f (rows)",
                ..
            }
        ));
    }

    #[test]
    fn empty_upper_constraint_block_is_valid() {
        let mut problem = small_problem();
        problem.mu = 0;
        problem.g = Vec::new();
        problem.h = Vec::new();
        problem.q = Vec::new();
        problem.validate().unwrap();
    }
}
