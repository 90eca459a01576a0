//! Complementarity enforcement strategies.
//!
//! The reformulator hands every strategy the same flat list of `(u, v)`
//! pairs, each meaning `u·v = 0` with `u, v >= 0`. How that condition is
//! encoded in the model is the strategy's business; new encodings implement
//! [`ComplementarityStrategy`] without touching the KKT assembly.

use strata_core::{Model, ModelError, Variable};
use strata_expr::ids::VariableId;
use strata_expr::Expr;

use crate::error::BuildError;

/// A complementarity encoding over pairs of nonnegative variables.
pub trait ComplementarityStrategy {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Encode `u·v = 0` for every `(u, v)` pair.
    fn enforce(
        &self,
        model: &mut Model,
        pairs: &[(VariableId, VariableId)],
    ) -> Result<(), BuildError>;
}

/// Type-1 special-ordered-set encoding: each pair becomes a SOS1 set, so at
/// most one of the two variables may be nonzero.
///
/// Exact for the LP case and needs no extra bounds or binaries, but the
/// backend must support the SOS1 construct.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sos1;

impl ComplementarityStrategy for Sos1 {
    fn name(&self) -> &'static str {
        "sos1"
    }

    fn enforce(
        &self,
        model: &mut Model,
        pairs: &[(VariableId, VariableId)],
    ) -> Result<(), BuildError> {
        for &(u, v) in pairs {
            model.add_sos1(vec![u, v])?;
        }
        tracing::debug!(
            component = "kkt",
            operation = "enforce_complementarity",
            status = "success",
            strategy = self.name(),
            pairs = pairs.len(),
            "Declared SOS1 pairs"
        );
        Ok(())
    }
}

/// Big-M binary-disjunction encoding: one binary indicator `z` per pair with
/// `u <= M·z` and `v <= M·(1 - z)`.
///
/// `M` must be large enough that no feasible value of `u` or `v` is cut off;
/// too small an `M` silently changes the feasible region, which is the
/// caller's risk to manage.
#[derive(Debug, Clone, Copy)]
pub struct BigM {
    big_m: f64,
}

impl BigM {
    pub fn new(big_m: f64) -> Self {
        Self { big_m }
    }

    pub fn big_m(&self) -> f64 {
        self.big_m
    }
}

impl ComplementarityStrategy for BigM {
    fn name(&self) -> &'static str {
        "big_m"
    }

    fn enforce(
        &self,
        model: &mut Model,
        pairs: &[(VariableId, VariableId)],
    ) -> Result<(), BuildError> {
        if !self.big_m.is_finite() || self.big_m <= 0.0 {
            return Err(BuildError::InvalidBigM { big_m: self.big_m });
        }

        for (k, &(u, v)) in pairs.iter().enumerate() {
            let z = model.add_variable(Variable::binary())?;
            model.set_variable_name(z, format!("comp:ind[{k}]"))?;

            // u - M·z <= 0
            let row = Expr::from_linear(vec![(u, 1.0), (z, -self.big_m)]);
            model.add_constraint_expr(row.le_scalar(0.0))?;
            // v + M·z <= M
            let row = Expr::from_linear(vec![(v, 1.0), (z, self.big_m)]);
            model.add_constraint_expr(row.le_scalar(self.big_m))?;
        }
        tracing::debug!(
            component = "kkt",
            operation = "enforce_complementarity",
            status = "success",
            strategy = self.name(),
            big_m = self.big_m,
            pairs = pairs.len(),
            "Added big-M disjunctions"
        );
        Ok(())
    }
}

/// Direct bilinear encoding: `u·v = 0` as a literal product constraint.
///
/// Only meaningful for backends accepting nonconvex quadratic rows. The
/// strata model stores linear rows, so enforcement fails fast with
/// [`BuildError::UnsupportedComplementarityMethod`] before mutating anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bilinear;

impl ComplementarityStrategy for Bilinear {
    fn name(&self) -> &'static str {
        "bilinear"
    }

    fn enforce(
        &self,
        model: &mut Model,
        pairs: &[(VariableId, VariableId)],
    ) -> Result<(), BuildError> {
        for &(u, v) in pairs {
            let product = Expr::bilinear(u, v, 1.0);
            model
                .add_constraint_expr(product.eq_scalar(0.0))
                .map_err(|err| match err {
                    ModelError::NonlinearConstraint { .. } => {
                        BuildError::UnsupportedComplementarityMethod {
                            method: self.name(),
                        }
                    }
                    other => BuildError::Model(other),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use strata_core::Bounds;

    fn model_with_pair() -> (Model, VariableId, VariableId) {
        let mut model = Model::new();
        let u = model.add_variable(Variable::nonnegative()).unwrap();
        let v = model.add_variable(Variable::nonnegative()).unwrap();
        (model, u, v)
    }

    #[test]
    fn sos1_declares_one_set_per_pair() {
        let (mut model, u, v) = model_with_pair();
        Sos1.enforce(&mut model, &[(u, v)]).unwrap();

        assert_eq!(model.num_sos1_sets(), 1);
        let (_, members) = model.sos1_sets().next().unwrap();
        assert_eq!(members, &vec![u, v]);
    }

    #[test]
    fn big_m_adds_indicator_and_two_rows_per_pair() {
        let (mut model, u, v) = model_with_pair();
        BigM::new(100.0).enforce(&mut model, &[(u, v)]).unwrap();

        assert_eq!(model.num_variables(), 3);
        assert_eq!(model.num_constraints(), 2);

        let z = model.get_variable_by_name("comp:ind[0]").unwrap();
        assert!(model.get_variable(z).unwrap().is_integer);
        assert_eq!(model.get_variable(z).unwrap().bounds, Bounds::new(0.0, 1.0));

        let mut rows = model.constraint_ids();
        let first = rows.next().unwrap();
        let second = rows.next().unwrap();

        // u - M·z <= 0
        assert_eq!(model.coefficient(u, first), 1.0);
        assert_eq!(model.coefficient(z, first), -100.0);
        assert_eq!(model.get_constraint(first).unwrap().bounds.upper, 0.0);
        // v + M·z <= M
        assert_eq!(model.coefficient(v, second), 1.0);
        assert_eq!(model.coefficient(z, second), 100.0);
        assert_eq!(model.get_constraint(second).unwrap().bounds.upper, 100.0);
    }

    #[test]
    fn big_m_rejects_bad_constants() {
        let (mut model, u, v) = model_with_pair();

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = BigM::new(bad).enforce(&mut model, &[(u, v)]).unwrap_err();
            assert_eq!(err.code(), "KKT_INVALID_BIG_M");
        }
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn bilinear_is_unsupported_on_linear_models() {
        let (mut model, u, v) = model_with_pair();

        let err = Bilinear.enforce(&mut model, &[(u, v)]).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedComplementarityMethod { method: "bilinear" }
        );
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn empty_pair_list_is_a_no_op() {
        let (mut model, _, _) = model_with_pair();
        Sos1.enforce(&mut model, &[]).unwrap();
        BigM::new(1.0).enforce(&mut model, &[]).unwrap();
        Bilinear.enforce(&mut model, &[]).unwrap();
        assert_eq!(model.num_constraints(), 0);
        assert_eq!(model.num_sos1_sets(), 0);
    }
}
