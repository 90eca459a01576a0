//! Point evaluation against the stored model.
//!
//! These read-only checks let callers (and tests) verify a candidate
//! assignment against bounds, rows, integrality, and SOS1 sets without
//! involving a solver.

use std::collections::BTreeMap;

use strata_expr::ids::{ConstraintId, VariableId};

use crate::model::error::ModelError;
use crate::model::Model;

impl Model {
    /// Row activity (the constraint LHS) at the given point.
    ///
    /// Every variable with a coefficient in the row must have a value.
    pub fn constraint_activity(
        &self,
        id: ConstraintId,
        point: &BTreeMap<VariableId, f64>,
    ) -> Result<f64, ModelError> {
        let row = self.constraint_row(id)?;
        let mut activity = 0.0;
        for (var_id, coeff) in row {
            let value = point
                .get(&var_id)
                .copied()
                .ok_or(ModelError::UnvaluedVariable(var_id))?;
            activity += coeff * value;
        }
        Ok(activity)
    }

    /// Check a complete assignment against bounds, rows, integrality, and
    /// SOS1 sets, within an absolute tolerance.
    ///
    /// Every variable in the model must have a value in `point`.
    pub fn point_is_feasible(
        &self,
        point: &BTreeMap<VariableId, f64>,
        tol: f64,
    ) -> Result<bool, ModelError> {
        for (var_id, variable) in &self.variables {
            let value = point
                .get(var_id)
                .copied()
                .ok_or(ModelError::UnvaluedVariable(*var_id))?;
            if value < variable.bounds.lower - tol || value > variable.bounds.upper + tol {
                return Ok(false);
            }
            if variable.is_integer && (value - value.round()).abs() > tol {
                return Ok(false);
            }
        }

        for (constraint_id, constraint) in &self.constraints {
            let activity = self.constraint_activity(*constraint_id, point)?;
            if activity < constraint.bounds.lower - tol || activity > constraint.bounds.upper + tol
            {
                return Ok(false);
            }
        }

        for members in self.sos1_sets.values() {
            let nonzero = members
                .iter()
                .filter(|var_id| {
                    point
                        .get(var_id)
                        .map(|value| value.abs() > tol)
                        .unwrap_or(false)
                })
                .count();
            if nonzero > 1 {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Variable};
    use strata_expr::Expr;

    const TOL: f64 = 1e-9;

    fn point(entries: &[(VariableId, f64)]) -> BTreeMap<VariableId, f64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn activity_sums_row_terms() {
        let mut model = Model::new();
        let v1 = model.add_variable(Variable::nonnegative()).unwrap();
        let v2 = model.add_variable(Variable::nonnegative()).unwrap();
        let c = model
            .add_expr_constraint(
                Expr::from_linear(vec![(v1, 2.0), (v2, -1.0)]),
                Bounds::new(f64::NEG_INFINITY, 4.0),
            )
            .unwrap();

        let activity = model
            .constraint_activity(c, &point(&[(v1, 3.0), (v2, 1.0)]))
            .unwrap();
        assert_eq!(activity, 5.0);
    }

    #[test]
    fn feasibility_checks_bounds_rows_and_sos() {
        let mut model = Model::new();
        let u = model.add_variable(Variable::nonnegative()).unwrap();
        let v = model.add_variable(Variable::nonnegative()).unwrap();
        model
            .add_expr_constraint(
                Expr::from_linear(vec![(u, 1.0), (v, 1.0)]),
                Bounds::new(f64::NEG_INFINITY, 10.0),
            )
            .unwrap();
        model.add_sos1(vec![u, v]).unwrap();

        assert!(model
            .point_is_feasible(&point(&[(u, 2.0), (v, 0.0)]), TOL)
            .unwrap());
        // both SOS members nonzero
        assert!(!model
            .point_is_feasible(&point(&[(u, 2.0), (v, 1.0)]), TOL)
            .unwrap());
        // bound violation
        assert!(!model
            .point_is_feasible(&point(&[(u, -1.0), (v, 0.0)]), TOL)
            .unwrap());
        // row violation
        assert!(!model
            .point_is_feasible(&point(&[(u, 11.0), (v, 0.0)]), TOL)
            .unwrap());
    }

    #[test]
    fn integrality_is_checked() {
        let mut model = Model::new();
        let z = model.add_variable(Variable::binary()).unwrap();

        assert!(model.point_is_feasible(&point(&[(z, 1.0)]), TOL).unwrap());
        assert!(!model.point_is_feasible(&point(&[(z, 0.5)]), TOL).unwrap());
    }

    #[test]
    fn missing_value_is_an_error() {
        let mut model = Model::new();
        let v = model.add_variable(Variable::nonnegative()).unwrap();

        let result = model.point_is_feasible(&BTreeMap::new(), TOL);
        assert_eq!(result, Err(ModelError::UnvaluedVariable(v)));
    }
}
