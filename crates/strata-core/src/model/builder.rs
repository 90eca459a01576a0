//! Model builder methods for adding variables, constraints, SOS1 sets, and objectives.

use crate::types::{Bounds, Constraint, Objective, Sense, Variable};
use strata_expr::expr::{ComparisonSense, ConstraintExpr, Expr};
use strata_expr::ids::{ConstraintId, SosId, VariableId};

use crate::model::error::ModelError;
use crate::model::Model;

fn bounds_are_invalid(bounds: &Bounds) -> bool {
    bounds.lower.is_nan() || bounds.upper.is_nan() || bounds.lower > bounds.upper
}

impl Model {
    /// Add a variable to the model.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if bounds_are_invalid(&variable.bounds) {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }

        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;
        self.variables.insert(id, variable);

        Ok(id)
    }

    /// Replace the bounds of an existing variable.
    pub fn set_variable_bounds(
        &mut self,
        id: VariableId,
        bounds: Bounds,
    ) -> Result<(), ModelError> {
        if bounds_are_invalid(&bounds) {
            return Err(ModelError::InvalidVariableBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        let variable = self
            .variables
            .get_mut(&id)
            .ok_or(ModelError::InvalidVariableId(id))?;
        variable.bounds = bounds;
        Ok(())
    }

    /// Add a constraint to the model.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        if bounds_are_invalid(&constraint.bounds) {
            return Err(ModelError::InvalidConstraintBounds {
                lower: constraint.bounds.lower,
                upper: constraint.bounds.upper,
            });
        }

        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.insert(id, constraint);

        Ok(id)
    }

    /// Set the objective function.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let sense = objective.sense.ok_or(ModelError::NoObjective)?;
        for (var_id, coeff) in &objective.terms {
            self.ensure_variable_exists(*var_id)?;
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient {
                    coefficient: *coeff,
                });
            }
        }

        let normalized = self.normalize_terms(objective.terms);
        self.objective = Objective {
            sense: Some(sense),
            terms: normalized,
        };
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = ?sense,
            terms = self.objective.terms.len(),
            "Set objective function"
        );
        Ok(())
    }

    /// Minimize a linear expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective {
            sense: Some(Sense::Minimize),
            terms: expr.into_linear_terms(),
        })
    }

    /// Maximize a linear expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective {
            sense: Some(Sense::Maximize),
            terms: expr.into_linear_terms(),
        })
    }

    /// Add a constraint from an expression and explicit bounds.
    ///
    /// The expression must be linear; rows are stored as linear columns only.
    pub fn add_expr_constraint(
        &mut self,
        expr: Expr,
        bounds: Bounds,
    ) -> Result<ConstraintId, ModelError> {
        if expr.degree() > 1 {
            return Err(ModelError::NonlinearConstraint {
                degree: expr.degree(),
            });
        }
        let constraint_id = self.add_constraint(Constraint { bounds })?;
        for (var_id, coeff) in self.normalize_terms(expr.into_linear_terms()) {
            self.set_coefficient(var_id, constraint_id, coeff)?;
        }
        Ok(constraint_id)
    }

    /// Add a constraint from a comparison expression (e.g., `x + y <= 10`).
    pub fn add_constraint_expr(
        &mut self,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = constraint.into_parts();
        let bounds = match sense {
            ComparisonSense::LessEqual => Bounds::new(f64::NEG_INFINITY, rhs),
            ComparisonSense::GreaterEqual => Bounds::new(rhs, f64::INFINITY),
            ComparisonSense::Equal => Bounds::new(rhs, rhs),
        };
        self.add_expr_constraint(expr, bounds)
    }

    /// Add a coefficient to the constraint matrix.
    ///
    /// This adds a coefficient at the intersection of a variable column and constraint row.
    /// Returns an error if the variable or constraint IDs are invalid.
    pub fn set_coefficient(
        &mut self,
        var_id: VariableId,
        constraint_id: ConstraintId,
        coefficient: f64,
    ) -> Result<(), ModelError> {
        if !coefficient.is_finite() {
            return Err(ModelError::InvalidCoefficient { coefficient });
        }
        self.ensure_variable_exists(var_id)?;
        self.ensure_constraint_exists(constraint_id)?;

        let column = self.columns.entry(var_id).or_default();
        match column.iter_mut().find(|(cid, _)| *cid == constraint_id) {
            Some((_, existing)) => *existing = coefficient,
            None => column.push((constraint_id, coefficient)),
        }

        Ok(())
    }

    /// Declare a type-1 special-ordered set: at most one member may be nonzero.
    ///
    /// Members must be distinct existing variables; at least two are required.
    pub fn add_sos1(&mut self, members: Vec<VariableId>) -> Result<SosId, ModelError> {
        if members.len() < 2 {
            return Err(ModelError::SosTooFewMembers {
                len: members.len(),
            });
        }
        for (pos, var_id) in members.iter().enumerate() {
            self.ensure_variable_exists(*var_id)?;
            if members[..pos].contains(var_id) {
                return Err(ModelError::SosDuplicateMember(*var_id));
            }
        }

        let id = SosId::new(self.next_sos_id);
        self.next_sos_id += 1;
        tracing::debug!(
            component = "model",
            operation = "add_sos1",
            status = "success",
            sos_id = id.inner(),
            members = members.len(),
            "Declared SOS1 set"
        );
        self.sos1_sets.insert(id, members);

        Ok(id)
    }
}
