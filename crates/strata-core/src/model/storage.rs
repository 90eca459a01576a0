//! Storage access methods for the model.

use crate::types::{Constraint, Variable};
use strata_expr::ids::{ConstraintId, SosId, VariableId};

use super::error::ModelError;
use super::Model;

impl Model {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get the number of coefficients in the model.
    pub fn num_coefficients(&self) -> usize {
        self.columns.values().map(|coeffs| coeffs.len()).sum()
    }

    /// Get the number of SOS1 sets.
    pub fn num_sos1_sets(&self) -> usize {
        self.sos1_sets.len()
    }

    /// Get a variable by ID.
    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(&id)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Get a constraint by ID.
    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(&id)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Get the members of an SOS1 set.
    pub fn get_sos1(&self, id: SosId) -> Option<&[VariableId]> {
        self.sos1_sets.get(&id).map(|members| members.as_slice())
    }

    /// Iterate over all variable IDs in creation order.
    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variables.keys().copied()
    }

    /// Iterate over all constraint IDs in creation order.
    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.constraints.keys().copied()
    }

    /// Iterate over all SOS1 sets.
    pub fn sos1_sets(&self) -> impl Iterator<Item = (SosId, &Vec<VariableId>)> {
        self.sos1_sets.iter().map(|(&id, members)| (id, members))
    }

    /// Get the coefficients for a specific variable (column)
    pub fn get_column(&self, var_id: VariableId) -> Option<&Vec<(ConstraintId, f64)>> {
        self.columns.get(&var_id)
    }

    /// Get the coefficient matrix column-by-column.
    ///
    /// Returns an iterator over columns, where each column contains
    /// (constraint_id, coefficient) pairs.
    pub fn columns(&self) -> impl Iterator<Item = (VariableId, &Vec<(ConstraintId, f64)>)> {
        self.columns.iter().map(|(&vid, coeffs)| (vid, coeffs))
    }

    /// Gather a single constraint row from the column store.
    ///
    /// Returns (variable_id, coefficient) pairs in variable creation order.
    pub fn constraint_row(&self, id: ConstraintId) -> Result<Vec<(VariableId, f64)>, ModelError> {
        self.ensure_constraint_exists(id)?;
        let mut row = Vec::new();
        for (var_id, coeffs) in &self.columns {
            for (constraint_id, coeff) in coeffs {
                if *constraint_id == id {
                    row.push((*var_id, *coeff));
                }
            }
        }
        Ok(row)
    }

    /// The coefficient at a (variable, constraint) position, zero when absent.
    pub fn coefficient(&self, var_id: VariableId, constraint_id: ConstraintId) -> f64 {
        self.columns
            .get(&var_id)
            .and_then(|column| {
                column
                    .iter()
                    .find(|(cid, _)| *cid == constraint_id)
                    .map(|(_, coeff)| *coeff)
            })
            .unwrap_or(0.0)
    }
}
