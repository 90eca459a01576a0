//! Naming methods for variables and constraints.

use std::collections::BTreeMap;

use strata_expr::ids::{ConstraintId, VariableId};

use crate::model::error::ModelError;
use crate::model::Model;

impl Model {
    /// Set name for a variable.
    pub fn set_variable_name(&mut self, id: VariableId, name: String) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.variable_names
            .get_or_insert_with(BTreeMap::new)
            .insert(id, name);
        Ok(())
    }

    /// Get name for a variable.
    pub fn get_variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names
            .as_ref()
            .and_then(|names| names.get(&id).map(|s| s.as_str()))
    }

    /// Lookup a variable by name (first match in creation order).
    pub fn get_variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(id, value)| (value == name).then_some(*id))
        })
    }

    /// Set name for a constraint.
    pub fn set_constraint_name(
        &mut self,
        id: ConstraintId,
        name: String,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.constraint_names
            .get_or_insert_with(BTreeMap::new)
            .insert(id, name);
        Ok(())
    }

    /// Get name for a constraint.
    pub fn get_constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names
            .as_ref()
            .and_then(|names| names.get(&id).map(|s| s.as_str()))
    }

    /// Lookup a constraint by name (first match in creation order).
    pub fn get_constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(id, value)| (value == name).then_some(*id))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Model;
    use crate::types::Variable;

    #[test]
    fn variable_name_roundtrip() {
        let mut model = Model::new();
        let id = model.add_variable(Variable::nonnegative()).unwrap();

        assert!(model.get_variable_name(id).is_none());
        model.set_variable_name(id, "x[0]".to_string()).unwrap();
        assert_eq!(model.get_variable_name(id), Some("x[0]"));
        assert_eq!(model.get_variable_by_name("x[0]"), Some(id));
        assert_eq!(model.get_variable_by_name("x[1]"), None);
    }

    #[test]
    fn constraint_name_roundtrip() {
        let mut model = Model::new();
        let v = model.add_variable(Variable::nonnegative()).unwrap();
        let c = model
            .add_expr_constraint(
                strata_expr::Expr::term(v, 1.0),
                crate::types::Bounds::new(0.0, 1.0),
            )
            .unwrap();

        model
            .set_constraint_name(c, "upper[0]".to_string())
            .unwrap();
        assert_eq!(model.get_constraint_name(c), Some("upper[0]"));
        assert_eq!(model.get_constraint_by_name("upper[0]"), Some(c));
    }
}
