//! Upper-level block: decision variables, feasibility rows, and objective.

use strata_core::{Bounds, Model, Variable};
use strata_expr::ids::VariableId;
use strata_expr::Expr;

use crate::error::BuildError;
use crate::problem::ProblemData;

/// Handles to the decision variables created by [`build_upper`].
#[derive(Debug, Clone)]
pub struct UpperLevelVariables {
    /// Upper-level decisions `x`, box-bounded and integer where declared.
    pub x: Vec<VariableId>,
    /// Lower-level responses `y`, created free; lower bounds are applied by
    /// the lower-level reformulation, which knows the `yl` flags.
    pub y: Vec<VariableId>,
}

/// Create `x` and `y`, add `G·x + H·y <= q`, and set `min cx·x + cy·y`.
///
/// `y` gets no bounds here: whether `y[j]` is bounded below is a
/// lower-level fact.
pub fn build_upper(
    model: &mut Model,
    problem: &ProblemData,
) -> Result<UpperLevelVariables, BuildError> {
    problem.validate()?;

    let mut x = Vec::with_capacity(problem.nu);
    for j in 0..problem.nu {
        let bounds = Bounds::new(problem.xl[j], problem.xu[j]);
        let variable = if problem.jx.contains(&j) {
            Variable::integer(bounds)
        } else {
            Variable::continuous(bounds)
        };
        let id = model.add_variable(variable)?;
        model.set_variable_name(id, format!("x[{j}]"))?;
        x.push(id);
    }

    let mut y = Vec::with_capacity(problem.nl);
    for j in 0..problem.nl {
        let id = model.add_variable(Variable::free())?;
        model.set_variable_name(id, format!("y[{j}]"))?;
        y.push(id);
    }

    for i in 0..problem.mu {
        let mut terms = Vec::with_capacity(problem.nu + problem.nl);
        for (j, &var_id) in x.iter().enumerate() {
            terms.push((var_id, problem.g[i][j]));
        }
        for (j, &var_id) in y.iter().enumerate() {
            terms.push((var_id, problem.h[i][j]));
        }
        let row = Expr::from_linear(terms);
        let constraint_id = model.add_constraint_expr(row.le_scalar(problem.q[i]))?;
        model.set_constraint_name(constraint_id, format!("upper[{i}]"))?;
    }

    let mut objective = Vec::with_capacity(problem.nu + problem.nl);
    for (j, &var_id) in x.iter().enumerate() {
        objective.push((var_id, problem.cx[j]));
    }
    for (j, &var_id) in y.iter().enumerate() {
        objective.push((var_id, problem.cy[j]));
    }
    model.minimize(Expr::from_linear(objective))?;

    tracing::debug!(
        component = "kkt",
        operation = "build_upper",
        status = "success",
        x_vars = problem.nu,
        y_vars = problem.nl,
        rows = problem.mu,
        "Built upper-level block"
    );

    Ok(UpperLevelVariables { x, y })
}
