//! Lower-level reformulation: primal feasibility with slacks, dual
//! feasibility, stationarity, and complementarity.
//!
//! The lower LP `min d·y + xᵀ·F·y s.t. A·x + B·y <= b, y[j] >= 0 where
//! flagged` is replaced by its KKT system: the slack-augmented primal rows
//! `A·x + B·y + s = b`, duals `λ >= 0` and bound duals `σ >= 0`, the
//! stationarity rows `d + Fᵀ·x + Bᵀ·λ - σ = 0`, and complementary slackness
//! on `(s, λ)` and `(y, σ)` delegated to a [`ComplementarityStrategy`].

use strata_core::{Bounds, Model, Variable};
use strata_expr::ids::VariableId;
use strata_expr::Expr;

use crate::complementarity::ComplementarityStrategy;
use crate::error::BuildError;
use crate::problem::ProblemData;

/// Handles created by the full lower-level reformulation.
#[derive(Debug, Clone)]
pub struct LowerLevelBlock {
    /// Slack variables `s >= 0`, one per lower constraint.
    pub slacks: Vec<VariableId>,
    /// Constraint duals `λ >= 0`, one per lower constraint.
    pub duals: Vec<VariableId>,
    /// Bound duals `σ`, one per lower variable; fixed to zero where the
    /// variable is free.
    pub bound_duals: Vec<VariableId>,
}

/// Handles created by the raw and dual-only reformulation variants.
#[derive(Debug, Clone)]
pub struct DualBlock {
    /// Constraint duals `λ >= 0`, one per lower constraint.
    pub duals: Vec<VariableId>,
    /// Bound duals `σ >= 0`, one per lower variable.
    pub bound_duals: Vec<VariableId>,
}

fn check_handles(model: &Model, handles: &[VariableId]) -> Result<(), BuildError> {
    for &id in handles {
        model.get_variable(id)?;
    }
    Ok(())
}

fn check_len(field: &'static str, found: usize, expected: usize) -> Result<(), BuildError> {
    if found != expected {
        return Err(BuildError::DimensionMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_raw_shapes(
    b: &[Vec<f64>],
    d: &[f64],
    ml: usize,
    nl: usize,
) -> Result<(), BuildError> {
    check_len("b (rows)", b.len(), ml)?;
    for row in b {
        check_len("b (row width)", row.len(), nl)?;
    }
    check_len("d", d.len(), nl)?;
    Ok(())
}

/// Create duals and stationarity rows; shared by every reformulation variant.
///
/// `restricted[j]` mirrors the `yl` flags: a free lower variable gets its
/// bound dual fixed to zero, which is what makes the stationarity row exact
/// for free variables. `cross` carries `(F, x)` when the `Fᵀ·x` term
/// participates.
fn add_duals_and_stationarity(
    model: &mut Model,
    b: &[Vec<f64>],
    d: &[f64],
    cross: Option<(&[Vec<f64>], &[VariableId])>,
    restricted: &[bool],
) -> Result<(Vec<VariableId>, Vec<VariableId>), BuildError> {
    let ml = b.len();
    let nl = d.len();

    let mut duals = Vec::with_capacity(ml);
    for i in 0..ml {
        let id = model.add_variable(Variable::nonnegative())?;
        model.set_variable_name(id, format!("lower:dual[{i}]"))?;
        duals.push(id);
    }

    let mut bound_duals = Vec::with_capacity(nl);
    for (j, &is_restricted) in restricted.iter().enumerate() {
        let variable = if is_restricted {
            Variable::nonnegative()
        } else {
            // free primal variable: its bound multiplier can never be positive
            Variable::continuous(Bounds::fixed(0.0))
        };
        let id = model.add_variable(variable)?;
        model.set_variable_name(id, format!("lower:bound_dual[{j}]"))?;
        bound_duals.push(id);
    }

    for j in 0..nl {
        let mut terms = Vec::new();
        if let Some((f, x)) = cross {
            for (i, &var_id) in x.iter().enumerate() {
                terms.push((var_id, f[i][j]));
            }
        }
        for (i, &var_id) in duals.iter().enumerate() {
            terms.push((var_id, b[i][j]));
        }
        terms.push((bound_duals[j], -1.0));

        let row = Expr::from_linear(terms);
        let constraint_id = model.add_constraint_expr(row.eq_scalar(-d[j]))?;
        model.set_constraint_name(constraint_id, format!("lower:stationarity[{j}]"))?;
    }

    Ok((duals, bound_duals))
}

/// Build the full lower-level KKT block against already-created `x` and `y`.
///
/// Steps, in order: slacks, primal feasibility `A·x + B·y + s = b`, duals,
/// primal bound tightening per `yl`, stationarity, and complementarity over
/// `(s, λ)` plus `(y, σ)` for the restricted indices. Indices with `σ`
/// fixed to zero are trivially complementary and never reach the strategy.
pub(crate) fn build_lower(
    model: &mut Model,
    problem: &ProblemData,
    x: &[VariableId],
    y: &[VariableId],
    strategy: &dyn ComplementarityStrategy,
) -> Result<LowerLevelBlock, BuildError> {
    problem.validate()?;
    check_len("x (handles)", x.len(), problem.nu)?;
    check_len("y (handles)", y.len(), problem.nl)?;
    check_handles(model, x)?;
    check_handles(model, y)?;

    let mut slacks = Vec::with_capacity(problem.ml);
    for i in 0..problem.ml {
        let id = model.add_variable(Variable::nonnegative())?;
        model.set_variable_name(id, format!("lower:slack[{i}]"))?;
        slacks.push(id);
    }

    for i in 0..problem.ml {
        let mut terms = Vec::with_capacity(problem.nu + problem.nl + 1);
        for (j, &var_id) in x.iter().enumerate() {
            terms.push((var_id, problem.a[i][j]));
        }
        for (j, &var_id) in y.iter().enumerate() {
            terms.push((var_id, problem.b[i][j]));
        }
        terms.push((slacks[i], 1.0));

        let row = Expr::from_linear(terms);
        let constraint_id = model.add_constraint_expr(row.eq_scalar(problem.b_rhs[i]))?;
        model.set_constraint_name(constraint_id, format!("lower:primal[{i}]"))?;
    }

    for (j, &var_id) in y.iter().enumerate() {
        if problem.yl[j] {
            let bounds = model.get_variable(var_id)?.bounds;
            model.set_variable_bounds(
                var_id,
                Bounds::new(bounds.lower.max(0.0), bounds.upper),
            )?;
        }
    }

    let (duals, bound_duals) = add_duals_and_stationarity(
        model,
        &problem.b,
        &problem.d,
        Some((problem.f.as_slice(), x)),
        &problem.yl,
    )?;

    let mut pairs: Vec<(VariableId, VariableId)> = slacks
        .iter()
        .copied()
        .zip(duals.iter().copied())
        .collect();
    for (j, &var_id) in y.iter().enumerate() {
        if problem.yl[j] {
            pairs.push((var_id, bound_duals[j]));
        }
    }
    strategy.enforce(model, &pairs)?;

    tracing::debug!(
        component = "kkt",
        operation = "build_lower",
        status = "success",
        strategy = strategy.name(),
        slacks = slacks.len(),
        duals = duals.len(),
        pairs = pairs.len(),
        "Built lower-level KKT block"
    );

    Ok(LowerLevelBlock {
        slacks,
        duals,
        bound_duals,
    })
}

/// Build dual feasibility, stationarity, and complementarity from raw
/// coefficients, against a primal block assembled by other means.
///
/// `A` and the right-hand side are assumed already folded into existing
/// rows, with `s` their slack variables. Every `y` is treated as
/// nonnegative-restricted; callers with free lower variables must go
/// through [`build_lower`] with full problem data.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_lower_raw(
    model: &mut Model,
    b: &[Vec<f64>],
    d: &[f64],
    f: &[Vec<f64>],
    x: &[VariableId],
    y: &[VariableId],
    s: &[VariableId],
    strategy: &dyn ComplementarityStrategy,
) -> Result<DualBlock, BuildError> {
    check_raw_shapes(b, d, s.len(), y.len())?;
    check_len("f (rows)", f.len(), x.len())?;
    for row in f {
        check_len("f (row width)", row.len(), y.len())?;
    }
    check_handles(model, x)?;
    check_handles(model, y)?;
    check_handles(model, s)?;

    for &var_id in y {
        let bounds = model.get_variable(var_id)?.bounds;
        model.set_variable_bounds(var_id, Bounds::new(bounds.lower.max(0.0), bounds.upper))?;
    }

    let restricted = vec![true; y.len()];
    let (duals, bound_duals) =
        add_duals_and_stationarity(model, b, d, Some((f, x)), &restricted)?;

    let mut pairs: Vec<(VariableId, VariableId)> =
        s.iter().copied().zip(duals.iter().copied()).collect();
    pairs.extend(y.iter().copied().zip(bound_duals.iter().copied()));
    strategy.enforce(model, &pairs)?;

    tracing::debug!(
        component = "kkt",
        operation = "build_lower_raw",
        status = "success",
        strategy = strategy.name(),
        duals = duals.len(),
        pairs = pairs.len(),
        "Built lower-level dual block from raw coefficients"
    );

    Ok(DualBlock { duals, bound_duals })
}

/// Build only dual feasibility, the stationarity rows without any `x` cross
/// term, and `(s, λ)` complementarity over pre-existing slacks.
pub(crate) fn build_dual_only(
    model: &mut Model,
    b: &[Vec<f64>],
    d: &[f64],
    s: &[VariableId],
    strategy: &dyn ComplementarityStrategy,
) -> Result<DualBlock, BuildError> {
    check_raw_shapes(b, d, s.len(), d.len())?;
    check_handles(model, s)?;

    let restricted = vec![true; d.len()];
    let (duals, bound_duals) = add_duals_and_stationarity(model, b, d, None, &restricted)?;

    let pairs: Vec<(VariableId, VariableId)> =
        s.iter().copied().zip(duals.iter().copied()).collect();
    strategy.enforce(model, &pairs)?;

    tracing::debug!(
        component = "kkt",
        operation = "build_dual_only",
        status = "success",
        strategy = strategy.name(),
        duals = duals.len(),
        pairs = pairs.len(),
        "Built dual-only block"
    );

    Ok(DualBlock { duals, bound_duals })
}
