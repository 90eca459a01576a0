//! Entry points assembling complete or partial reformulations.
//!
//! Four named operations cover the shapes in which callers hold their data
//! (full problem, pre-built upper level, raw coefficients, primal-only
//! model); each documents what must already exist in the model. None of
//! them is idempotent: every call creates fresh variables and constraints,
//! so calling one twice on the same model duplicates the block. That is
//! deliberate and relied upon for composing independent lower levels.

use strata_core::Model;
use strata_expr::ids::VariableId;

use crate::complementarity::ComplementarityStrategy;
use crate::error::BuildError;
use crate::lower::{build_dual_only, build_lower, build_lower_raw, DualBlock, LowerLevelBlock};
use crate::problem::ProblemData;
use crate::upper::build_upper;

/// Handles to everything a full [`build`] creates.
#[derive(Debug, Clone)]
pub struct Reformulation {
    /// Upper-level decisions.
    pub x: Vec<VariableId>,
    /// Lower-level responses.
    pub y: Vec<VariableId>,
    /// Lower-constraint slacks.
    pub slacks: Vec<VariableId>,
    /// Lower-constraint duals.
    pub duals: Vec<VariableId>,
    /// Lower-variable bound duals.
    pub bound_duals: Vec<VariableId>,
}

/// Build the complete single-level reformulation into an empty model.
///
/// Emits the upper-level block (variables, feasibility, objective) and the
/// lower-level KKT block, with complementarity encoded by `strategy`
/// ([`crate::Sos1`] is the conventional choice).
pub fn build(
    model: &mut Model,
    problem: &ProblemData,
    strategy: &dyn ComplementarityStrategy,
) -> Result<Reformulation, BuildError> {
    problem.validate()?;
    let upper = build_upper(model, problem)?;
    let lower = build_lower(model, problem, &upper.x, &upper.y, strategy)?;

    tracing::debug!(
        component = "kkt",
        operation = "build",
        status = "success",
        strategy = strategy.name(),
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        "Built single-level reformulation"
    );

    Ok(Reformulation {
        x: upper.x,
        y: upper.y,
        slacks: lower.slacks,
        duals: lower.duals,
        bound_duals: lower.bound_duals,
    })
}

/// Add the lower-level KKT block to a model whose upper level was built
/// externally.
///
/// `x` and `y` must already exist in the model; `y` bounds are tightened
/// per the problem's `yl` flags.
pub fn augment(
    model: &mut Model,
    problem: &ProblemData,
    x: &[VariableId],
    y: &[VariableId],
    strategy: &dyn ComplementarityStrategy,
) -> Result<LowerLevelBlock, BuildError> {
    build_lower(model, problem, x, y, strategy)
}

/// Add dual feasibility, stationarity, and complementarity from raw
/// coefficients.
///
/// The primal block (`A`, right-hand sides) must already be folded into
/// existing rows with `s` as its slacks. Every `y` is treated as
/// nonnegative-restricted; use [`augment`] with full problem data when some
/// lower variables are free.
#[allow(clippy::too_many_arguments)]
pub fn augment_raw(
    model: &mut Model,
    b: &[Vec<f64>],
    d: &[f64],
    f: &[Vec<f64>],
    x: &[VariableId],
    y: &[VariableId],
    s: &[VariableId],
    strategy: &dyn ComplementarityStrategy,
) -> Result<DualBlock, BuildError> {
    build_lower_raw(model, b, d, f, x, y, s, strategy)
}

/// Add only dual feasibility and `(s, λ)` complementarity over pre-existing
/// slacks; the stationarity rows omit any `x` cross term.
pub fn augment_dual_only(
    model: &mut Model,
    b: &[Vec<f64>],
    d: &[f64],
    s: &[VariableId],
    strategy: &dyn ComplementarityStrategy,
) -> Result<DualBlock, BuildError> {
    build_dual_only(model, b, d, s, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complementarity::Sos1;

    fn scenario() -> ProblemData {
        // min x s.t. y solves: min y s.t. x - y <= 0, y >= 0
        ProblemData {
            nu: 1,
            nl: 1,
            mu: 0,
            ml: 1,
            g: Vec::new(),
            h: Vec::new(),
            q: Vec::new(),
            cx: vec![1.0],
            cy: vec![0.0],
            xl: vec![0.0],
            xu: vec![10.0],
            jx: Vec::new(),
            a: vec![vec![1.0]],
            b: vec![vec![-1.0]],
            b_rhs: vec![0.0],
            d: vec![1.0],
            f: vec![vec![0.0]],
            yl: vec![true],
        }
    }

    #[test]
    fn build_creates_every_block() {
        let mut model = Model::new();
        let reform = build(&mut model, &scenario(), &Sos1).unwrap();

        assert_eq!(reform.x.len(), 1);
        assert_eq!(reform.y.len(), 1);
        assert_eq!(reform.slacks.len(), 1);
        assert_eq!(reform.duals.len(), 1);
        assert_eq!(reform.bound_duals.len(), 1);

        // x, y, s, λ, σ
        assert_eq!(model.num_variables(), 5);
        // primal + stationarity
        assert_eq!(model.num_constraints(), 2);
        // (s, λ) and (y, σ)
        assert_eq!(model.num_sos1_sets(), 2);
    }

    #[test]
    fn repeated_builds_duplicate_the_block() {
        let mut model = Model::new();
        let problem = scenario();
        let first = build(&mut model, &problem, &Sos1).unwrap();

        // the second full build fails only on the objective; augment composes
        let second = augment(&mut model, &problem, &first.x, &first.y, &Sos1).unwrap();

        assert_ne!(first.slacks, second.slacks);
        assert_eq!(model.num_variables(), 5 + 3);
        assert_eq!(model.num_constraints(), 2 + 2);
        assert_eq!(model.num_sos1_sets(), 2 + 2);
    }

    #[test]
    fn invalid_data_fails_before_any_variable_is_created() {
        let mut model = Model::new();
        let mut bad = scenario();
        bad.a = vec![vec![1.0], vec![1.0]];

        let err = build(&mut model, &bad, &Sos1).unwrap_err();
        assert_eq!(err.code(), "KKT_DIMENSION_MISMATCH");
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
    }
}
