//! Handles and expressions shared by the strata model and reformulation crates.

pub mod expr;
pub mod ids;

pub use expr::{ComparisonSense, ConstraintExpr, Expr};
pub use ids::{ConstraintId, SosId, VariableId};
