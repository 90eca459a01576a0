//! Strata model container: variables, linear constraints, SOS1 sets, and a
//! single linear objective, with solver-agnostic solution types.
//!
//! The model is the mutable side of every strata build: reformulation code
//! appends variables and constraints through the builder methods here, and a
//! solver backend implementing [`Solver`] consumes the finished model.

pub mod model;
pub mod solver;
pub mod types;

pub use model::{Model, ModelError};
pub use solver::{Solution, Solver, SolverError, SolverStatus};
pub use types::{Bounds, Constraint, Objective, Sense, Variable};
