//! Single-level KKT reformulation of bilevel linear programs.
//!
//! A bilevel linear program nests a lower-level LP inside an upper-level
//! problem: the upper level chooses `x`, the lower level answers with the
//! `y` that is optimal for it at that `x`. This crate replaces the nested
//! "y solves the lower LP" condition with the lower level's KKT system
//! (primal feasibility with slacks, dual feasibility, stationarity, and
//! complementary slackness), so the whole thing becomes one model a
//! standard MIP (or NLP) solver can handle.
//!
//! Complementary slackness is the only nonconvex piece, and its encoding is
//! pluggable: [`Sos1`] (exact, needs SOS support), [`BigM`] (binary
//! disjunctions, needs a safe constant), or [`Bilinear`] (literal products,
//! needs an NLP-capable backend) all implement [`ComplementarityStrategy`],
//! and new encodings slot in without touching the assembly code.
//!
//! # Example
//!
//! The inner problem `min y s.t. x - y <= 0, y >= 0` forces `y = x` for
//! any `x >= 0`; its reformulation is five variables and two rows plus two
//! complementarity pairs:
//!
//! ```
//! use strata_core::Model;
//! use strata_kkt::{build, ProblemData, Sos1};
//!
//! let problem = ProblemData {
//!     nu: 1, nl: 1, mu: 0, ml: 1,
//!     g: vec![], h: vec![], q: vec![],
//!     cx: vec![1.0], cy: vec![0.0],
//!     xl: vec![0.0], xu: vec![10.0], jx: vec![],
//!     a: vec![vec![1.0]], b: vec![vec![-1.0]], b_rhs: vec![0.0],
//!     d: vec![1.0], f: vec![vec![0.0]], yl: vec![true],
//! };
//!
//! let mut model = Model::new();
//! let reform = build(&mut model, &problem, &Sos1)?;
//! assert_eq!(model.num_variables(), 5); // x, y, slack, dual, bound dual
//! assert_eq!(reform.duals.len(), 1);
//! # Ok::<(), strata_kkt::BuildError>(())
//! ```
//!
//! Entry points are not idempotent: each call appends a fresh block, so
//! building twice into one model duplicates variables and constraints by
//! design.

pub mod assembly;
pub mod complementarity;
pub mod error;
pub mod lower;
pub mod problem;
pub mod upper;

pub use assembly::{augment, augment_dual_only, augment_raw, build, Reformulation};
pub use complementarity::{BigM, Bilinear, ComplementarityStrategy, Sos1};
pub use error::BuildError;
pub use lower::{DualBlock, LowerLevelBlock};
pub use problem::ProblemData;
pub use upper::{build_upper, UpperLevelVariables};
