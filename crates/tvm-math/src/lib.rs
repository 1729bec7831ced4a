//! # TVM Math
//!
//! Numerical utilities for the TVM time-value-of-money engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Expanding-bracket bisection for monotonically decreasing
//!   functions, with an explicit convergence flag
//! - **Errors**: A shared error type for numerical failures
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Every solver terminates within a fixed iteration budget
//! - **Observable**: Non-convergence is reported, never hidden
//! - **Pure**: No shared or static state; every call is reentrant

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection_decreasing, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
