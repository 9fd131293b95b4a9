//! Core types and error handling for variant-matrix.
//!
//! - [`error`] - [`MatrixError`], [`ErrorContext`] and [`user_friendly_error`]

pub mod error;

pub use error::{ErrorContext, MatrixError, user_friendly_error};
