//! Medscreen diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the
//! dispatcher and the questionnaire engine: stable error codes, renderable
//! diagnostics, and the umbrella [`MedscreenError`] type.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for medscreen operations
pub type Result<T> = std::result::Result<T, MedscreenError>;
