//! CLI functionality for the medscreen tool
//!
//! This module contains all CLI-related functionality including:
//! - Disease risk prediction
//! - Registry listing
//! - The interactive symptom checker
//! - Output formatting

#[cfg(feature = "cli")]
pub mod check;
#[cfg(feature = "cli")]
pub mod diseases;
#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod predict;
