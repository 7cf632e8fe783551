//! Medical screening toolkit
//!
//! This crate bundles the two screening subsystems behind one error type:
//! - Disease risk prediction: numeric form submissions dispatched to the
//!   binary classifier registered for each disease
//! - Symptom checking: a fixed yes/no questionnaire ranking likely conditions
//!
//! # Example
//!
//! ```ignore
//! use medscreen::{load_dispatcher, Questionnaire};
//!
//! let dispatcher = load_dispatcher("registry.json")?;
//! let result = dispatcher.predict("heart", &[
//!     ("age", 54.0), ("trestbps", 130.0), ("chol", 246.0),
//!     ("thalach", 150.0), ("oldpeak", 1.0),
//! ])?;
//! println!("{} ({}%)", result.label.summary(), result.confidence_percent());
//!
//! let q = Questionnaire::standard();
//! let state = q.answer(&q.start(), true)?;
//! ```

use std::path::Path;

// Re-export all public APIs from internal crates
pub use medscreen_diagnostics as diagnostics;
pub use medscreen_dispatch as dispatch;
pub use medscreen_questionnaire as questionnaire;

// Convenience re-exports
pub use medscreen_diagnostics::{Diagnostic, ErrorCode, MedscreenError, Result};
pub use medscreen_dispatch::{Dispatcher, Label, PredictionResult, RegistryConfig};
pub use medscreen_questionnaire::{Diagnosis, Questionnaire, SessionState, SessionStatus};

/// Load a registry file and build a validated dispatcher from it
pub fn load_dispatcher(path: impl AsRef<Path>) -> Result<Dispatcher> {
    let path = path.as_ref();
    let dispatcher = RegistryConfig::from_file(path)?.into_dispatcher()?;
    log::debug!(
        "registry {} provides {} disease model(s)",
        path.display(),
        dispatcher.len()
    );
    Ok(dispatcher)
}

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
