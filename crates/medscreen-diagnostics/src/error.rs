//! Medscreen error types

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the request cannot be completed
    Error,
    /// Warning - the request completed but something looks off
    Warning,
    /// Information - informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message a presentation layer can render verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// What the message is about: a disease key, a field name, a session state
    pub subject: Option<String>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            subject: None,
            help: code.info().help.map(str::to_string),
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(subject) = &self.subject {
            write!(f, " ({})", subject)?;
        }
        Ok(())
    }
}

/// Main medscreen error type
///
/// Crate-level errors (`DispatchError`, `RegistryError`, `QuestionnaireError`)
/// convert into this type so a caller driving both subsystems can handle a
/// single error type.
#[derive(Debug, Clone, Error)]
pub enum MedscreenError {
    /// Prediction dispatch error
    #[error("{code}: {message}")]
    Dispatch {
        code: ErrorCode,
        message: String,
        subject: Option<String>,
    },

    /// Questionnaire state machine error
    #[error("{code}: {message}")]
    Questionnaire {
        code: ErrorCode,
        message: String,
        subject: Option<String>,
    },

    /// Registry or configuration error
    #[error("{code}: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// System error
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },
}

impl MedscreenError {
    /// Create a dispatch error
    pub fn dispatch(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Dispatch {
            code,
            message: message.into(),
            subject: None,
        }
    }

    /// Create a questionnaire error
    pub fn questionnaire(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Questionnaire {
            code,
            message: message.into(),
            subject: None,
        }
    }

    /// Create a configuration error
    pub fn config(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Attach a subject (disease key, field name, session state)
    pub fn with_subject(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Dispatch { subject, .. } | Self::Questionnaire { subject, .. } => {
                *subject = Some(value.into());
            }
            Self::Config { context, .. } | Self::System { context, .. } => {
                *context = Some(value.into());
            }
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Dispatch { code, .. } => *code,
            Self::Questionnaire { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::System { code, .. } => *code,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Dispatch { code, message, subject }
            | Self::Questionnaire { code, message, subject } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(subject) = subject {
                    diag = diag.with_subject(subject.clone());
                }
                diag
            }
            Self::Config { code, message, context } | Self::System { code, message, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
        }
    }
}
