//! Questionnaire errors

use medscreen_diagnostics::{ErrorCode, MedscreenError, MS0100, MS0101, MS0102, MS0103, MS0104};
use thiserror::Error;

/// Result type for questionnaire operations
pub type QuestionnaireResult<T> = Result<T, QuestionnaireError>;

/// Errors that can occur while driving a questionnaire session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    /// Operation not permitted in the session's current state
    #[error("Cannot {operation} while {state}")]
    InvalidTransition { operation: String, state: String },

    /// Question index outside the sequence
    #[error("Question {step} is out of range for {total} questions")]
    StepOutOfRange { step: usize, total: usize },

    /// Session state that this questionnaire could never have produced
    #[error("Corrupt session state: {reason}")]
    CorruptState { reason: String },

    /// No session stored under this id
    #[error("Unknown session: {id}")]
    UnknownSession { id: String },

    /// A questionnaire needs at least one question
    #[error("Questionnaire has no questions")]
    EmptyQuestionnaire,
}

impl QuestionnaireError {
    /// Create an invalid transition error
    pub fn invalid_transition(operation: impl Into<String>, state: impl ToString) -> Self {
        Self::InvalidTransition {
            operation: operation.into(),
            state: state.to_string(),
        }
    }

    /// Create a corrupt state error
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptState {
            reason: reason.into(),
        }
    }

    /// Whether the call was not permitted in the session's state
    ///
    /// Out-of-range step queries count as invalid transitions too.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. } | Self::StepOutOfRange { .. })
    }

    /// Stable error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTransition { .. } => MS0100,
            Self::StepOutOfRange { .. } => MS0101,
            Self::CorruptState { .. } => MS0102,
            Self::UnknownSession { .. } => MS0103,
            Self::EmptyQuestionnaire => MS0104,
        }
    }
}

impl From<QuestionnaireError> for MedscreenError {
    fn from(err: QuestionnaireError) -> Self {
        let subject = match &err {
            QuestionnaireError::InvalidTransition { state, .. } => Some(state.clone()),
            QuestionnaireError::UnknownSession { id } => Some(id.clone()),
            _ => None,
        };
        let converted = MedscreenError::questionnaire(err.code(), err.to_string());
        match subject {
            Some(subject) => converted.with_subject(subject),
            None => converted,
        }
    }
}
