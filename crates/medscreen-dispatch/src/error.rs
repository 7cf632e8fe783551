//! Errors for prediction dispatch and profile registration

use medscreen_diagnostics::{
    ErrorCode, MedscreenError, MS0001, MS0002, MS0003, MS0004, MS0200, MS0201, MS0202, MS0203,
    MS0204, MS0205, MS0301, MS0302,
};
use thiserror::Error;

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failures raised by a predictor while scoring a row
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictorError {
    /// Row width differs from what the model was trained on
    #[error("expected {expected} features, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Row carries a column the model does not know
    #[error("unknown feature '{name}'")]
    UnknownFeature { name: String },

    /// Probabilities outside [0, 1] or not finite
    #[error("invalid class probabilities {probabilities:?}")]
    InvalidProbabilities { probabilities: Vec<f64> },

    /// No probability was produced for the returned label
    #[error("no probability for label {label} among {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },

    /// The predictor panicked
    #[error("predictor panicked: {message}")]
    Panicked { message: String },

    /// Any other internal fault
    #[error("{message}")]
    Internal { message: String },
}

impl PredictorError {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an unknown feature error
    pub fn unknown_feature(name: impl Into<String>) -> Self {
        Self::UnknownFeature { name: name.into() }
    }
}

/// Errors returned by [`Dispatcher::predict`](crate::Dispatcher::predict)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// Disease key is not registered
    #[error("Unknown disease: {disease}")]
    UnknownDisease { disease: String },

    /// A field of the disease's schema is absent from the submitted input
    #[error("Missing field '{field}' for {disease}")]
    MissingField { disease: String, field: String },

    /// A field is present but not a finite number
    #[error("Invalid value {value} for field '{field}' of {disease}")]
    InvalidFieldValue {
        disease: String,
        field: String,
        value: f64,
    },

    /// The predictor failed during inference
    #[error("Prediction failed for {disease}: {source}")]
    PredictionFailed {
        disease: String,
        #[source]
        source: PredictorError,
    },
}

impl DispatchError {
    /// Create an unknown disease error
    pub fn unknown_disease(disease: impl Into<String>) -> Self {
        Self::UnknownDisease {
            disease: disease.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(disease: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            disease: disease.into(),
            field: field.into(),
        }
    }

    /// Create a prediction failure wrapping the predictor's error
    pub fn prediction_failed(disease: impl Into<String>, source: PredictorError) -> Self {
        Self::PredictionFailed {
            disease: disease.into(),
            source,
        }
    }

    /// Stable error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownDisease { .. } => MS0001,
            Self::MissingField { .. } => MS0002,
            Self::InvalidFieldValue { .. } => MS0003,
            Self::PredictionFailed { .. } => MS0004,
        }
    }

    /// The field or disease the error is about
    pub fn subject(&self) -> &str {
        match self {
            Self::UnknownDisease { disease } | Self::PredictionFailed { disease, .. } => disease,
            Self::MissingField { field, .. } | Self::InvalidFieldValue { field, .. } => field,
        }
    }
}

impl From<DispatchError> for MedscreenError {
    fn from(err: DispatchError) -> Self {
        MedscreenError::dispatch(err.code(), err.to_string()).with_subject(err.subject())
    }
}

/// Errors raised while assembling a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// Two profiles share a key
    #[error("Duplicate disease profile: {disease}")]
    DuplicateProfile { disease: String },

    /// A profile has no fields
    #[error("Disease profile {disease} has no fields")]
    EmptySchema { disease: String },

    /// A field name occurs twice in a profile's schema
    #[error("Field '{field}' occurs more than once in {disease}")]
    DuplicateField { disease: String, field: String },

    /// The field name map renames a field that is not in the schema
    #[error("Field name map of {disease} renames unknown field '{field}'")]
    UnmappedFieldName { disease: String, field: String },

    /// The mapped schema disagrees with the predictor's declared features
    #[error("Schema of {disease} does not match its predictor: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        disease: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A model specification cannot be turned into a predictor
    #[error("Invalid model for {disease}: {reason}")]
    InvalidModel { disease: String, reason: String },

    /// Registry file could not be read
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Registry document is malformed
    #[error("Failed to parse {source_name}: {message}")]
    Format {
        source_name: String,
        message: String,
    },
}

impl RegistryError {
    /// Create an invalid model error
    pub fn invalid_model(disease: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            disease: disease.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateProfile { .. } => MS0200,
            Self::EmptySchema { .. } => MS0201,
            Self::DuplicateField { .. } => MS0202,
            Self::UnmappedFieldName { .. } => MS0203,
            Self::SchemaMismatch { .. } => MS0204,
            Self::InvalidModel { .. } => MS0205,
            Self::Io { .. } => MS0301,
            Self::Format { .. } => MS0302,
        }
    }
}

impl From<RegistryError> for MedscreenError {
    fn from(err: RegistryError) -> Self {
        let code = err.code();
        match &err {
            RegistryError::Io { path, .. } => {
                MedscreenError::system(code, err.to_string()).with_subject(path.clone())
            }
            RegistryError::Format { source_name, .. } => {
                MedscreenError::system(code, err.to_string()).with_subject(source_name.clone())
            }
            _ => MedscreenError::config(code, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_the_field() {
        let err = DispatchError::missing_field("heart", "chol");
        assert_eq!(err.code(), MS0002);
        assert_eq!(err.subject(), "chol");
        assert_eq!(err.to_string(), "Missing field 'chol' for heart");
    }

    #[test]
    fn test_prediction_failed_keeps_source() {
        let err = DispatchError::prediction_failed(
            "cancer",
            PredictorError::ShapeMismatch { expected: 4, found: 3 },
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("expected 4 features, found 3"));
    }

    #[test]
    fn test_into_medscreen_error() {
        let err: MedscreenError = DispatchError::unknown_disease("flu").into();
        assert_eq!(err.code(), MS0001);
        assert_eq!(err.to_diagnostic().subject.as_deref(), Some("flu"));

        let err: MedscreenError = RegistryError::Io {
            path: "registry.json".into(),
            message: "not found".into(),
        }
        .into();
        assert!(err.code().is_system_error());
    }
}
