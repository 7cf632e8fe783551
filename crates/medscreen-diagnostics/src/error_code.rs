//! Medscreen error codes following a structured numbering system
//!
//! Error code ranges:
//! - MS0001-MS0099: Dispatch errors (disease prediction)
//! - MS0100-MS0199: Questionnaire errors (session state machine)
//! - MS0200-MS0299: Registry errors (profile validation, configuration)
//! - MS0300-MS0399: System errors (I/O, format)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a dispatch error (0001-0099)
    pub const fn is_dispatch_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a questionnaire error (0100-0199)
    pub const fn is_questionnaire_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a registry error (0200-0299)
    pub const fn is_registry_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0300-0399)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MS{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Dispatch errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unknown disease")
        .with_help("Pick one of the registered diseases"));
    map.insert(2, ErrorInfo::new("Missing field")
        .with_help("Provide a numeric value for every field of the form"));
    map.insert(3, ErrorInfo::new("Invalid field value")
        .with_help("Field values must be finite numbers"));
    map.insert(4, ErrorInfo::new("Prediction failed")
        .with_help("The model could not score this input; try submitting again"));

    // Questionnaire errors (0100-0199)
    map.insert(100, ErrorInfo::new("Invalid transition"));
    map.insert(101, ErrorInfo::new("Question step out of range"));
    map.insert(102, ErrorInfo::new("Corrupt session state")
        .with_help("Restart the symptom checker"));
    map.insert(103, ErrorInfo::new("Unknown session"));
    map.insert(104, ErrorInfo::new("Empty questionnaire"));

    // Registry errors (0200-0299)
    map.insert(200, ErrorInfo::new("Duplicate disease profile"));
    map.insert(201, ErrorInfo::new("Empty feature schema"));
    map.insert(202, ErrorInfo::new("Duplicate feature name"));
    map.insert(203, ErrorInfo::new("Field name mapping references an unknown field"));
    map.insert(204, ErrorInfo::new("Profile schema does not match the predictor"));
    map.insert(205, ErrorInfo::new("Invalid model specification"));

    // System errors (0300-0399)
    map.insert(300, ErrorInfo::new("Internal error"));
    map.insert(301, ErrorInfo::new("I/O error"));
    map.insert(302, ErrorInfo::new("Invalid format"));

    map
});

// Dispatch errors
pub const MS0001: ErrorCode = ErrorCode::new(1);
pub const MS0002: ErrorCode = ErrorCode::new(2);
pub const MS0003: ErrorCode = ErrorCode::new(3);
pub const MS0004: ErrorCode = ErrorCode::new(4);

// Questionnaire errors
pub const MS0100: ErrorCode = ErrorCode::new(100);
pub const MS0101: ErrorCode = ErrorCode::new(101);
pub const MS0102: ErrorCode = ErrorCode::new(102);
pub const MS0103: ErrorCode = ErrorCode::new(103);
pub const MS0104: ErrorCode = ErrorCode::new(104);

// Registry errors
pub const MS0200: ErrorCode = ErrorCode::new(200);
pub const MS0201: ErrorCode = ErrorCode::new(201);
pub const MS0202: ErrorCode = ErrorCode::new(202);
pub const MS0203: ErrorCode = ErrorCode::new(203);
pub const MS0204: ErrorCode = ErrorCode::new(204);
pub const MS0205: ErrorCode = ErrorCode::new(205);

// System errors
pub const MS0300: ErrorCode = ErrorCode::new(300);
pub const MS0301: ErrorCode = ErrorCode::new(301);
pub const MS0302: ErrorCode = ErrorCode::new(302);
