//! Predictor capability and the row type handed to it

use crate::error::PredictorError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary outcome of a disease model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Healthy = 0,
    AtRisk = 1,
}

impl Label {
    /// Class index, used to pick this label's probability
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label for a class index, if it is a binary class
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Healthy),
            1 => Some(Self::AtRisk),
            _ => None,
        }
    }

    /// One-line verdict for the user
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Healthy => "You are likely healthy.",
            Self::AtRisk => "You may have the disease.",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::AtRisk => write!(f, "at-risk"),
        }
    }
}

/// A single input row: values in model order, each carrying a column name
///
/// Renaming columns never reorders or alters values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureRow {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` columns
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a column
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.names.push(name.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values in order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named column
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }

    /// Iterate `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Copy of this row with column names substituted through `map`
    ///
    /// Names absent from `map` are kept as they are.
    pub fn renamed(&self, map: &IndexMap<String, String>) -> Self {
        let names = self
            .names
            .iter()
            .map(|name| map.get(name).unwrap_or(name).clone())
            .collect();
        Self {
            names,
            values: self.values.clone(),
        }
    }
}

/// A trained binary classifier
///
/// Implementations must be side-effect free: the dispatcher shares one
/// predictor across every concurrent caller.
pub trait Predictor: Send + Sync {
    /// Predict a label for one row
    fn predict_label(&self, row: &FeatureRow) -> Result<Label, PredictorError>;

    /// Predict per-class probabilities for one row, indexed by [`Label::index`]
    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, PredictorError>;

    /// Column names the predictor was trained on, in order
    ///
    /// Purely positional predictors return `None` and are not schema-checked
    /// at registration.
    fn expected_features(&self) -> Option<Vec<String>> {
        None
    }
}
