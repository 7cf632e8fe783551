//! Logistic regression predictor
//!
//! A column-name sensitive binary classifier: each coefficient is bound to a
//! named feature, so rows are matched by name and must carry exactly the
//! columns the model was fitted on, in the same order.

use crate::error::PredictorError;
use crate::predictor::{FeatureRow, Label, Predictor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_threshold() -> f64 {
    0.5
}

/// Logistic regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Bias term
    pub intercept: f64,
    /// Weight per feature name, in training column order
    pub coefficients: IndexMap<String, f64>,
    /// Positive-class probability at or above which the model answers at-risk
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    /// Create a model with the default 0.5 decision threshold
    pub fn new<I, S>(intercept: f64, coefficients: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            intercept,
            coefficients: coefficients
                .into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
            threshold: default_threshold(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check the parameters are usable; returns the reason when they are not
    pub fn check(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("model has no coefficients".to_string());
        }
        if !self.intercept.is_finite() {
            return Err(format!("intercept {} is not finite", self.intercept));
        }
        if let Some((name, weight)) = self.coefficients.iter().find(|(_, w)| !w.is_finite()) {
            return Err(format!("coefficient {} for '{}' is not finite", weight, name));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format!("threshold {} must lie strictly between 0 and 1", self.threshold));
        }
        Ok(())
    }

    /// Probability of the at-risk class
    pub fn positive_probability(&self, row: &FeatureRow) -> Result<f64, PredictorError> {
        if row.len() != self.coefficients.len() {
            return Err(PredictorError::ShapeMismatch {
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }

        let mut z = self.intercept;
        for (name, value) in row.iter() {
            let weight = self
                .coefficients
                .get(name)
                .ok_or_else(|| PredictorError::unknown_feature(name))?;
            z += weight * value;
        }

        let p = 1.0 / (1.0 + (-z).exp());
        if p.is_finite() {
            Ok(p)
        } else {
            Err(PredictorError::internal(format!("logit {} produced no probability", z)))
        }
    }
}

impl Predictor for LogisticModel {
    fn predict_label(&self, row: &FeatureRow) -> Result<Label, PredictorError> {
        let p = self.positive_probability(row)?;
        Ok(if p >= self.threshold {
            Label::AtRisk
        } else {
            Label::Healthy
        })
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, PredictorError> {
        let p = self.positive_probability(row)?;
        Ok(vec![1.0 - p, p])
    }

    fn expected_features(&self) -> Option<Vec<String>> {
        Some(self.coefficients.keys().cloned().collect())
    }
}
