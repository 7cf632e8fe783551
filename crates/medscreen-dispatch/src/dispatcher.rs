//! Prediction dispatcher
//!
//! The dispatcher is parameterized entirely by [`DiseaseProfile`] data: it
//! looks the disease up by key, assembles the row its model expects, and turns
//! the model's output into a [`PredictionResult`].

use crate::error::{DispatchError, DispatchResult, PredictorError, RegistryError};
use crate::predictor::{FeatureRow, Label, Predictor};
use crate::profile::{DiseaseProfile, FieldValues};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Disease key the prediction was made for
    pub disease: String,
    /// Label returned by the model
    pub label: Label,
    /// Probability the model assigns to `label`
    pub confidence: f64,
}

impl PredictionResult {
    /// Confidence as a percentage rounded to two decimals
    pub fn confidence_percent(&self) -> f64 {
        (self.confidence * 100.0 * 100.0).round() / 100.0
    }

    pub fn is_at_risk(&self) -> bool {
        self.label == Label::AtRisk
    }
}

/// Routes submissions to the model registered for each disease
///
/// Profiles are immutable after [`DispatcherBuilder::build`], so a dispatcher
/// can be shared across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct Dispatcher {
    profiles: IndexMap<String, DiseaseProfile>,
}

impl Dispatcher {
    /// Start registering profiles
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Predict a label and its confidence for one submission
    pub fn predict(
        &self,
        disease_key: &str,
        raw_inputs: &(impl FieldValues + ?Sized),
    ) -> DispatchResult<PredictionResult> {
        let profile = self
            .profiles
            .get(disease_key)
            .ok_or_else(|| DispatchError::unknown_disease(disease_key))?;

        let row = profile.build_row(raw_inputs)?;
        log::debug!(
            "dispatching {} with {} features: {:?}",
            disease_key,
            row.len(),
            row.names()
        );

        let (label, confidence) = score(profile.predictor().as_ref(), &row).map_err(|source| {
            log::warn!("prediction failed for {}: {}", disease_key, source);
            DispatchError::prediction_failed(disease_key, source)
        })?;

        log::debug!("{} -> {} ({:.4})", disease_key, label, confidence);
        Ok(PredictionResult {
            disease: disease_key.to_string(),
            label,
            confidence,
        })
    }

    /// Profile registered under `key`
    pub fn profile(&self, key: &str) -> Option<&DiseaseProfile> {
        self.profiles.get(key)
    }

    /// Registered profiles in registration order
    pub fn diseases(&self) -> impl Iterator<Item = &DiseaseProfile> + '_ {
        self.profiles.values()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.profiles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Invoke both predictor capabilities on `row` and pick the label's probability
fn score(predictor: &dyn Predictor, row: &FeatureRow) -> Result<(Label, f64), PredictorError> {
    let (label, probabilities) = panic::catch_unwind(AssertUnwindSafe(|| {
        let label = predictor.predict_label(row)?;
        let probabilities = predictor.predict_proba(row)?;
        Ok::<_, PredictorError>((label, probabilities))
    }))
    .map_err(|payload| PredictorError::Panicked {
        message: panic_message(payload.as_ref()),
    })??;

    if probabilities
        .iter()
        .any(|p| !p.is_finite() || !(0.0..=1.0).contains(p))
    {
        return Err(PredictorError::InvalidProbabilities { probabilities });
    }

    let confidence = probabilities
        .get(label.index())
        .copied()
        .ok_or(PredictorError::LabelOutOfRange {
            label: label.index(),
            classes: probabilities.len(),
        })?;

    Ok((label, confidence))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Collects profiles and validates them as a whole
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    profiles: Vec<DiseaseProfile>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile
    pub fn register(mut self, profile: DiseaseProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Add several profiles
    pub fn register_all(mut self, profiles: impl IntoIterator<Item = DiseaseProfile>) -> Self {
        self.profiles.extend(profiles);
        self
    }

    /// Validate every profile and freeze the registry
    pub fn build(self) -> Result<Dispatcher, RegistryError> {
        let mut profiles = IndexMap::with_capacity(self.profiles.len());
        for profile in self.profiles {
            profile.validate()?;
            if profiles.contains_key(profile.key()) {
                return Err(RegistryError::DuplicateProfile {
                    disease: profile.key().to_string(),
                });
            }
            profiles.insert(profile.key().to_string(), profile);
        }

        log::info!(
            "registered {} disease profiles: {:?}",
            profiles.len(),
            profiles.keys().collect::<Vec<_>>()
        );
        Ok(Dispatcher { profiles })
    }
}
