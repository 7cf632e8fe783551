//! Registry configuration
//!
//! A JSON document that registers every disease at startup:
//!
//! ```json
//! {
//!   "diseases": [
//!     {
//!       "key": "cancer",
//!       "feature_order": ["radius_mean", "texture_mean"],
//!       "field_name_map": { "radius_mean": "mean radius", "texture_mean": "mean texture" },
//!       "model": {
//!         "kind": "logistic",
//!         "intercept": -8.1,
//!         "coefficients": { "mean radius": 0.31, "mean texture": 0.12 }
//!       }
//!     }
//!   ]
//! }
//! ```

use crate::dispatcher::Dispatcher;
use crate::error::RegistryError;
use crate::logistic::LogisticModel;
use crate::predictor::Predictor;
use crate::profile::DiseaseProfile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Model specification, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
}

impl ModelSpec {
    /// Build the predictor this specification describes
    pub fn into_predictor(self, disease: &str) -> Result<Arc<dyn Predictor>, RegistryError> {
        match self {
            Self::Logistic(model) => {
                model
                    .check()
                    .map_err(|reason| RegistryError::invalid_model(disease, reason))?;
                Ok(Arc::new(model))
            }
        }
    }
}

/// One registered disease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseConfig {
    pub key: String,
    pub feature_order: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub field_name_map: IndexMap<String, String>,
    pub model: ModelSpec,
}

impl DiseaseConfig {
    pub fn into_profile(self) -> Result<DiseaseProfile, RegistryError> {
        let predictor = self.model.into_predictor(&self.key)?;
        Ok(DiseaseProfile::new(self.key, self.feature_order, predictor)
            .with_field_name_map(self.field_name_map))
    }
}

/// Registry document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub diseases: Vec<DiseaseConfig>,
}

impl RegistryConfig {
    /// Parse a registry from a JSON string
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::parse(json, "<inline>")
    }

    /// Load a registry from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("loaded registry from {} ({} bytes)", path.display(), json.len());
        Self::parse(&json, &path.display().to_string())
    }

    fn parse(json: &str, source_name: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(json).map_err(|e| RegistryError::Format {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Add a disease entry
    pub fn with_disease(mut self, disease: DiseaseConfig) -> Self {
        self.diseases.push(disease);
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::Format {
            source_name: "<registry>".to_string(),
            message: e.to_string(),
        })
    }

    /// Build predictors and validate every profile
    pub fn into_dispatcher(self) -> Result<Dispatcher, RegistryError> {
        let profiles = self
            .diseases
            .into_iter()
            .map(DiseaseConfig::into_profile)
            .collect::<Result<Vec<_>, _>>()?;
        Dispatcher::builder().register_all(profiles).build()
    }
}
