//! Built-in disease schemas
//!
//! These describe the input forms of the three stock models. Predictors are
//! supplied separately; see [`DiseaseSchema::profile`].

use crate::config::{DiseaseConfig, ModelSpec};
use crate::predictor::Predictor;
use crate::profile::DiseaseProfile;
use indexmap::IndexMap;
use std::sync::Arc;

/// Input schema of a stock disease model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseSchema {
    pub key: &'static str,
    /// Service title shown to the user
    pub title: &'static str,
    pub feature_order: &'static [&'static str],
    /// Canonical field to model column, for models fitted on other column names
    pub field_name_map: &'static [(&'static str, &'static str)],
}

pub const DIABETES: DiseaseSchema = DiseaseSchema {
    key: "diabetes",
    title: "Diabetes Prediction",
    feature_order: &[
        "pregnancies",
        "glucose",
        "bp",
        "skin",
        "insulin",
        "bmi",
        "dpf",
        "age",
    ],
    field_name_map: &[],
};

pub const HEART: DiseaseSchema = DiseaseSchema {
    key: "heart",
    title: "Heart Disease Prediction",
    feature_order: &["age", "trestbps", "chol", "thalach", "oldpeak"],
    field_name_map: &[],
};

pub const CANCER: DiseaseSchema = DiseaseSchema {
    key: "cancer",
    title: "Cancer Prediction",
    feature_order: &["radius_mean", "texture_mean", "perimeter_mean", "area_mean"],
    field_name_map: &[
        ("radius_mean", "mean radius"),
        ("texture_mean", "mean texture"),
        ("perimeter_mean", "mean perimeter"),
        ("area_mean", "mean area"),
    ],
};

/// The stock schemas in menu order
pub fn standard_schemas() -> [DiseaseSchema; 3] {
    [DIABETES, HEART, CANCER]
}

/// Stock schema by disease key
pub fn schema(key: &str) -> Option<DiseaseSchema> {
    standard_schemas().into_iter().find(|s| s.key == key)
}

impl DiseaseSchema {
    pub fn field_name_map(&self) -> IndexMap<String, String> {
        self.field_name_map
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    /// Model column names after mapping, in model order
    pub fn model_feature_names(&self) -> Vec<String> {
        self.feature_order
            .iter()
            .map(|field| {
                self.field_name_map
                    .iter()
                    .find(|(from, _)| from == field)
                    .map_or(*field, |(_, to)| *to)
                    .to_string()
            })
            .collect()
    }

    /// Bind this schema to a predictor
    pub fn profile(&self, predictor: Arc<dyn Predictor>) -> DiseaseProfile {
        DiseaseProfile::new(self.key, self.feature_order.iter().copied(), predictor)
            .with_field_name_map(self.field_name_map())
    }

    /// Registry entry binding this schema to a model specification
    pub fn config(&self, model: ModelSpec) -> DiseaseConfig {
        DiseaseConfig {
            key: self.key.to_string(),
            feature_order: self.feature_order.iter().map(|f| f.to_string()).collect(),
            field_name_map: self.field_name_map(),
            model,
        }
    }
}

/// Display label for a field: `radius_mean` becomes `Radius Mean`
pub fn field_label(field: &str) -> String {
    field
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
