//! Disease profiles: a disease key bound to its input schema and predictor

use crate::error::{DispatchError, DispatchResult, RegistryError};
use crate::predictor::{FeatureRow, Predictor};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Source of submitted field values
pub trait FieldValues {
    /// Value submitted for `field`, if any
    fn field_value(&self, field: &str) -> Option<f64>;
}

impl<S: BuildHasher> FieldValues for HashMap<String, f64, S> {
    fn field_value(&self, field: &str) -> Option<f64> {
        self.get(field).copied()
    }
}

impl<S: BuildHasher> FieldValues for IndexMap<String, f64, S> {
    fn field_value(&self, field: &str) -> Option<f64> {
        self.get(field).copied()
    }
}

impl FieldValues for BTreeMap<String, f64> {
    fn field_value(&self, field: &str) -> Option<f64> {
        self.get(field).copied()
    }
}

impl FieldValues for [(&str, f64)] {
    fn field_value(&self, field: &str) -> Option<f64> {
        self.iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }
}

impl<const N: usize> FieldValues for [(&str, f64); N] {
    fn field_value(&self, field: &str) -> Option<f64> {
        self.as_slice().field_value(field)
    }
}

/// Static descriptor binding a disease key to its schema and predictor
#[derive(Clone)]
pub struct DiseaseProfile {
    key: String,
    feature_order: Vec<String>,
    field_name_map: IndexMap<String, String>,
    predictor: Arc<dyn Predictor>,
}

impl DiseaseProfile {
    /// Create a profile with an identity field name mapping
    pub fn new<I, S>(key: impl Into<String>, feature_order: I, predictor: Arc<dyn Predictor>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            feature_order: feature_order.into_iter().map(Into::into).collect(),
            field_name_map: IndexMap::new(),
            predictor,
        }
    }

    /// Rename one canonical field to the model's column name
    pub fn with_field_name(mut self, canonical: impl Into<String>, model_name: impl Into<String>) -> Self {
        self.field_name_map.insert(canonical.into(), model_name.into());
        self
    }

    /// Replace the whole field name map
    pub fn with_field_name_map(mut self, map: IndexMap<String, String>) -> Self {
        self.field_name_map = map;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Canonical field names in model order
    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    pub fn field_name_map(&self) -> &IndexMap<String, String> {
        &self.field_name_map
    }

    pub fn predictor(&self) -> &Arc<dyn Predictor> {
        &self.predictor
    }

    /// Model column name for a canonical field
    pub fn model_feature_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.field_name_map
            .get(canonical)
            .map(String::as_str)
            .unwrap_or(canonical)
    }

    /// Model column names in model order
    pub fn model_feature_names(&self) -> Vec<String> {
        self.feature_order
            .iter()
            .map(|field| self.model_feature_name(field).to_string())
            .collect()
    }

    /// Read `raw_inputs` in schema order and label the row for the model
    pub fn build_row(&self, raw_inputs: &(impl FieldValues + ?Sized)) -> DispatchResult<FeatureRow> {
        let mut row = FeatureRow::with_capacity(self.feature_order.len());
        for field in &self.feature_order {
            let value = raw_inputs
                .field_value(field)
                .ok_or_else(|| DispatchError::missing_field(&self.key, field))?;
            if !value.is_finite() {
                return Err(DispatchError::InvalidFieldValue {
                    disease: self.key.clone(),
                    field: field.clone(),
                    value,
                });
            }
            row.push(field.clone(), value);
        }

        if self.field_name_map.is_empty() {
            Ok(row)
        } else {
            Ok(row.renamed(&self.field_name_map))
        }
    }

    /// Check the schema against itself and against the predictor
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.feature_order.is_empty() {
            return Err(RegistryError::EmptySchema {
                disease: self.key.clone(),
            });
        }

        let mut seen = IndexSet::with_capacity(self.feature_order.len());
        for field in &self.feature_order {
            if !seen.insert(field.as_str()) {
                return Err(RegistryError::DuplicateField {
                    disease: self.key.clone(),
                    field: field.clone(),
                });
            }
        }

        if let Some(field) = self.field_name_map.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(RegistryError::UnmappedFieldName {
                disease: self.key.clone(),
                field: field.clone(),
            });
        }

        let model_names = self.model_feature_names();
        let mut seen_model = IndexSet::with_capacity(model_names.len());
        for name in &model_names {
            if !seen_model.insert(name.as_str()) {
                return Err(RegistryError::DuplicateField {
                    disease: self.key.clone(),
                    field: name.clone(),
                });
            }
        }

        if let Some(expected) = self.predictor.expected_features() {
            if expected != model_names {
                return Err(RegistryError::SchemaMismatch {
                    disease: self.key.clone(),
                    expected,
                    found: model_names,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for DiseaseProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiseaseProfile")
            .field("key", &self.key)
            .field("feature_order", &self.feature_order)
            .field("field_name_map", &self.field_name_map)
            .finish_non_exhaustive()
    }
}
