//! Diseases command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use medscreen_dispatch::{DiseaseProfile, Dispatcher, field_label};
use serde_json::{Value, json};
use std::path::PathBuf;
use tabled::Tabled;

/// Configuration for diseases command
pub struct DiseasesConfig {
    pub registry: PathBuf,
    pub output_format: OutputFormat,
}

#[derive(Tabled)]
struct DiseaseRow {
    #[tabled(rename = "Disease")]
    disease: String,
    #[tabled(rename = "Fields")]
    fields: String,
    #[tabled(rename = "Model columns")]
    columns: String,
}

impl From<&DiseaseProfile> for DiseaseRow {
    fn from(profile: &DiseaseProfile) -> Self {
        Self {
            disease: profile.key().to_string(),
            fields: profile
                .feature_order()
                .iter()
                .map(|field| field_label(field))
                .collect::<Vec<_>>()
                .join(", "),
            columns: profile.model_feature_names().join(", "),
        }
    }
}

/// List the diseases a registry provides
pub fn list(config: DiseasesConfig) -> Result<()> {
    let dispatcher = crate::load_dispatcher(&config.registry)?;
    println!("{}", render(&dispatcher, config.output_format)?);
    Ok(())
}

/// Render the registered diseases in the requested format
pub fn render(dispatcher: &Dispatcher, format: OutputFormat) -> Result<String> {
    if format.is_json() {
        return output::format_json(&to_json(dispatcher), format == OutputFormat::JsonPretty);
    }
    if dispatcher.is_empty() {
        return Ok("(no diseases registered)".to_string());
    }
    Ok(output::format_table(dispatcher.diseases().map(DiseaseRow::from)))
}

fn to_json(dispatcher: &Dispatcher) -> Value {
    Value::Array(
        dispatcher
            .diseases()
            .map(|profile| {
                json!({
                    "disease": profile.key(),
                    "fields": profile.feature_order(),
                    "field_name_map": profile.field_name_map(),
                })
            })
            .collect(),
    )
}
