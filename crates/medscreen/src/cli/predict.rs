//! Predict command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use colored::Colorize;
use indexmap::IndexMap;
use medscreen_diagnostics::MedscreenError;
use medscreen_dispatch::{PredictionResult, field_label, schemas};
use serde_json::json;
use std::path::PathBuf;

/// Configuration for predict command
pub struct PredictConfig {
    pub disease: String,
    pub registry: PathBuf,
    /// Submitted values (name=value)
    pub values: Vec<String>,
    pub verbose: bool,
    pub output_format: OutputFormat,
}

/// Predict the risk label for one disease
pub fn predict(config: PredictConfig) -> Result<()> {
    let dispatcher = crate::load_dispatcher(&config.registry)?;

    if config.verbose {
        eprintln!(
            "Loaded {} disease model(s) from {}",
            dispatcher.len(),
            config.registry.display()
        );
    }

    let values = parse_values(&config.values)?;

    if let Some(profile) = dispatcher.profile(&config.disease) {
        let feature_order = profile.feature_order();
        for name in values.keys().filter(|name| !feature_order.contains(*name)) {
            eprintln!(
                "{}",
                output::format_warning(&format!(
                    "Ignoring '{}', not a field of {}",
                    name, config.disease
                ))
            );
        }
    }

    let result = dispatcher
        .predict(&config.disease, &values)
        .map_err(MedscreenError::from)?;

    print_result(&result, config.output_format)
}

/// Parse `name=value` pairs into numeric field values
pub fn parse_values(values: &[String]) -> Result<IndexMap<String, f64>> {
    let mut result = IndexMap::with_capacity(values.len());

    for value in values {
        let (name, raw) = value
            .split_once('=')
            .with_context(|| format!("Invalid value format: '{}'. Expected 'name=value'", value))?;

        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Invalid value format: '{}'. Field name is empty", value);
        }

        let number: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("Value of '{}' is not a number: '{}'", name, raw.trim()))?;

        if result.insert(name.to_string(), number).is_some() {
            anyhow::bail!("Field '{}' given more than once", name);
        }
    }

    Ok(result)
}

fn print_result(result: &PredictionResult, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        let value = json!({
            "disease": result.disease,
            "label": result.label.to_string(),
            "summary": result.label.summary(),
            "confidence": result.confidence,
            "confidence_percent": result.confidence_percent(),
        });
        println!("{}", output::format_json(&value, format == OutputFormat::JsonPretty)?);
        return Ok(());
    }

    let title = schemas::schema(&result.disease)
        .map(|schema| schema.title.to_string())
        .unwrap_or_else(|| field_label(&result.disease));
    let summary = if result.is_at_risk() {
        result.label.summary().red().bold()
    } else {
        result.label.summary().green().bold()
    };

    println!("{}", title.as_str().cyan().bold());
    println!("{}", summary);
    println!("Confidence: {}%", result.confidence_percent());
    Ok(())
}
