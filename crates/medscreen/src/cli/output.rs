//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use medscreen_diagnostics::{Diagnostic, MedscreenError};
use serde_json::Value;
use std::io::IsTerminal;

#[cfg(feature = "cli")]
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
    Table,
}

impl OutputFormat {
    /// Parse a `--format` value; anything unrecognized falls back to text
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(str::to_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("pretty") | Some("json-pretty") => Self::JsonPretty,
            Some("table") => Self::Table,
            _ => Self::Text,
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty)
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stdout().is_terminal()),
    }
}

/// Format an error for display
///
/// Medscreen errors are rendered as diagnostics, with their code and help.
pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<MedscreenError>() {
        Some(err) => format_diagnostic(&err.to_diagnostic()),
        None => format!("{} {}", "Error:".red().bold(), error),
    }
}

/// Format a diagnostic for display
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut out = format!(
        "{} {} {}",
        "Error:".red().bold(),
        format!("[{}]", diagnostic.code).as_str().dimmed(),
        diagnostic.message
    );
    if let Some(help) = &diagnostic.help {
        out.push_str(&format!("\n  {} {}", "help:".cyan(), help));
    }
    out
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Render rows as a table
#[cfg(feature = "cli")]
pub fn format_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::modern()).to_string()
}
