//! Medscreen command-line interface

use clap::{Parser, Subcommand};
use medscreen::cli::{check, diseases, output, predict};
use std::path::PathBuf;

/// Medical screening tool
#[derive(Parser)]
#[command(name = "medscreen")]
#[command(author, version, about = "Disease risk prediction and symptom checking", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(long, global = true)]
    verbose: bool,

    /// Output format (text, json, pretty, table)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the risk label for a disease
    Predict {
        /// Disease key (e.g. diabetes, heart, cancer)
        disease: String,

        /// Registry file describing the disease models (JSON)
        #[arg(short, long, env = "MEDSCREEN_REGISTRY")]
        registry: PathBuf,

        /// Field values (name=value)
        #[arg(short = 'v', long = "value")]
        values: Vec<String>,
    },

    /// List the diseases a registry provides
    Diseases {
        /// Registry file describing the disease models (JSON)
        #[arg(short, long, env = "MEDSCREEN_REGISTRY")]
        registry: PathBuf,
    },

    /// Run the interactive symptom checker
    Check,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output_format = output::OutputFormat::parse(cli.format.as_deref());

    let result = match cli.command {
        Commands::Predict {
            disease,
            registry,
            values,
        } => predict::predict(predict::PredictConfig {
            disease,
            registry,
            values,
            verbose: cli.verbose,
            output_format,
        }),

        Commands::Diseases { registry } => diseases::list(diseases::DiseasesConfig {
            registry,
            output_format,
        }),

        Commands::Check => check::run(),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
