//! Medscreen Diagnostic Dispatcher
//!
//! Routes numeric form submissions to the binary classifier registered for a
//! disease and reports the predicted label with its confidence.
//!
//! - **Profiles**: a disease key bound to its ordered input schema, an optional
//!   canonical-to-model field name map, and a [`Predictor`]
//! - **Dispatcher**: a validated, read-only registry of profiles; adding a
//!   disease means adding a profile, never new branching
//! - **Predictors**: any type implementing label-for-row and
//!   probabilities-for-row; [`LogisticModel`] is provided
//! - **Configuration**: [`RegistryConfig`] registers diseases from JSON
//!
//! # Example
//!
//! ```ignore
//! use medscreen_dispatch::{schemas, Dispatcher};
//!
//! let dispatcher = Dispatcher::builder()
//!     .register(schemas::HEART.profile(heart_model))
//!     .build()?;
//!
//! let result = dispatcher.predict("heart", &inputs)?;
//! println!("{} ({}%)", result.label.summary(), result.confidence_percent());
//! ```
//!
//! # Confidence
//!
//! `confidence` is the probability the model assigns to the label it
//! returned, not the probability of the at-risk class.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logistic;
pub mod predictor;
pub mod profile;
pub mod schemas;

pub use config::{DiseaseConfig, ModelSpec, RegistryConfig};
pub use dispatcher::{Dispatcher, DispatcherBuilder, PredictionResult};
pub use error::{DispatchError, DispatchResult, PredictorError, RegistryError};
pub use logistic::LogisticModel;
pub use predictor::{FeatureRow, Label, Predictor};
pub use profile::{DiseaseProfile, FieldValues};
pub use schemas::{DiseaseSchema, field_label, standard_schemas};
