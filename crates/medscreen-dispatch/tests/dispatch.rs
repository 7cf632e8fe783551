//! Dispatcher integration tests
//!
//! Covers:
//! - Field lookup and missing-field reporting for every stock schema
//! - Field name mapping (labels change, values and order do not)
//! - Confidence selection by returned label
//! - Predictor failure containment
//! - Registry loading from disk

use medscreen_dispatch::{
    schemas, DiseaseProfile, DiseaseSchema, DispatchError, Dispatcher, FeatureRow, Label,
    LogisticModel, ModelSpec, Predictor, PredictorError, RegistryConfig, RegistryError,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

/// Predictor returning fixed output and remembering every row it saw
struct Recording {
    label: Label,
    probabilities: Vec<f64>,
    rows: Mutex<Vec<FeatureRow>>,
}

impl Recording {
    fn new(label: Label, probabilities: Vec<f64>) -> Arc<Self> {
        Arc::new(Self {
            label,
            probabilities,
            rows: Mutex::new(Vec::new()),
        })
    }

    fn last_row(&self) -> FeatureRow {
        self.rows
            .lock()
            .last()
            .cloned()
            .expect("predictor was never called")
    }
}

impl Predictor for Recording {
    fn predict_label(&self, row: &FeatureRow) -> Result<Label, PredictorError> {
        self.rows.lock().push(row.clone());
        Ok(self.label)
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<Vec<f64>, PredictorError> {
        Ok(self.probabilities.clone())
    }
}

struct Failing;

impl Predictor for Failing {
    fn predict_label(&self, row: &FeatureRow) -> Result<Label, PredictorError> {
        Err(PredictorError::ShapeMismatch {
            expected: 30,
            found: row.len(),
        })
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<Vec<f64>, PredictorError> {
        Err(PredictorError::internal("unreachable"))
    }
}

fn full_inputs(schema: &DiseaseSchema) -> HashMap<String, f64> {
    schema
        .feature_order
        .iter()
        .enumerate()
        .map(|(i, field)| (field.to_string(), (i + 1) as f64))
        .collect()
}

fn stock_dispatcher(predictor: Arc<dyn Predictor>) -> Dispatcher {
    Dispatcher::builder()
        .register_all(
            schemas::standard_schemas()
                .iter()
                .map(|schema| schema.profile(predictor.clone())),
        )
        .build()
        .unwrap()
}

// ============================================================================
// Input Schema Tests
// ============================================================================

#[rstest]
#[case::diabetes(schemas::DIABETES)]
#[case::heart(schemas::HEART)]
#[case::cancer(schemas::CANCER)]
fn test_full_input_never_missing_field(#[case] schema: DiseaseSchema) {
    let dispatcher = stock_dispatcher(Recording::new(Label::Healthy, vec![0.8, 0.2]));
    let result = dispatcher.predict(schema.key, &full_inputs(&schema));
    assert!(result.is_ok(), "{:?}", result);
}

#[rstest]
#[case::diabetes(schemas::DIABETES)]
#[case::heart(schemas::HEART)]
#[case::cancer(schemas::CANCER)]
fn test_each_omitted_field_is_named(#[case] schema: DiseaseSchema) {
    let dispatcher = stock_dispatcher(Recording::new(Label::Healthy, vec![0.8, 0.2]));
    for field in schema.feature_order {
        let mut inputs = full_inputs(&schema);
        inputs.remove(*field);
        let err = dispatcher.predict(schema.key, &inputs).unwrap_err();
        assert_eq!(err, DispatchError::missing_field(schema.key, *field));
    }
}

#[test]
fn test_extra_fields_are_ignored() {
    let recording = Recording::new(Label::Healthy, vec![0.9, 0.1]);
    let dispatcher = stock_dispatcher(recording.clone());
    let mut inputs = full_inputs(&schemas::HEART);
    inputs.insert("favourite_colour".to_string(), 3.0);

    dispatcher.predict("heart", &inputs).unwrap();
    assert_eq!(recording.last_row().names(), schemas::HEART.feature_order);
}

#[test]
fn test_cancer_mapping_changes_labels_only() {
    let recording = Recording::new(Label::AtRisk, vec![0.25, 0.75]);
    let dispatcher = stock_dispatcher(recording.clone());
    let inputs = [
        ("area_mean", 600.0),
        ("perimeter_mean", 90.0),
        ("texture_mean", 20.0),
        ("radius_mean", 14.0),
    ];

    let result = dispatcher.predict("cancer", &inputs).unwrap();
    assert_eq!(result.label, Label::AtRisk);
    assert_eq!(result.confidence, 0.75);

    let row = recording.last_row();
    assert_eq!(row.values(), [14.0, 20.0, 90.0, 600.0]);
    assert_eq!(
        row.names(),
        ["mean radius", "mean texture", "mean perimeter", "mean area"]
    );
}

#[test]
fn test_unmapped_disease_keeps_canonical_names() {
    let recording = Recording::new(Label::Healthy, vec![0.6, 0.4]);
    let dispatcher = stock_dispatcher(recording.clone());
    dispatcher
        .predict("diabetes", &full_inputs(&schemas::DIABETES))
        .unwrap();
    assert_eq!(recording.last_row().names(), schemas::DIABETES.feature_order);
}

// ============================================================================
// Confidence Tests
// ============================================================================

#[test]
fn test_confidence_is_not_max_probability() {
    // A model can return a label that is not its most probable class
    let dispatcher = stock_dispatcher(Recording::new(Label::AtRisk, vec![0.9, 0.1]));
    let result = dispatcher
        .predict("heart", &full_inputs(&schemas::HEART))
        .unwrap();
    assert_eq!(result.confidence, 0.1);
    assert_eq!(result.confidence_percent(), 10.0);
}

proptest! {
    #[test]
    fn prop_confidence_matches_returned_label(p in 0.0f64..=1.0, at_risk in any::<bool>()) {
        let label = if at_risk { Label::AtRisk } else { Label::Healthy };
        let probabilities = vec![1.0 - p, p];
        let dispatcher = stock_dispatcher(Recording::new(label, probabilities.clone()));

        let result = dispatcher.predict("heart", &full_inputs(&schemas::HEART)).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert_eq!(result.confidence, probabilities[label.index()]);
    }

    #[test]
    fn prop_missing_field_names_exact_field(idx in 0usize..8) {
        let dispatcher = stock_dispatcher(Recording::new(Label::Healthy, vec![1.0, 0.0]));
        let field = schemas::DIABETES.feature_order[idx];
        let mut inputs = full_inputs(&schemas::DIABETES);
        inputs.remove(field);

        match dispatcher.predict("diabetes", &inputs) {
            Err(DispatchError::MissingField { disease, field: missing }) => {
                prop_assert_eq!(disease, "diabetes");
                prop_assert_eq!(missing, field);
            }
            other => prop_assert!(false, "expected MissingField, got {:?}", other),
        }
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_predictor_failure_is_wrapped() {
    let dispatcher = Dispatcher::builder()
        .register(schemas::CANCER.profile(Arc::new(Failing)))
        .build()
        .unwrap();
    let inputs = full_inputs(&schemas::CANCER);

    let err = dispatcher.predict("cancer", &inputs).unwrap_err();
    assert_eq!(
        err,
        DispatchError::prediction_failed(
            "cancer",
            PredictorError::ShapeMismatch {
                expected: 30,
                found: 4
            }
        )
    );
    assert_eq!(err.code().to_string(), "MS0004");
}

#[test]
fn test_unknown_disease_leaves_dispatcher_usable() {
    let dispatcher = stock_dispatcher(Recording::new(Label::Healthy, vec![0.7, 0.3]));
    assert!(matches!(
        dispatcher.predict("malaria", &full_inputs(&schemas::HEART)),
        Err(DispatchError::UnknownDisease { .. })
    ));
    assert!(dispatcher.predict("heart", &full_inputs(&schemas::HEART)).is_ok());
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    let dispatcher = Arc::new(stock_dispatcher(Recording::new(Label::AtRisk, vec![0.4, 0.6])));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                dispatcher
                    .predict("heart", &full_inputs(&schemas::HEART))
                    .map(|r| r.confidence)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(0.6));
    }
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_registry_from_file_with_logistic_models() {
    let cancer = LogisticModel::new(
        -9.0,
        [
            ("mean radius", 0.4),
            ("mean texture", 0.1),
            ("mean perimeter", 0.02),
            ("mean area", 0.001),
        ],
    );
    let config = RegistryConfig::default()
        .with_disease(schemas::CANCER.config(ModelSpec::Logistic(cancer)));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.to_json_pretty().unwrap().as_bytes())
        .unwrap();

    let loaded = RegistryConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, config);

    let dispatcher = loaded.into_dispatcher().unwrap();
    let inputs = [
        ("radius_mean", 14.0),
        ("texture_mean", 20.0),
        ("perimeter_mean", 90.0),
        ("area_mean", 600.0),
    ];
    let result = dispatcher.predict("cancer", &inputs).unwrap();

    // z = -9 + 5.6 + 2.0 + 1.8 + 0.6 = 1.0
    let expected = 1.0 / (1.0 + (-1.0f64).exp());
    assert_eq!(result.label, Label::AtRisk);
    assert!((result.confidence - expected).abs() < 1e-9);
}

#[test]
fn test_registry_missing_file() {
    let err = RegistryConfig::from_file("/nonexistent/registry.json").unwrap_err();
    assert!(matches!(err, RegistryError::Io { .. }));
}

#[test]
fn test_logistic_model_rejects_canonical_names_without_mapping() {
    let model = LogisticModel::new(0.0, [("mean radius", 1.0)]);
    let err = Dispatcher::builder()
        .register(DiseaseProfile::new("cancer", ["radius_mean"], Arc::new(model)))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::SchemaMismatch {
            disease: "cancer".into(),
            expected: vec!["mean radius".into()],
            found: vec!["radius_mean".into()],
        }
    );
}
