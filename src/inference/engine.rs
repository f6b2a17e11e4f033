use std::time::Instant;

use crate::config::ServiceConfig;
use crate::models::{Diagnosis, PredictionResult, SymptomSet};

use super::artifact::load_classifier;
use super::classifier::ClassifierAdapter;
use super::normalize::normalize_symptoms;
use super::reference::lookup_record;
use super::rules::{RuleCandidate, RuleScorer};
use super::types::{ArtifactError, InferenceError};

/// Per-process prediction service.
///
/// Built once at startup and shared read-only across requests. The model
/// is optional: without it every request is served by the rule engine.
#[derive(Debug)]
pub struct PredictionService {
    model: Option<ClassifierAdapter>,
    rules: RuleScorer,
}

impl PredictionService {
    /// Rule engine only.
    pub fn fallback_only() -> Self {
        Self {
            model: None,
            rules: RuleScorer::new(),
        }
    }

    pub fn with_model(model: ClassifierAdapter) -> Self {
        Self {
            model: Some(model),
            rules: RuleScorer::new(),
        }
    }

    /// Load the configured model, degrading to fallback mode on any error.
    ///
    /// Loading is attempted exactly once; there is no retry.
    pub fn initialize(config: &ServiceConfig) -> Self {
        let Some(path) = config.model_path.as_deref() else {
            tracing::warn!("No model bundle configured, using fallback prediction");
            return Self::fallback_only();
        };

        match load_classifier(path) {
            Ok(model) => {
                tracing::info!(path = %path.display(), "Model loaded successfully");
                Self::with_model(model)
            }
            Err(ArtifactError::NotFound(path)) => {
                tracing::info!(path = %path.display(), "Model file not found, using fallback prediction");
                Self::fallback_only()
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading model, using fallback prediction");
                Self::fallback_only()
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn rules(&self) -> &RuleScorer {
        &self.rules
    }

    /// Every disease profile sharing a symptom with the input, best match
    /// first. Independent of the trained model.
    pub fn search<S: AsRef<str>>(&self, raw: &[S]) -> Result<Vec<RuleCandidate>, InferenceError> {
        if raw.is_empty() {
            return Err(InferenceError::EmptySymptoms);
        }

        let symptoms = normalize_symptoms(raw);
        let ranked = self.rules.rank(&symptoms);
        tracing::debug!(
            symptoms = symptoms.len(),
            matches = ranked.len(),
            "Disease search complete"
        );
        Ok(ranked)
    }

    /// Predict a disease for raw client symptom strings.
    ///
    /// Only an empty list is an error. Model failures are answered by the
    /// rule engine.
    pub fn predict<S: AsRef<str>>(&self, raw: &[S]) -> Result<PredictionResult, InferenceError> {
        if raw.is_empty() {
            return Err(InferenceError::EmptySymptoms);
        }

        let start = Instant::now();
        let symptoms = normalize_symptoms(raw);
        let diagnosis = self.diagnose(&symptoms);
        let record = lookup_record(&diagnosis.disease, diagnosis.engine);

        tracing::info!(
            engine = %diagnosis.engine,
            disease = %diagnosis.disease,
            confidence = diagnosis.confidence,
            symptoms = symptoms.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Prediction complete"
        );

        Ok(PredictionResult::new(diagnosis, record))
    }

    fn diagnose(&self, symptoms: &SymptomSet) -> Diagnosis {
        let Some(model) = &self.model else {
            return self.rules.predict(symptoms);
        };

        match model.predict(symptoms) {
            Ok(diagnosis) => diagnosis,
            Err(reason) => {
                tracing::warn!(error = %reason, "Model prediction failed, using rule engine");
                if tracing::enabled!(tracing::Level::DEBUG) {
                    let ranked = self.rules.rank(symptoms);
                    tracing::debug!(candidates = ?ranked, "Rule engine ranking");
                }
                self.rules.predict(symptoms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::classifier::{ClassLabel, LabelDecoder, SymptomClassifier};
    use crate::inference::reference::CANONICAL_SYMPTOMS;
    use crate::inference::types::ClassifierError;
    use std::io::Write;
    use std::path::PathBuf;

    struct FixedModel {
        classes: Vec<ClassLabel>,
        proba: Result<Vec<f64>, ClassifierError>,
    }

    impl SymptomClassifier for FixedModel {
        fn n_features(&self) -> usize {
            CANONICAL_SYMPTOMS.len()
        }

        fn classes(&self) -> &[ClassLabel] {
            &self.classes
        }

        fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
            self.check_shape(features)?;
            self.proba.clone()
        }
    }

    fn service(
        classes: Vec<ClassLabel>,
        proba: Result<Vec<f64>, ClassifierError>,
        decoder: Option<LabelDecoder>,
    ) -> PredictionService {
        PredictionService::with_model(ClassifierAdapter::new(
            Box::new(FixedModel { classes, proba }),
            decoder,
            CANONICAL_SYMPTOMS.iter().map(|s| s.to_string()).collect(),
        ))
    }

    const COLD: [&str; 5] = ["cough", "runny_nose", "sore_throat", "sneezing", "congestion"];

    #[test]
    fn empty_input_is_rejected_without_model() {
        let svc = PredictionService::fallback_only();
        assert_eq!(
            svc.predict::<&str>(&[]).unwrap_err(),
            InferenceError::EmptySymptoms
        );
    }

    #[test]
    fn empty_input_is_rejected_with_model() {
        let svc = service(vec![ClassLabel::Index(0)], Ok(vec![1.0]), None);
        assert_eq!(
            svc.predict::<String>(&[]).unwrap_err().to_string(),
            "At least one symptom is required"
        );
    }

    #[test]
    fn fallback_full_cold_match() {
        let svc = PredictionService::fallback_only();
        let result = svc.predict(&COLD).unwrap();
        assert_eq!(result.disease, "Common Cold");
        assert_eq!(result.confidence, 95.0);
        assert_eq!(result.specialist, "General Physician");
        assert_eq!(result.precautions[2], "Gargle with warm salt water");
    }

    #[test]
    fn fallback_sentinel_gets_rule_advisory() {
        let svc = PredictionService::fallback_only();
        let result = svc.predict(&["numbness"]).unwrap();
        assert_eq!(result.disease, "General Health Concern");
        assert_eq!(result.confidence, 50.0);
        assert_eq!(result.specialist, "General Physician");
        assert_eq!(result.precautions.len(), 4);
        assert!(result
            .precautions
            .iter()
            .any(|p| p.starts_with("Seek medical advice")));
    }

    #[test]
    fn model_prediction_is_used_when_it_succeeds() {
        let svc = service(
            vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            Ok(vec![0.02, 0.98]),
            Some(LabelDecoder {
                classes: vec!["Common Cold".into(), "Hypertension".into()],
            }),
        );
        let result = svc.predict(&COLD).unwrap();
        assert_eq!(result.disease, "Hypertension");
        assert_eq!(result.confidence, 98.0);
        assert_eq!(result.specialist, "Cardiologist");
    }

    #[test]
    fn unknown_model_label_gets_model_advisory() {
        let svc = service(
            vec![ClassLabel::Name("Food Poisoning".into())],
            Ok(vec![1.0]),
            None,
        );
        let result = svc.predict(&["vomiting"]).unwrap();
        assert_eq!(result.disease, "Food Poisoning");
        assert_eq!(result.confidence, 100.0);
        assert_eq!(result.precautions, vec!["Seek medical advice".to_string()]);
        assert_eq!(result.specialist, "General Physician");
    }

    #[test]
    fn model_failure_falls_back_to_rules() {
        let svc = service(
            vec![ClassLabel::Index(0)],
            Err(ClassifierError::InvalidProbabilities("boom".into())),
            None,
        );
        let result = svc.predict(&COLD).unwrap();
        assert_eq!(result.disease, "Common Cold");
        assert_eq!(result.confidence, 95.0);
    }

    #[test]
    fn decoder_failure_falls_back_to_rules() {
        let svc = service(
            vec![ClassLabel::Index(4)],
            Ok(vec![1.0]),
            Some(LabelDecoder { classes: vec![] }),
        );
        let result = svc.predict(&["nausea"]).unwrap();
        assert_eq!(result.disease, "Migraine");
        assert_eq!(result.confidence, 25.0);
    }

    #[test]
    fn unvalidated_malformed_forest_falls_back_to_rules() {
        use crate::inference::estimators::{DecisionTree, RandomForest};

        let forest = RandomForest {
            n_features: CANONICAL_SYMPTOMS.len(),
            classes: vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            trees: vec![DecisionTree {
                children_left: vec![1, -1, -1],
                children_right: vec![2, -1, -1],
                feature: vec![0, -2, -2],
                threshold: vec![],
                value: vec![vec![1.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            }],
        };
        let svc = PredictionService::with_model(ClassifierAdapter::new(
            Box::new(forest),
            None,
            CANONICAL_SYMPTOMS.iter().map(|s| s.to_string()).collect(),
        ));

        let result = svc.predict(&["itching"]).unwrap();
        assert_eq!(result.disease, "Eczema");
        assert_eq!(result.confidence, 33.3);
    }

    #[test]
    fn confidence_stays_in_range() {
        let svc = PredictionService::fallback_only();
        let inputs: Vec<Vec<&str>> = vec![
            vec!["fever"],
            vec!["headache", "nausea", "blurred_vision", "dizziness"],
            CANONICAL_SYMPTOMS.to_vec(),
            vec!["??"],
        ];
        for input in inputs {
            let result = svc.predict(&input).unwrap();
            assert!((0.0..=100.0).contains(&result.confidence));
            assert!(result.confidence <= 95.0 || result.disease == "General Health Concern");
        }
    }

    #[test]
    fn search_rejects_empty_input() {
        let svc = PredictionService::fallback_only();
        assert_eq!(
            svc.search::<&str>(&[]).unwrap_err(),
            InferenceError::EmptySymptoms
        );
    }

    #[test]
    fn search_ignores_the_model() {
        let svc = service(vec![ClassLabel::Index(0)], Ok(vec![1.0]), None);
        let ranked = svc.search(&["Skin Rash", "itching"]).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].matched, vec!["skin_rash", "itching"]);
    }

    #[test]
    fn initialize_without_model_path_is_fallback() {
        let svc = PredictionService::initialize(&ServiceConfig::default());
        assert!(!svc.model_loaded());
    }

    #[test]
    fn initialize_with_missing_file_is_fallback() {
        let config = ServiceConfig {
            model_path: Some(PathBuf::from("/nonexistent/disease_predictor.json")),
            ..ServiceConfig::default()
        };
        assert!(!PredictionService::initialize(&config).model_loaded());
    }

    #[test]
    fn initialize_with_corrupt_file_is_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"model\": 42}").unwrap();
        let config = ServiceConfig {
            model_path: Some(file.path().to_path_buf()),
            ..ServiceConfig::default()
        };
        let svc = PredictionService::initialize(&config);
        assert!(!svc.model_loaded());
        assert_eq!(svc.predict(&["itching"]).unwrap().disease, "Eczema");
    }

    #[test]
    fn initialize_with_valid_bundle_loads_model() {
        let bundle = serde_json::json!({
            "model": {
                "kind": "linear",
                "classes": [0, 1],
                "coefficients": [vec![0.0; 37], vec![0.0; 37]],
                "intercepts": [0.0, 2.0]
            },
            "label_decoder": {"classes": ["Asthma", "Eczema"]}
        });
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bundle.to_string().as_bytes()).unwrap();
        let config = ServiceConfig {
            model_path: Some(file.path().to_path_buf()),
            ..ServiceConfig::default()
        };

        let svc = PredictionService::initialize(&config);
        assert!(svc.model_loaded());
        let result = svc.predict(&["cough"]).unwrap();
        assert_eq!(result.disease, "Eczema");
        // softmax([0, 2])[1] = 0.8808
        assert_eq!(result.confidence, 88.1);
        assert_eq!(result.specialist, "Dermatologist");
    }
}
