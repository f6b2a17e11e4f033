//! Statistical classifier adapter.
//!
//! Turns a symptom set into the binary feature vector the model was
//! trained on, asks the model for class probabilities and decodes the
//! winning label into a disease name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{round_confidence, Diagnosis, Engine, SymptomSet};

use super::types::{ClassifierError, ClassifierOutcome};

/// A pre-trained probabilistic classifier over binary symptom features.
pub trait SymptomClassifier: Send + Sync {
    /// Feature vector length the model was trained on.
    fn n_features(&self) -> usize;

    /// Class labels, index-aligned with `predict_proba` output.
    fn classes(&self) -> &[ClassLabel];

    /// Structural checks, run once when the model is loaded.
    fn validate(&self) -> Result<(), ClassifierError> {
        Ok(())
    }

    /// Per-class probabilities for one sample.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;

    fn check_shape(&self, features: &[f64]) -> Result<(), ClassifierError> {
        if features.len() != self.n_features() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        Ok(())
    }
}

/// Raw class label as stored in the model: an encoded index or a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Index(u64),
    Name(String),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

/// Maps encoded class indices back to disease names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDecoder {
    pub classes: Vec<String>,
}

impl LabelDecoder {
    pub fn decode(&self, label: &ClassLabel) -> Result<String, ClassifierError> {
        match label {
            ClassLabel::Index(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| self.classes.get(i))
                .cloned()
                .ok_or_else(|| {
                    ClassifierError::Decoder(format!(
                        "index {i} outside {} known classes",
                        self.classes.len()
                    ))
                }),
            ClassLabel::Name(name) => Err(ClassifierError::Decoder(format!(
                "label {name:?} is not an encoded index"
            ))),
        }
    }
}

/// Binary feature vector: slot `i` is 1.0 when `order[i]` is present.
pub fn build_feature_vector<S: AsRef<str>>(symptoms: &SymptomSet, order: &[S]) -> Vec<f64> {
    order
        .iter()
        .map(|s| if symptoms.contains(s.as_ref()) { 1.0 } else { 0.0 })
        .collect()
}

/// Index of the highest probability; the first one wins on ties.
fn argmax(proba: &[f64]) -> Option<usize> {
    proba
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
            Some((_, bp)) if p <= bp => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}

/// Loaded model plus the metadata needed to serve it.
pub struct ClassifierAdapter {
    classifier: Box<dyn SymptomClassifier>,
    decoder: Option<LabelDecoder>,
    symptom_order: Vec<String>,
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("n_features", &self.classifier.n_features())
            .field("n_classes", &self.classifier.classes().len())
            .field("has_decoder", &self.decoder.is_some())
            .field("symptom_order_len", &self.symptom_order.len())
            .finish()
    }
}

impl ClassifierAdapter {
    /// `symptom_order` must be the training-time feature order.
    pub fn new(
        classifier: Box<dyn SymptomClassifier>,
        decoder: Option<LabelDecoder>,
        symptom_order: Vec<String>,
    ) -> Self {
        Self {
            classifier,
            decoder,
            symptom_order,
        }
    }

    pub fn symptom_order(&self) -> &[String] {
        &self.symptom_order
    }

    pub fn has_decoder(&self) -> bool {
        self.decoder.is_some()
    }

    pub fn feature_vector(&self, symptoms: &SymptomSet) -> Vec<f64> {
        build_feature_vector(symptoms, &self.symptom_order)
    }

    /// Run the model. Any failure is returned, never panicked on.
    pub fn predict(&self, symptoms: &SymptomSet) -> ClassifierOutcome {
        let features = self.feature_vector(symptoms);
        let proba = self.classifier.predict_proba(&features)?;

        let classes = self.classifier.classes();
        if proba.len() != classes.len() {
            return Err(ClassifierError::InvalidProbabilities(format!(
                "{} probabilities for {} classes",
                proba.len(),
                classes.len()
            )));
        }
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(ClassifierError::InvalidProbabilities(
                "non-finite probability".into(),
            ));
        }

        let best = argmax(&proba).ok_or(ClassifierError::EmptyModel)?;
        let label = &classes[best];

        let disease = match &self.decoder {
            Some(decoder) => decoder.decode(label)?,
            None => label.to_string(),
        };

        let confidence = round_confidence(proba[best] * 100.0).clamp(0.0, 100.0);

        Ok(Diagnosis {
            disease,
            confidence,
            engine: Engine::Statistical,
        })
    }
}
