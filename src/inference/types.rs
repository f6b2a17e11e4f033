use std::path::PathBuf;

use thiserror::Error;

use crate::models::Diagnosis;

/// Errors surfaced to callers of the prediction service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("At least one symptom is required")]
    EmptySymptoms,
}

/// Failures inside the statistical classifier path.
///
/// None of these reach the caller: the orchestrator answers with the
/// rule engine instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("Feature vector has {actual} entries, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Model has no classes or estimators")]
    EmptyModel,

    #[error("Malformed model: {0}")]
    MalformedModel(String),

    #[error("Model returned unusable probabilities: {0}")]
    InvalidProbabilities(String),

    #[error("Label decoding failed: {0}")]
    Decoder(String),
}

/// Failures while loading the model bundle at startup.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Model file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model bundle: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model bundle: {0}")]
    Invalid(String),
}

/// Outcome of one call into the statistical classifier.
pub type ClassifierOutcome = Result<Diagnosis, ClassifierError>;
