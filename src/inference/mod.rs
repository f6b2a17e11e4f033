//! Symptom-to-disease inference.
//!
//! Raw strings are normalized into a `SymptomSet`, scored by the trained
//! classifier when one is loaded, and otherwise (or when the classifier
//! fails) by the rule engine. The winning name is joined with the static
//! reference dataset.

pub mod artifact;
pub mod classifier;
pub mod engine;
pub mod estimators;
pub mod normalize;
pub mod reference;
pub mod rules;
pub mod types;

pub use classifier::{ClassLabel, ClassifierAdapter, LabelDecoder, SymptomClassifier};
pub use engine::PredictionService;
pub use types::{ArtifactError, ClassifierError, InferenceError};
