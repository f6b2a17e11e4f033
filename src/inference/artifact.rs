//! Model bundle produced by the offline training pipeline.
//!
//! ```json
//! {
//!   "model": { "kind": "random_forest", ... },
//!   "label_decoder": { "classes": ["Common Cold", ...] },
//!   "symptom_list": ["fever", "headache", ...]
//! }
//! ```
//!
//! `symptom_list` is the training-time feature order and is used verbatim
//! at inference. When absent, the canonical vocabulary order is assumed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::{ClassifierAdapter, LabelDecoder};
use super::estimators::ClassifierSpec;
use super::reference::CANONICAL_SYMPTOMS;
use super::types::ArtifactError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: ClassifierSpec,
    #[serde(default)]
    pub label_decoder: Option<LabelDecoder>,
    #[serde(default)]
    pub symptom_list: Option<Vec<String>>,
}

impl ModelArtifact {
    /// Read and parse a bundle from disk.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the model structure and build the serving adapter.
    ///
    /// A symptom list whose length differs from the model's feature count
    /// is accepted here; every prediction then fails with a shape error
    /// and is answered by the rule engine.
    pub fn into_adapter(self) -> Result<ClassifierAdapter, ArtifactError> {
        let kind = self.model.kind();
        let classifier = self.model.into_classifier();
        classifier
            .validate()
            .map_err(|e| ArtifactError::Invalid(e.to_string()))?;

        let symptom_order = self
            .symptom_list
            .unwrap_or_else(|| CANONICAL_SYMPTOMS.iter().map(|s| s.to_string()).collect());

        if symptom_order.len() != classifier.n_features() {
            tracing::warn!(
                symptom_list = symptom_order.len(),
                n_features = classifier.n_features(),
                "Model feature count does not match its symptom list"
            );
        }

        if let Some(decoder) = &self.label_decoder {
            if decoder.classes.len() < classifier.classes().len() {
                tracing::warn!(
                    decoder_classes = decoder.classes.len(),
                    model_classes = classifier.classes().len(),
                    "Label decoder knows fewer classes than the model"
                );
            }
        } else {
            tracing::info!("Model bundle has no label decoder, raw labels will be used");
        }

        tracing::debug!(
            kind,
            n_features = classifier.n_features(),
            n_classes = classifier.classes().len(),
            "Model bundle validated"
        );

        Ok(ClassifierAdapter::new(
            classifier,
            self.label_decoder,
            symptom_order,
        ))
    }
}

/// Load a bundle and build its adapter in one step.
pub fn load_classifier(path: &Path) -> Result<ClassifierAdapter, ArtifactError> {
    ModelArtifact::load(path)?.into_adapter()
}
