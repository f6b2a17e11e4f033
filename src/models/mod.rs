pub mod enums;
pub mod prediction;
pub mod symptom;

pub use enums::{Disease, Engine, InvalidEnum};
pub use prediction::{round_confidence, Diagnosis, DiseaseRecord, PredictionResult};
pub use symptom::SymptomSet;
