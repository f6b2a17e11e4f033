use serde::{Deserialize, Serialize};

use super::enums::Engine;

/// Guidance attached to a disease: description, precautions, specialist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub description: String,
    pub precautions: Vec<String>,
    pub specialist: String,
}

/// Disease label and confidence produced by one of the engines.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub disease: String,
    /// Percentage, rounded to one decimal place.
    pub confidence: f64,
    pub engine: Engine,
}

/// Final response returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease: String,
    pub confidence: f64,
    pub description: String,
    pub precautions: Vec<String>,
    pub specialist: String,
}

impl PredictionResult {
    pub fn new(diagnosis: Diagnosis, record: DiseaseRecord) -> Self {
        Self {
            disease: diagnosis.disease,
            confidence: diagnosis.confidence,
            description: record.description,
            precautions: record.precautions,
            specialist: record.specialist,
        }
    }
}

/// Round a percentage to one decimal place.
pub fn round_confidence(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_confidence(66.666_666), 66.7);
        assert_eq!(round_confidence(16.666_666), 16.7);
        assert_eq!(round_confidence(95.0), 95.0);
        assert_eq!(round_confidence(0.04), 0.0);
    }

    #[test]
    fn result_serializes_with_flat_fields() {
        let result = PredictionResult::new(
            Diagnosis {
                disease: "Migraine".into(),
                confidence: 50.0,
                engine: Engine::RuleBased,
            },
            DiseaseRecord {
                description: "Headache disorder".into(),
                precautions: vec!["Rest".into()],
                specialist: "Neurologist".into(),
            },
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["disease"], "Migraine");
        assert_eq!(json["confidence"], 50.0);
        assert_eq!(json["precautions"][0], "Rest");
        assert_eq!(json["specialist"], "Neurologist");
        assert!(json.get("engine").is_none());
    }
}
