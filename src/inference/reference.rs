//! Static reference dataset: disease guidance and the canonical symptom
//! vocabulary.
//!
//! Records are bound to `Disease` through an exhaustive match, so adding a
//! disease without guidance fails to compile.

use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::{Disease, DiseaseRecord, Engine};

/// Canonical symptom vocabulary, in feature-vector order.
///
/// This order is shared with the training pipeline. Reordering it silently
/// breaks any model bundle that does not carry its own symptom list.
pub const CANONICAL_SYMPTOMS: &[&str] = &[
    "fever",
    "headache",
    "cough",
    "fatigue",
    "nausea",
    "vomiting",
    "diarrhea",
    "chest_pain",
    "shortness_of_breath",
    "dizziness",
    "joint_pain",
    "muscle_pain",
    "sore_throat",
    "runny_nose",
    "skin_rash",
    "abdominal_pain",
    "loss_of_appetite",
    "weight_loss",
    "blurred_vision",
    "anxiety",
    "depression",
    "insomnia",
    "back_pain",
    "swelling",
    "itching",
    "sneezing",
    "congestion",
    "chills",
    "sweating",
    "palpitations",
    "frequent_urination",
    "excessive_thirst",
    "numbness",
    "tingling",
    "weakness",
    "confusion",
    "memory_loss",
];

/// Borrowed view of a disease's guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub description: &'static str,
    pub precautions: &'static [&'static str],
    pub specialist: &'static str,
}

impl DiseaseInfo {
    pub fn to_record(&self) -> DiseaseRecord {
        DiseaseRecord {
            description: self.description.to_string(),
            precautions: self.precautions.iter().map(|p| p.to_string()).collect(),
            specialist: self.specialist.to_string(),
        }
    }
}

impl Serialize for DiseaseInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("description", self.description)?;
        map.serialize_entry("precautions", self.precautions)?;
        map.serialize_entry("specialist", self.specialist)?;
        map.end()
    }
}

/// Advisory used when the rule engine's winner has no record.
const RULE_ADVISORY: DiseaseInfo = DiseaseInfo {
    description: "Please consult a healthcare professional for proper diagnosis.",
    precautions: &[
        "Rest well",
        "Stay hydrated",
        "Monitor symptoms",
        "Seek medical advice if symptoms persist",
    ],
    specialist: "General Physician",
};

/// Advisory used when a model label has no record.
const MODEL_ADVISORY: DiseaseInfo = DiseaseInfo {
    description: "Please consult a healthcare professional.",
    precautions: &["Seek medical advice"],
    specialist: "General Physician",
};

/// Generic advisory for a disease name missing from the dataset.
pub fn generic_advisory(engine: Engine) -> DiseaseInfo {
    match engine {
        Engine::RuleBased => RULE_ADVISORY,
        Engine::Statistical => MODEL_ADVISORY,
    }
}

/// Guidance for a known disease.
pub fn disease_info(disease: Disease) -> DiseaseInfo {
    match disease {
        Disease::CommonCold => DiseaseInfo {
            description: "A viral infection of the upper respiratory tract affecting the nose and throat.",
            precautions: &[
                "Rest and stay hydrated",
                "Use over-the-counter cold remedies",
                "Gargle with warm salt water",
                "Avoid close contact with others",
            ],
            specialist: "General Physician",
        },
        Disease::Influenza => DiseaseInfo {
            description: "A contagious respiratory illness caused by influenza viruses that infect the nose, throat, and lungs.",
            precautions: &[
                "Get plenty of rest",
                "Drink lots of fluids",
                "Take antiviral medications if prescribed",
                "Stay home to prevent spreading",
            ],
            specialist: "General Physician",
        },
        Disease::Migraine => DiseaseInfo {
            description: "A neurological condition characterized by intense, debilitating headaches, often accompanied by nausea and sensitivity to light.",
            precautions: &[
                "Identify and avoid triggers",
                "Rest in a dark, quiet room",
                "Apply cold compress to forehead",
                "Take prescribed medications",
            ],
            specialist: "Neurologist",
        },
        Disease::Hypertension => DiseaseInfo {
            description: "A condition where the force of blood against artery walls is consistently too high.",
            precautions: &[
                "Reduce salt intake",
                "Exercise regularly",
                "Maintain healthy weight",
                "Take medications as prescribed",
            ],
            specialist: "Cardiologist",
        },
        Disease::Gastritis => DiseaseInfo {
            description: "Inflammation of the stomach lining that can cause digestive issues.",
            precautions: &[
                "Avoid spicy and acidic foods",
                "Eat smaller, more frequent meals",
                "Avoid alcohol and smoking",
                "Take antacids as needed",
            ],
            specialist: "Gastroenterologist",
        },
        Disease::Eczema => DiseaseInfo {
            description: "A skin condition causing itchy, inflamed, and sometimes cracked skin.",
            precautions: &[
                "Moisturize skin regularly",
                "Avoid harsh soaps and detergents",
                "Wear soft, breathable fabrics",
                "Use prescribed topical treatments",
            ],
            specialist: "Dermatologist",
        },
        Disease::Asthma => DiseaseInfo {
            description: "A chronic respiratory condition affecting the airways, causing breathing difficulties.",
            precautions: &[
                "Avoid known triggers",
                "Use inhalers as prescribed",
                "Monitor peak flow readings",
                "Have an asthma action plan",
            ],
            specialist: "Pulmonologist",
        },
        Disease::AnxietyDisorder => DiseaseInfo {
            description: "A mental health condition characterized by excessive worry, fear, and nervousness.",
            precautions: &[
                "Practice relaxation techniques",
                "Exercise regularly",
                "Limit caffeine and alcohol",
                "Consider therapy or counseling",
            ],
            specialist: "Psychiatrist",
        },
        Disease::Diabetes => DiseaseInfo {
            description: "A metabolic disorder affecting how the body processes blood sugar (glucose).",
            precautions: &[
                "Monitor blood sugar levels",
                "Follow a balanced diet plan",
                "Exercise regularly",
                "Take medications as prescribed",
            ],
            specialist: "Endocrinologist",
        },
        Disease::Bronchitis => DiseaseInfo {
            description: "Inflammation of the bronchial tubes that carry air to and from the lungs.",
            precautions: &[
                "Rest and stay hydrated",
                "Use a humidifier",
                "Avoid smoking and irritants",
                "Take prescribed medications",
            ],
            specialist: "Pulmonologist",
        },
    }
}

/// Join a disease name against the dataset.
///
/// Unknown names (including the rule engine's sentinel) resolve to the
/// generic advisory for the engine that produced them.
pub fn lookup_record(name: &str, engine: Engine) -> DiseaseRecord {
    match Disease::from_str(name) {
        Ok(disease) => disease_info(disease).to_record(),
        Err(_) => generic_advisory(engine).to_record(),
    }
}

/// Whether `token` belongs to the canonical vocabulary.
pub fn is_canonical_symptom(token: &str) -> bool {
    CANONICAL_SYMPTOMS.contains(&token)
}

/// Full disease catalog, serialized as an object keyed by display name
/// in catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiseaseCatalog;

impl DiseaseCatalog {
    pub fn len(&self) -> usize {
        Disease::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        Disease::ALL.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Disease, DiseaseInfo)> {
        Disease::ALL.iter().map(|d| (*d, disease_info(*d)))
    }
}

impl Serialize for DiseaseCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (disease, info) in self.iter() {
            map.serialize_entry(disease.as_str(), &info)?;
        }
        map.end()
    }
}
