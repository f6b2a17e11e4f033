//! Rule-based scorer used when no trained model is available or usable.
//!
//! Each profile is scored by the share of its symptoms present in the
//! input. Profiles are evaluated in `PROFILES` order and ranking is a
//! stable sort, so among equal scores the earlier profile wins.

use crate::models::{round_confidence, Diagnosis, Disease, Engine, SymptomSet};

/// Disease returned when no profile overlaps the input.
pub const SENTINEL_DISEASE: &str = "General Health Concern";

/// Confidence reported with the sentinel disease.
pub const SENTINEL_CONFIDENCE: f64 = 50.0;

/// Upper bound on rule-engine confidence.
pub const RULE_CONFIDENCE_CAP: f64 = 95.0;

/// Characteristic symptom set for one disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseProfile {
    pub disease: Disease,
    pub symptoms: &'static [&'static str],
}

impl DiseaseProfile {
    /// Profile tokens present in `symptoms`, in profile order.
    pub fn matching(&self, symptoms: &SymptomSet) -> Vec<&'static str> {
        self.symptoms
            .iter()
            .copied()
            .filter(|s| symptoms.contains(s))
            .collect()
    }
}

/// Evaluation order. Earlier entries win ties.
///
/// "wheezing" is not part of the canonical vocabulary, so a model-style
/// client that only sends canonical tokens can reach at most 3/4 on Asthma.
pub const PROFILES: &[DiseaseProfile] = &[
    DiseaseProfile {
        disease: Disease::CommonCold,
        symptoms: &["cough", "runny_nose", "sore_throat", "sneezing", "congestion"],
    },
    DiseaseProfile {
        disease: Disease::Influenza,
        symptoms: &["fever", "cough", "fatigue", "muscle_pain", "headache", "chills"],
    },
    DiseaseProfile {
        disease: Disease::Migraine,
        symptoms: &["headache", "nausea", "blurred_vision", "dizziness"],
    },
    DiseaseProfile {
        disease: Disease::Gastritis,
        symptoms: &["abdominal_pain", "nausea", "vomiting", "loss_of_appetite"],
    },
    DiseaseProfile {
        disease: Disease::Asthma,
        symptoms: &["shortness_of_breath", "cough", "chest_pain", "wheezing"],
    },
    DiseaseProfile {
        disease: Disease::AnxietyDisorder,
        symptoms: &["anxiety", "palpitations", "sweating", "insomnia", "dizziness"],
    },
    DiseaseProfile {
        disease: Disease::Diabetes,
        symptoms: &[
            "frequent_urination",
            "excessive_thirst",
            "fatigue",
            "blurred_vision",
            "weight_loss",
        ],
    },
    DiseaseProfile {
        disease: Disease::Eczema,
        symptoms: &["skin_rash", "itching", "swelling"],
    },
    DiseaseProfile {
        disease: Disease::Bronchitis,
        symptoms: &["cough", "shortness_of_breath", "chest_pain", "fatigue", "fever"],
    },
];

/// A profile that overlapped the input, with its raw match percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCandidate {
    pub disease: Disease,
    /// Profile tokens found in the input, in profile order.
    pub matched: Vec<&'static str>,
    pub profile: &'static [&'static str],
    /// `|matched| / |profile| * 100`, unrounded and uncapped.
    pub score: f64,
}

/// Deterministic overlap scorer over a fixed, ordered profile table.
#[derive(Debug, Clone, Copy)]
pub struct RuleScorer {
    profiles: &'static [DiseaseProfile],
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self { profiles: PROFILES }
    }
}

impl RuleScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer over a custom profile table. Order is the tie-break order.
    pub fn with_profiles(profiles: &'static [DiseaseProfile]) -> Self {
        Self { profiles }
    }

    /// Profile for `disease`, if the table has one.
    pub fn profile(&self, disease: Disease) -> Option<&'static DiseaseProfile> {
        self.profiles.iter().find(|p| p.disease == disease)
    }

    /// Score every overlapping profile and rank by score, descending.
    ///
    /// Profiles with no overlap are omitted. Equal scores keep evaluation
    /// order (`sort_by` is stable).
    pub fn rank(&self, symptoms: &SymptomSet) -> Vec<RuleCandidate> {
        let mut candidates: Vec<RuleCandidate> = self
            .profiles
            .iter()
            .filter(|p| !p.symptoms.is_empty())
            .filter_map(|profile| {
                let matched = profile.matching(symptoms);
                if matched.is_empty() {
                    return None;
                }
                let score = matched.len() as f64 / profile.symptoms.len() as f64 * 100.0;
                Some(RuleCandidate {
                    disease: profile.disease,
                    matched,
                    profile: profile.symptoms,
                    score,
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Select the top-ranked disease, or the sentinel when nothing matched.
    pub fn predict(&self, symptoms: &SymptomSet) -> Diagnosis {
        let ranked = self.rank(symptoms);

        match ranked.first() {
            Some(top) => Diagnosis {
                disease: top.disease.as_str().to_string(),
                confidence: round_confidence(top.score.min(RULE_CONFIDENCE_CAP)),
                engine: Engine::RuleBased,
            },
            None => Diagnosis {
                disease: SENTINEL_DISEASE.to_string(),
                confidence: SENTINEL_CONFIDENCE,
                engine: Engine::RuleBased,
            },
        }
    }
}
