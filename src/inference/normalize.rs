//! Symptom normalization: raw client strings to canonical tokens.
//!
//! Lowercases and maps spaces and hyphens to underscores. No vocabulary
//! check happens here; unknown tokens pass through and match nothing.

use crate::models::SymptomSet;

/// Normalize one raw symptom string into a snake_case token.
pub fn normalize_symptom(raw: &str) -> String {
    raw.to_lowercase().replace([' ', '-'], "_")
}

/// Normalize and deduplicate a batch of raw symptom strings.
pub fn normalize_symptoms<I, S>(raw: I) -> SymptomSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|s| normalize_symptom(s.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_replaces_separators() {
        assert_eq!(normalize_symptom("Sore Throat"), "sore_throat");
        assert_eq!(normalize_symptom("sore-throat"), "sore_throat");
        assert_eq!(normalize_symptom("SHORTNESS of-Breath"), "shortness_of_breath");
    }

    #[test]
    fn canonical_tokens_are_unchanged() {
        assert_eq!(normalize_symptom("sore_throat"), "sore_throat");
        assert_eq!(normalize_symptom("fever"), "fever");
    }

    #[test]
    fn separator_variants_collapse_to_one_token() {
        let set = normalize_symptoms(["Sore Throat", "sore-throat", "sore_throat"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("sore_throat"));
    }

    #[test]
    fn unknown_tokens_are_carried_through() {
        let set = normalize_symptoms(["Purple Toes"]);
        assert!(set.contains("purple_toes"));
    }

    #[test]
    fn each_separator_is_replaced_individually() {
        // No trimming or collapsing of runs.
        assert_eq!(normalize_symptom(" joint  pain"), "_joint__pain");
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let set = normalize_symptoms(Vec::<String>::new());
        assert!(set.is_empty());
    }
}
