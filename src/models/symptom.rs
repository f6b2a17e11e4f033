use std::collections::BTreeSet;

use serde::Serialize;

/// Deduplicated set of canonical symptom tokens for one request.
///
/// Tokens are expected to be normalized already (see
/// `inference::normalize`). Membership is exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymptomSet {
    tokens: BTreeSet<String>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> SymptomSet {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn duplicates_collapse() {
        let symptoms = set(&["cough", "fever", "cough"]);
        assert_eq!(symptoms.len(), 2);
    }

    #[test]
    fn iteration_is_sorted() {
        let symptoms = set(&["fever", "cough", "anxiety"]);
        let tokens: Vec<&str> = symptoms.iter().collect();
        assert_eq!(tokens, vec!["anxiety", "cough", "fever"]);
    }

    #[test]
    fn empty_set() {
        let symptoms = SymptomSet::new();
        assert!(symptoms.is_empty());
        assert!(!symptoms.contains("cough"));
    }
}
