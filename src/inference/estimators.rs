//! Concrete classifiers deserialized from the model bundle.
//!
//! Trees use the flat-array layout exported by scikit-learn
//! (`children_left`, `children_right`, `feature`, `threshold`, `value`).
//! A leaf has `children_left == -1`; a sample goes left when
//! `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use super::classifier::{ClassLabel, SymptomClassifier};
use super::types::ClassifierError;

const LEAF: i64 = -1;

// ═══════════════════════════════════════════════════════════
// Decision tree / random forest
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (sample counts or fractions).
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Check array lengths and child indices. Run once at load time.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ClassifierError> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(ClassifierError::MalformedModel("tree has no nodes".into()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ClassifierError::MalformedModel(
                "tree arrays have different lengths".into(),
            ));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if self.value[node].len() != n_classes {
                    return Err(ClassifierError::MalformedModel(format!(
                        "leaf {node} has {} class weights, expected {n_classes}",
                        self.value[node].len()
                    )));
                }
                continue;
            }
            // Children must point forward, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ClassifierError::MalformedModel(format!(
                        "node {node} has invalid child {child}"
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ClassifierError::MalformedModel(format!(
                    "node {node} splits on feature {feature} of {n_features}"
                )));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf reached by `features`.
    ///
    /// Every index is bounds-checked, so an unvalidated tree yields
    /// `MalformedModel` rather than a panic. A walk longer than the node
    /// count means the tree has a cycle.
    fn leaf_distribution(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        let malformed = |node: usize, what: &str| {
            ClassifierError::MalformedModel(format!("node {node}: {what}"))
        };

        let mut node = 0usize;
        let mut steps = 0usize;
        loop {
            let left = *self
                .children_left
                .get(node)
                .ok_or_else(|| malformed(node, "missing"))?;
            if left == LEAF {
                break;
            }
            steps += 1;
            if steps > self.children_left.len() {
                return Err(malformed(node, "cycle in tree"));
            }

            let feature = *self
                .feature
                .get(node)
                .ok_or_else(|| malformed(node, "missing feature"))?;
            let feature =
                usize::try_from(feature).map_err(|_| malformed(node, "negative feature"))?;
            let x = *features.get(feature).ok_or(ClassifierError::ShapeMismatch {
                expected: feature + 1,
                actual: features.len(),
            })?;
            let threshold = *self
                .threshold
                .get(node)
                .ok_or_else(|| malformed(node, "missing threshold"))?;

            let next = if x <= threshold {
                left
            } else {
                *self
                    .children_right
                    .get(node)
                    .ok_or_else(|| malformed(node, "missing right child"))?
            };
            node = usize::try_from(next).map_err(|_| malformed(node, "negative child"))?;
        }

        let weights = self
            .value
            .get(node)
            .ok_or_else(|| malformed(node, "missing class weights"))?;
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(ClassifierError::InvalidProbabilities(format!(
                "leaf {node} has no weight"
            )));
        }
        Ok(weights.iter().map(|w| w / total).collect())
    }
}

/// Ensemble of decision trees; probabilities are the mean of per-tree
/// leaf distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub classes: Vec<ClassLabel>,
    pub trees: Vec<DecisionTree>,
}

impl SymptomClassifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() || self.trees.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }
        for tree in &self.trees {
            tree.validate(self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        self.check_shape(features)?;
        if self.trees.is_empty() || self.classes.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(features)?;
            if dist.len() != proba.len() {
                return Err(ClassifierError::MalformedModel(format!(
                    "leaf has {} classes, model has {}",
                    dist.len(),
                    proba.len()
                )));
            }
            for (acc, p) in proba.iter_mut().zip(dist) {
                *acc += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

// ═══════════════════════════════════════════════════════════
// Multinomial logistic model
// ═══════════════════════════════════════════════════════════

/// Linear class scores followed by softmax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<ClassLabel>,
    /// One row of `n_features` weights per class.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl SymptomClassifier for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() || self.coefficients.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }
        if self.coefficients.len() != self.classes.len()
            || self.intercepts.len() != self.classes.len()
        {
            return Err(ClassifierError::MalformedModel(
                "coefficient rows and intercepts must match class count".into(),
            ));
        }
        let width = self.n_features();
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(ClassifierError::MalformedModel(
                "coefficient rows have different widths".into(),
            ));
        }
        Ok(())
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        self.check_shape(features)?;
        if self.coefficients.len() != self.intercepts.len() || self.coefficients.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }

        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();
        softmax(&scores)
    }
}

fn softmax(scores: &[f64]) -> Result<Vec<f64>, ClassifierError> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return Err(ClassifierError::InvalidProbabilities(
            "softmax normalizer is not finite".into(),
        ));
    }
    Ok(exp.into_iter().map(|e| e / total).collect())
}

// ═══════════════════════════════════════════════════════════
// Bundle representation
// ═══════════════════════════════════════════════════════════

/// Classifier variants accepted in the model bundle, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    RandomForest(RandomForest),
    Linear(LinearModel),
}

impl ClassifierSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RandomForest(_) => "random_forest",
            Self::Linear(_) => "linear",
        }
    }

    pub fn into_classifier(self) -> Box<dyn SymptomClassifier> {
        match self {
            Self::RandomForest(m) => Box::new(m),
            Self::Linear(m) => Box::new(m),
        }
    }
}
