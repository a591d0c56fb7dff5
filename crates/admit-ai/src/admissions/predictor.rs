use serde::{Deserialize, Serialize};

use super::encoder::{FeatureVector, FEATURE_COUNT};

/// Trained regressor contract. Output is an admit probability that may fall
/// outside [0, 1]; callers clamp.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> f64;

    fn name(&self) -> &str {
        "predictor"
    }
}

/// Node of a regression tree. Split nodes send `value <= threshold` left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Single regression tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Walk from the root to a leaf. Structurally invalid trees evaluate to
    /// 0.0; [`RandomForest::validate`] rejects them at load time.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        let mut index = 0usize;
        // Validated trees only point forward, so depth is bounded by node count.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let Some(value) = features.get(*feature) else {
                        return 0.0;
                    };
                    index = if *value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
        0.0
    }

    fn validate(&self, tree: usize) -> Result<(), ForestError> {
        if self.nodes.is_empty() {
            return Err(ForestError::EmptyTree { tree });
        }

        for (node, entry) in self.nodes.iter().enumerate() {
            match entry {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ForestError::NonFiniteValue { tree, node });
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ForestError::FeatureOutOfRange {
                            tree,
                            node,
                            feature: *feature,
                        });
                    }
                    if !threshold.is_finite() {
                        return Err(ForestError::NonFiniteValue { tree, node });
                    }
                    for child in [*left, *right] {
                        if child <= node || child >= self.nodes.len() {
                            return Err(ForestError::InvalidChild { tree, node, child });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Bagged ensemble of regression trees; the prediction is the mean leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn new(trees: Vec<RegressionTree>) -> Self {
        Self { trees }
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn validate(&self) -> Result<(), ForestError> {
        if self.trees.is_empty() {
            return Err(ForestError::EmptyForest);
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(index, tree)| tree.validate(index))
    }
}

impl Predictor for RandomForest {
    fn predict(&self, features: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let values = features.as_slice();
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(values)).sum();
        total / self.trees.len() as f64
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

/// Structural problems found while validating a forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForestError {
    #[error("forest contains no trees")]
    EmptyForest,
    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },
    #[error("tree {tree} node {node} splits on unknown feature {feature}")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
    },
    #[error("tree {tree} node {node} points to invalid child {child}")]
    InvalidChild {
        tree: usize,
        node: usize,
        child: usize,
    },
    #[error("tree {tree} node {node} holds a non-finite value")]
    NonFiniteValue { tree: usize, node: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> RegressionTree {
        RegressionTree::new(vec![
            TreeNode::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: low },
            TreeNode::Leaf { value: high },
        ])
    }

    fn features_with(index: usize, value: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[index] = value;
        FeatureVector::from_values(values)
    }

    #[test]
    fn tree_sends_threshold_ties_left() {
        let tree = stump(2, 8.0, 0.4, 0.8);
        assert_eq!(tree.evaluate(features_with(2, 8.0).as_slice()), 0.4);
        assert_eq!(tree.evaluate(features_with(2, 8.01).as_slice()), 0.8);
    }

    #[test]
    fn forest_averages_tree_outputs() {
        let forest = RandomForest::new(vec![stump(2, 8.0, 0.4, 0.8), stump(5, 0.5, 0.5, 0.9)]);
        forest.validate().expect("valid forest");

        let mut values = [0.0; FEATURE_COUNT];
        values[2] = 9.0;
        values[5] = 1.0;
        let prediction = forest.predict(&FeatureVector::from_values(values));
        assert!((prediction - 0.85).abs() < 1e-12);
    }

    #[test]
    fn validation_rejects_backward_children() {
        let forest = RandomForest::new(vec![RegressionTree::new(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 1,
            },
            TreeNode::Leaf { value: 0.5 },
        ])]);

        assert_eq!(
            forest.validate(),
            Err(ForestError::InvalidChild {
                tree: 0,
                node: 0,
                child: 0
            })
        );
    }

    #[test]
    fn validation_rejects_unknown_features_and_empty_forests() {
        assert_eq!(
            RandomForest::new(Vec::new()).validate(),
            Err(ForestError::EmptyForest)
        );

        let forest = RandomForest::new(vec![stump(FEATURE_COUNT, 1.0, 0.1, 0.2)]);
        assert!(matches!(
            forest.validate(),
            Err(ForestError::FeatureOutOfRange { feature, .. }) if feature == FEATURE_COUNT
        ));
    }

    #[test]
    fn tree_nodes_deserialize_from_tagged_json() {
        let tree: RegressionTree = serde_json::from_str(
            r#"{"nodes":[
                {"kind":"split","feature":2,"threshold":7.5,"left":1,"right":2},
                {"kind":"leaf","value":0.55},
                {"kind":"leaf","value":0.8}
            ]}"#,
        )
        .expect("tree parses");

        assert_eq!(tree, stump(2, 7.5, 0.55, 0.8));
    }
}
