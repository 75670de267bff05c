//! Random forest classifier over exported decision trees

use serde::Deserialize;

use super::linear::argmax;
use crate::domain::{ClassLabel, Classifier, DomainError, FeatureMatrix, SparseRow};

const ARTIFACT: &str = "classifier";
const LEAF: i64 = -1;

/// One fitted tree as parallel node arrays
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise rows go left
/// when `x[feature[i]] <= threshold[i]`. `value[i]` holds per-class weights.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomForestArtifact {
    pub classes: Vec<ClassLabel>,
    pub n_features: usize,
    pub trees: Vec<TreeArtifact>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class distribution normalized to sum to one
    Leaf(Vec<f64>),
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_artifact(
        tree: TreeArtifact,
        index: usize,
        n_classes: usize,
        n_features: usize,
    ) -> Result<Self, DomainError> {
        let n_nodes = tree.children_left.len();
        let invalid = |message: String| {
            DomainError::artifact(ARTIFACT, format!("tree {}: {}", index, message))
        };

        if n_nodes == 0 {
            return Err(invalid("has no nodes".to_string()));
        }

        if tree.children_right.len() != n_nodes
            || tree.feature.len() != n_nodes
            || tree.threshold.len() != n_nodes
            || tree.value.len() != n_nodes
        {
            return Err(invalid("node arrays have different lengths".to_string()));
        }

        let mut nodes = Vec::with_capacity(n_nodes);

        for node in 0..n_nodes {
            let left = tree.children_left[node];

            if left == LEAF {
                let weights = &tree.value[node];
                if weights.len() != n_classes {
                    return Err(invalid(format!(
                        "leaf {} has {} class weights, expected {}",
                        node,
                        weights.len(),
                        n_classes
                    )));
                }
                nodes.push(Node::Leaf(normalized(weights)));
                continue;
            }

            let right = tree.children_right[node];
            let feature = tree.feature[node];

            // children always follow their parent, so traversal terminates
            let child_in_range = |child: i64| child > node as i64 && (child as usize) < n_nodes;
            if !child_in_range(left) || !child_in_range(right) {
                return Err(invalid(format!("node {} has out-of-range children", node)));
            }

            if feature < 0 || feature as usize >= n_features {
                return Err(invalid(format!(
                    "node {} splits on feature {} of {}",
                    node, feature, n_features
                )));
            }

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: tree.threshold[node],
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf(&self, row: &SparseRow) -> &[f64] {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                Node::Leaf(distribution) => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

fn normalized(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        weights.iter().map(|w| w / sum).collect()
    } else {
        vec![0.0; weights.len()]
    }
}

/// Averages leaf class distributions across trees
#[derive(Debug, Clone)]
pub struct RandomForestClassifier {
    name: String,
    classes: Vec<ClassLabel>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    pub fn from_artifact(artifact: RandomForestArtifact) -> Result<Self, DomainError> {
        let n_classes = artifact.classes.len();

        if n_classes == 0 {
            return Err(DomainError::artifact(ARTIFACT, "forest has no classes"));
        }

        if artifact.trees.is_empty() {
            return Err(DomainError::artifact(ARTIFACT, "forest has no trees"));
        }

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| DecisionTree::from_artifact(tree, i, n_classes, artifact.n_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: artifact
                .name
                .unwrap_or_else(|| "RandomForestClassifier".to_string()),
            classes: artifact.classes,
            n_features: artifact.n_features,
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn row_proba(&self, row: &SparseRow) -> Vec<f64> {
        let mut totals = vec![0.0; self.classes.len()];

        for tree in &self.trees {
            for (total, p) in totals.iter_mut().zip(tree.leaf(row)) {
                *total += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        totals.into_iter().map(|t| t / n_trees).collect()
    }

    fn check_width(&self, features: &FeatureMatrix) -> Result<(), DomainError> {
        if features.n_features() != self.n_features {
            return Err(DomainError::inference(format!(
                "{} expects {} features, got {}",
                self.name,
                self.n_features,
                features.n_features()
            )));
        }
        Ok(())
    }
}

impl Classifier for RandomForestClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<ClassLabel>, DomainError> {
        self.check_width(features)?;

        Ok(features
            .rows()
            .iter()
            .map(|row| self.classes[argmax(&self.row_proba(row))].clone())
            .collect())
    }

    fn predict_proba(
        &self,
        features: &FeatureMatrix,
    ) -> Result<Option<Vec<Vec<f64>>>, DomainError> {
        self.check_width(features)?;

        Ok(Some(
            features
                .rows()
                .iter()
                .map(|row| self.row_proba(row))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on feature `f`: left leaf favours class 0, right leaf class 1
    fn stump(feature: i64, left: [f64; 2], right: [f64; 2]) -> TreeArtifact {
        TreeArtifact {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![feature, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![vec![5.0, 5.0], left.to_vec(), right.to_vec()],
        }
    }

    fn forest() -> RandomForestClassifier {
        RandomForestClassifier::from_artifact(RandomForestArtifact {
            classes: vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            n_features: 2,
            trees: vec![stump(0, [4.0, 0.0], [0.0, 4.0]), stump(1, [1.0, 3.0], [3.0, 1.0])],
            name: None,
        })
        .unwrap()
    }

    fn matrix(rows: Vec<Vec<(usize, f64)>>) -> FeatureMatrix {
        FeatureMatrix::new(2, rows.into_iter().map(SparseRow::from_pairs).collect())
    }

    #[test]
    fn test_predict_proba_averages_trees() {
        let model = forest();
        let features = matrix(vec![vec![(0, 1.0)], vec![(1, 1.0)], vec![]]);

        let probs = model.predict_proba(&features).unwrap().unwrap();

        // row 0: tree0 right [0,1], tree1 left [.25,.75]
        assert!((probs[0][1] - 0.875).abs() < 1e-12);
        // row 1: tree0 left [1,0], tree1 right [.75,.25]
        assert!((probs[1][0] - 0.875).abs() < 1e-12);
        // row 2: tree0 left [1,0], tree1 left [.25,.75]
        assert!((probs[2][0] - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_predict_takes_argmax() {
        let model = forest();
        let features = matrix(vec![vec![(0, 1.0)], vec![(1, 1.0)], vec![]]);

        assert_eq!(
            model.predict(&features).unwrap(),
            vec![ClassLabel::Index(1), ClassLabel::Index(0), ClassLabel::Index(0)]
        );
        assert_eq!(model.name(), "RandomForestClassifier");
        assert_eq!(model.n_trees(), 2);
    }

    #[test]
    fn test_rejects_backwards_children() {
        let mut tree = stump(0, [1.0, 0.0], [0.0, 1.0]);
        tree.children_left[0] = 0;

        let result = RandomForestClassifier::from_artifact(RandomForestArtifact {
            classes: vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            n_features: 2,
            trees: vec![tree],
            name: None,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_feature_out_of_range() {
        let result = RandomForestClassifier::from_artifact(RandomForestArtifact {
            classes: vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            n_features: 2,
            trees: vec![stump(7, [1.0, 0.0], [0.0, 1.0])],
            name: None,
        });

        assert!(result.unwrap_err().to_string().contains("feature 7"));
    }

    #[test]
    fn test_rejects_leaf_class_mismatch() {
        let mut tree = stump(0, [1.0, 0.0], [0.0, 1.0]);
        tree.value[1] = vec![1.0, 0.0, 0.0];

        let result = RandomForestClassifier::from_artifact(RandomForestArtifact {
            classes: vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            n_features: 2,
            trees: vec![tree],
            name: None,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_forest() {
        let result = RandomForestClassifier::from_artifact(RandomForestArtifact {
            classes: vec![ClassLabel::Index(0)],
            n_features: 2,
            trees: Vec::new(),
            name: None,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_width_mismatch() {
        let features = FeatureMatrix::new(3, vec![SparseRow::default()]);

        assert!(forest().predict(&features).is_err());
    }
}
