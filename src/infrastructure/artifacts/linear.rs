//! Linear classifiers: logistic regression and linear SVM

use serde::Deserialize;

use crate::domain::{ClassLabel, Classifier, DomainError, FeatureMatrix, SparseRow};

const ARTIFACT: &str = "classifier";

/// How multiclass logistic probabilities are formed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// Serialized linear model weights
///
/// Binary models carry a single coefficient row scoring the second class.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModelArtifact {
    pub classes: Vec<ClassLabel>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinearKind {
    Logistic(MultiClass),
    Svm,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    kind: LinearKind,
    classes: Vec<ClassLabel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearClassifier {
    /// Logistic regression; supports probability estimates
    pub fn logistic(artifact: LinearModelArtifact) -> Result<Self, DomainError> {
        let kind = LinearKind::Logistic(artifact.multi_class);
        Self::build(artifact, kind, "LogisticRegression")
    }

    /// Linear SVM; decision scores only, no probabilities
    pub fn svm(artifact: LinearModelArtifact) -> Result<Self, DomainError> {
        Self::build(artifact, LinearKind::Svm, "LinearSVC")
    }

    fn build(
        artifact: LinearModelArtifact,
        kind: LinearKind,
        default_name: &str,
    ) -> Result<Self, DomainError> {
        let n_classes = artifact.classes.len();

        if n_classes < 2 {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!("expected at least 2 classes, found {}", n_classes),
            ));
        }

        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if artifact.coef.len() != expected_rows {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!(
                    "expected {} coefficient rows for {} classes, found {}",
                    expected_rows,
                    n_classes,
                    artifact.coef.len()
                ),
            ));
        }

        if artifact.intercept.len() != expected_rows {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!(
                    "expected {} intercepts, found {}",
                    expected_rows,
                    artifact.intercept.len()
                ),
            ));
        }

        let n_features = artifact.coef[0].len();
        if artifact.coef.iter().any(|row| row.len() != n_features) {
            return Err(DomainError::artifact(
                ARTIFACT,
                "coefficient rows have different lengths",
            ));
        }

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| default_name.to_string()),
            kind,
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
            n_features,
        })
    }

    fn decision_function(&self, row: &SparseRow) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| row.dot(weights) + bias)
            .collect()
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

    fn is_binary(&self) -> bool {
        self.classes.len() == 2
    }
}

impl Classifier for LinearClassifier {
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
            .map(|row| {
                let scores = self.decision_function(row);
                let index = if self.is_binary() {
                    usize::from(scores[0] > 0.0)
                } else {
                    argmax(&scores)
                };
                self.classes[index].clone()
            })
            .collect())
    }

    fn predict_proba(
        &self,
        features: &FeatureMatrix,
    ) -> Result<Option<Vec<Vec<f64>>>, DomainError> {
        let LinearKind::Logistic(multi_class) = self.kind else {
            return Ok(None);
        };

        self.check_width(features)?;

        let probabilities = features
            .rows()
            .iter()
            .map(|row| {
                let scores = self.decision_function(row);
                if self.is_binary() {
                    let p = sigmoid(scores[0]);
                    vec![1.0 - p, p]
                } else {
                    match multi_class {
                        MultiClass::Multinomial => softmax(&scores),
                        MultiClass::Ovr => normalized_sigmoids(&scores),
                    }
                }
            })
            .collect();

        Ok(Some(probabilities))
    }
}

/// Index of the first maximum
pub(super) fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_value), (i, &v)| {
            if v > best_value { (i, v) } else { (best, best_value) }
        })
        .0
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn normalized_sigmoids(scores: &[f64]) -> Vec<f64> {
    let probs: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
    let sum: f64 = probs.iter().sum();
    if sum > 0.0 {
        probs.into_iter().map(|p| p / sum).collect()
    } else {
        vec![1.0 / scores.len() as f64; scores.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<(usize, f64)>>, n_features: usize) -> FeatureMatrix {
        FeatureMatrix::new(
            n_features,
            rows.into_iter().map(SparseRow::from_pairs).collect(),
        )
    }

    fn binary_artifact() -> LinearModelArtifact {
        LinearModelArtifact {
            classes: vec![ClassLabel::Index(0), ClassLabel::Index(1)],
            coef: vec![vec![2.0, -2.0]],
            intercept: vec![0.0],
            multi_class: MultiClass::default(),
            name: None,
        }
    }

    fn multiclass_artifact(multi_class: MultiClass) -> LinearModelArtifact {
        LinearModelArtifact {
            classes: vec!["negative".into(), "neutral".into(), "positive".into()],
            coef: vec![
                vec![-1.0, 2.0, 0.0],
                vec![0.0, 0.0, 1.0],
                vec![2.0, -1.0, 0.0],
            ],
            intercept: vec![0.0, 0.1, 0.0],
            multi_class,
            name: None,
        }
    }

    #[test]
    fn test_binary_logistic_predict_and_proba() {
        let model = LinearClassifier::logistic(binary_artifact()).unwrap();
        let features = matrix(vec![vec![(0, 1.0)], vec![(1, 1.0)]], 2);

        let labels = model.predict(&features).unwrap();
        assert_eq!(labels, vec![ClassLabel::Index(1), ClassLabel::Index(0)]);

        let probs = model.predict_proba(&features).unwrap().unwrap();
        assert!((probs[0][1] - sigmoid(2.0)).abs() < 1e-12);
        assert!((probs[0].iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[1][0] > probs[1][1]);
        assert_eq!(model.name(), "LogisticRegression");
    }

    #[test]
    fn test_multinomial_probabilities_agree_with_prediction() {
        let model = LinearClassifier::logistic(multiclass_artifact(MultiClass::Multinomial)).unwrap();
        let features = matrix(vec![vec![(0, 1.0)], vec![(1, 1.0)], vec![(2, 1.0)]], 3);

        let labels = model.predict(&features).unwrap();
        assert_eq!(
            labels,
            vec![
                ClassLabel::from("positive"),
                ClassLabel::from("negative"),
                ClassLabel::from("neutral"),
            ]
        );

        let probs = model.predict_proba(&features).unwrap().unwrap();
        for (row, label) in probs.iter().zip(&labels) {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            let top = argmax(row);
            assert_eq!(&model.classes()[top], label);
        }
    }

    #[test]
    fn test_ovr_probabilities_sum_to_one() {
        let model = LinearClassifier::logistic(multiclass_artifact(MultiClass::Ovr)).unwrap();
        let features = matrix(vec![vec![(0, 0.5), (2, 0.5)]], 3);

        let probs = model.predict_proba(&features).unwrap().unwrap();
        assert!((probs[0].iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_svm_has_no_probabilities() {
        let model = LinearClassifier::svm(binary_artifact()).unwrap();
        let features = matrix(vec![vec![(0, 1.0)]], 2);

        assert_eq!(model.predict(&features).unwrap(), vec![ClassLabel::Index(1)]);
        assert!(model.predict_proba(&features).unwrap().is_none());
        assert_eq!(model.name(), "LinearSVC");
    }

    #[test]
    fn test_zero_row_predicts_first_class_for_binary() {
        let model = LinearClassifier::svm(binary_artifact()).unwrap();
        let features = matrix(vec![vec![]], 2);

        assert_eq!(model.predict(&features).unwrap(), vec![ClassLabel::Index(0)]);
    }

    #[test]
    fn test_width_mismatch_is_inference_error() {
        let model = LinearClassifier::logistic(binary_artifact()).unwrap();
        let features = matrix(vec![vec![(0, 1.0)]], 5);

        assert!(matches!(
            model.predict(&features),
            Err(DomainError::Inference { .. })
        ));
    }

    #[test]
    fn test_rejects_inconsistent_shapes() {
        let mut artifact = binary_artifact();
        artifact.intercept = vec![0.0, 1.0];
        assert!(LinearClassifier::logistic(artifact).is_err());

        let mut artifact = multiclass_artifact(MultiClass::Ovr);
        artifact.coef.pop();
        assert!(LinearClassifier::logistic(artifact).is_err());

        let mut artifact = binary_artifact();
        artifact.classes.pop();
        assert!(LinearClassifier::svm(artifact).is_err());
    }

    #[test]
    fn test_custom_name() {
        let mut artifact = binary_artifact();
        artifact.name = Some("SentimentLR-v3".to_string());

        let model = LinearClassifier::logistic(artifact).unwrap();
        assert_eq!(model.name(), "SentimentLR-v3");
    }

    #[test]
    fn test_argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[1.0]), 0);
    }
}
