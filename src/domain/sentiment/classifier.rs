//! Classifier trait and the adapter that drives it for one batch

use std::fmt::Debug;

use tracing::{debug, warn};

use super::features::FeatureMatrix;
use super::label::ClassLabel;
use crate::domain::DomainError;

/// A trained model mapping feature rows to discrete classes
pub trait Classifier: Send + Sync + Debug {
    /// Identifying name reported alongside predictions
    fn name(&self) -> &str;

    /// Classes in the model's output order
    fn classes(&self) -> &[ClassLabel];

    /// One class per row, in row order
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<ClassLabel>, DomainError>;

    /// Per-class probabilities per row, or `Ok(None)` when the model has no
    /// probability estimates
    fn predict_proba(
        &self,
        _features: &FeatureMatrix,
    ) -> Result<Option<Vec<Vec<f64>>>, DomainError> {
        Ok(None)
    }
}

/// Labels plus optional probabilities for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPrediction {
    pub labels: Vec<ClassLabel>,
    pub probabilities: Option<Vec<Vec<f64>>>,
}

impl ClassPrediction {
    /// Probability mass on the row's top class, 0.0 without probabilities
    pub fn confidence(&self, row: usize) -> f64 {
        self.probabilities
            .as_ref()
            .and_then(|probs| probs.get(row))
            .and_then(|p| p.iter().copied().reduce(f64::max))
            .unwrap_or(0.0)
    }

    pub fn has_probabilities(&self) -> bool {
        self.probabilities.is_some()
    }
}

/// Runs a classifier over a feature matrix
#[derive(Debug, Clone, Copy)]
pub struct ClassifierAdapter<'a> {
    classifier: &'a dyn Classifier,
}

impl<'a> ClassifierAdapter<'a> {
    pub fn new(classifier: &'a dyn Classifier) -> Self {
        Self { classifier }
    }

    pub fn predict(&self, features: &FeatureMatrix) -> Result<ClassPrediction, DomainError> {
        let expected = features.n_rows();
        let labels = self.classifier.predict(features)?;

        if labels.len() != expected {
            return Err(DomainError::inference(format!(
                "classifier '{}' returned {} labels for {} rows",
                self.classifier.name(),
                labels.len(),
                expected
            )));
        }

        let probabilities = match self.classifier.predict_proba(features) {
            Ok(Some(probs)) if probs.len() == expected => Some(probs),
            Ok(Some(probs)) => {
                warn!(
                    classifier = %self.classifier.name(),
                    rows = expected,
                    returned = probs.len(),
                    "Probability row count mismatch, confidence unavailable"
                );
                None
            }
            Ok(None) => {
                debug!(
                    classifier = %self.classifier.name(),
                    "Classifier has no probability estimates"
                );
                None
            }
            Err(e) => {
                warn!(
                    classifier = %self.classifier.name(),
                    error = %e,
                    "Probability estimation failed, confidence unavailable"
                );
                None
            }
        };

        Ok(ClassPrediction {
            labels,
            probabilities,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockClassifier;
    use super::*;
    use crate::domain::sentiment::features::SparseRow;

    fn matrix(rows: usize) -> FeatureMatrix {
        FeatureMatrix::new(2, vec![SparseRow::from_pairs(vec![(0, 1.0)]); rows])
    }

    #[test]
    fn test_adapter_with_probabilities() {
        let classifier = MockClassifier::new("mock", 1).with_probabilities(vec![0.2, 0.7, 0.1]);
        let prediction = ClassifierAdapter::new(&classifier).predict(&matrix(2)).unwrap();

        assert_eq!(prediction.labels.len(), 2);
        assert!(prediction.has_probabilities());
        assert_eq!(prediction.confidence(0), 0.7);
        assert_eq!(prediction.confidence(1), 0.7);
    }

    #[test]
    fn test_adapter_without_probabilities() {
        let classifier = MockClassifier::new("mock", 1);
        let prediction = ClassifierAdapter::new(&classifier).predict(&matrix(3)).unwrap();

        assert!(!prediction.has_probabilities());
        assert_eq!(prediction.confidence(0), 0.0);
        assert_eq!(prediction.confidence(2), 0.0);
    }

    #[test]
    fn test_adapter_treats_probability_error_as_unavailable() {
        let classifier = MockClassifier::new("mock", 1)
            .with_probabilities(vec![0.5, 0.5])
            .with_proba_error("numerical overflow");
        let prediction = ClassifierAdapter::new(&classifier).predict(&matrix(1)).unwrap();

        assert!(!prediction.has_probabilities());
        assert_eq!(prediction.confidence(0), 0.0);
    }

    #[test]
    fn test_confidence_out_of_range_row() {
        let prediction = ClassPrediction {
            labels: vec![ClassLabel::Index(0)],
            probabilities: Some(vec![vec![0.9, 0.1]]),
        };

        assert_eq!(prediction.confidence(0), 0.9);
        assert_eq!(prediction.confidence(5), 0.0);
    }
}
