//! Classifier artifact format, tagged by model family

use std::sync::Arc;

use serde::Deserialize;

use super::forest::{RandomForestArtifact, RandomForestClassifier};
use super::linear::{LinearClassifier, LinearModelArtifact};
use crate::domain::{Classifier, DomainError};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LinearModelArtifact),
    LinearSvc(LinearModelArtifact),
    RandomForest(RandomForestArtifact),
}

impl ClassifierArtifact {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes).map_err(|e| DomainError::artifact("classifier", e.to_string()))
    }

    pub fn build(self) -> Result<Arc<dyn Classifier>, DomainError> {
        Ok(match self {
            Self::LogisticRegression(artifact) => Arc::new(LinearClassifier::logistic(artifact)?),
            Self::LinearSvc(artifact) => Arc::new(LinearClassifier::svm(artifact)?),
            Self::RandomForest(artifact) => Arc::new(RandomForestClassifier::from_artifact(artifact)?),
        })
    }
}
