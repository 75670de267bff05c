//! Text → features → classes → labels → batch summary

use std::sync::Arc;

use tracing::debug;

use super::aggregator::BatchAggregator;
use super::artifact::ArtifactSet;
use super::classifier::ClassifierAdapter;
use super::label::LabelResolver;
use super::prediction::{BatchResult, PredictionItem};
use crate::domain::DomainError;

/// Sentiment classification over one artifact set snapshot
#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    artifacts: Arc<ArtifactSet>,
}

impl SentimentPipeline {
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        Self { artifacts }
    }

    /// Classify a batch of comments and summarize the result
    ///
    /// Fails once for the whole batch when the vectorizer or classifier is
    /// not loaded; label decoding problems only affect the item concerned.
    pub fn analyze(&self, comments: &[String]) -> Result<BatchResult, DomainError> {
        let (Some(vectorizer), Some(classifier)) =
            (self.artifacts.vectorizer(), self.artifacts.classifier())
        else {
            return Err(DomainError::models_not_loaded());
        };

        if comments.is_empty() {
            return Ok(BatchResult::empty());
        }

        let features = vectorizer.transform(comments)?;

        if features.n_rows() != comments.len() {
            return Err(DomainError::inference(format!(
                "vectorizer returned {} rows for {} texts",
                features.n_rows(),
                comments.len()
            )));
        }

        let prediction = ClassifierAdapter::new(classifier).predict(&features)?;
        let resolver = LabelResolver::new(self.artifacts.label_decoder());

        let items: Vec<PredictionItem> = comments
            .iter()
            .zip(&prediction.labels)
            .enumerate()
            .map(|(row, (comment, label))| {
                PredictionItem::new(
                    comment.clone(),
                    resolver.resolve(label),
                    prediction.confidence(row),
                )
            })
            .collect();

        debug!(
            count = items.len(),
            model = %classifier.name(),
            probabilities = prediction.has_probabilities(),
            "Batch classified"
        );

        Ok(BatchAggregator::aggregate(items, Some(classifier.name())))
    }
}
