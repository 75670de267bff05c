//! Sentiment classification domain
//!
//! Pretrained artifacts (vectorizer, classifier, label decoder) are consumed
//! through narrow traits so that file-backed models and test doubles are
//! interchangeable. The pipeline itself is stateless per invocation.

mod aggregator;
mod artifact;
mod classifier;
mod features;
mod keyword;
mod label;
mod pipeline;
mod prediction;

pub use aggregator::BatchAggregator;
pub use artifact::{
    ArtifactEntry, ArtifactKind, ArtifactReport, ArtifactSet, ArtifactSlot, ArtifactStatus,
};
pub use classifier::{ClassPrediction, Classifier, ClassifierAdapter};
pub use features::{FeatureMatrix, FeatureTransformer, SparseRow};
pub use keyword::keyword_sentiment;
pub use label::{ClassLabel, LabelDecoder, LabelResolver};
pub use pipeline::SentimentPipeline;
pub use prediction::{BatchResult, Distribution, PredictionItem};

#[cfg(test)]
pub use classifier::mock::MockClassifier;
#[cfg(test)]
pub use features::mock::MockFeatureTransformer;
#[cfg(test)]
pub use label::mock::MockLabelDecoder;
