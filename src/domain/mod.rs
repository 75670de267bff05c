//! Domain layer - Core business logic and entities

pub mod error;
pub mod sentiment;
pub mod video;

pub use error::DomainError;
pub use sentiment::{
    keyword_sentiment, ArtifactEntry, ArtifactKind, ArtifactReport, ArtifactSet, ArtifactSlot,
    ArtifactStatus, BatchAggregator, BatchResult, ClassLabel, ClassPrediction, Classifier,
    ClassifierAdapter, Distribution, FeatureMatrix, FeatureTransformer, LabelDecoder,
    LabelResolver, PredictionItem, SentimentPipeline, SparseRow,
};
pub use video::{VideoExtractor, VideoInfo};

#[cfg(test)]
pub use sentiment::{MockClassifier, MockFeatureTransformer, MockLabelDecoder};
