//! File-backed implementations of the sentiment artifacts

mod classifier;
mod forest;
mod label_encoder;
mod linear;
mod loader;
mod registry;
mod tfidf;

pub use classifier::ClassifierArtifact;
pub use forest::{RandomForestArtifact, RandomForestClassifier, TreeArtifact};
pub use label_encoder::LabelEncoder;
pub use linear::{LinearClassifier, LinearModelArtifact, MultiClass};
pub use loader::ArtifactLoader;
pub use registry::ArtifactRegistry;
pub use tfidf::{Norm, TfidfArtifact, TfidfVectorizer};

#[cfg(test)]
pub(crate) use loader::fixtures;
