//! The set of pretrained artifacts backing the pipeline

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::Classifier;
use super::features::FeatureTransformer;
use super::label::{ClassLabel, LabelDecoder};

/// Which artifact a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Vectorizer,
    Classifier,
    LabelDecoder,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vectorizer => "vectorizer",
            Self::Classifier => "classifier",
            Self::LabelDecoder => "label_decoder",
        }
    }

    /// Whether the pipeline can run without this artifact
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::LabelDecoder)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Load outcome for one artifact
#[derive(Debug)]
pub enum ArtifactSlot<T: ?Sized> {
    Loaded(Arc<T>),
    /// No file at the configured path
    Absent,
    /// File present but unreadable or invalid
    Failed(String),
}

impl<T: ?Sized> ArtifactSlot<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Loaded(artifact) => Some(artifact.as_ref()),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn status(&self) -> ArtifactStatus {
        match self {
            Self::Loaded(_) => ArtifactStatus::Loaded,
            Self::Absent => ArtifactStatus::Absent,
            Self::Failed(_) => ArtifactStatus::Failed,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T: ?Sized> Clone for ArtifactSlot<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loaded(artifact) => Self::Loaded(Arc::clone(artifact)),
            Self::Absent => Self::Absent,
            Self::Failed(reason) => Self::Failed(reason.clone()),
        }
    }
}

/// Serializable slot state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Loaded,
    Absent,
    Failed,
}

/// Immutable set of loaded artifacts, shared read-only by every request
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    vectorizer: ArtifactSlot<dyn FeatureTransformer>,
    classifier: ArtifactSlot<dyn Classifier>,
    label_decoder: ArtifactSlot<dyn LabelDecoder>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl ArtifactSet {
    pub fn new(
        vectorizer: ArtifactSlot<dyn FeatureTransformer>,
        classifier: ArtifactSlot<dyn Classifier>,
        label_decoder: ArtifactSlot<dyn LabelDecoder>,
    ) -> Self {
        Self {
            vectorizer,
            classifier,
            label_decoder,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// A set with nothing loaded
    pub fn empty() -> Self {
        Self::new(ArtifactSlot::Absent, ArtifactSlot::Absent, ArtifactSlot::Absent)
    }

    pub fn with_source(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source = Some(dir.into());
        self
    }

    pub fn with_vectorizer(mut self, vectorizer: Arc<dyn FeatureTransformer>) -> Self {
        self.vectorizer = ArtifactSlot::Loaded(vectorizer);
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = ArtifactSlot::Loaded(classifier);
        self
    }

    pub fn with_label_decoder(mut self, decoder: Arc<dyn LabelDecoder>) -> Self {
        self.label_decoder = ArtifactSlot::Loaded(decoder);
        self
    }

    pub fn vectorizer(&self) -> Option<&dyn FeatureTransformer> {
        self.vectorizer.get()
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.get()
    }

    pub fn label_decoder(&self) -> Option<&dyn LabelDecoder> {
        self.label_decoder.get()
    }

    /// Vectorizer and classifier are both loaded
    pub fn is_operational(&self) -> bool {
        self.vectorizer.is_loaded() && self.classifier.is_loaded()
    }

    pub fn classifier_name(&self) -> Option<&str> {
        self.classifier().map(|c| c.name())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Classifier classes the label decoder cannot map back to a name
    ///
    /// Empty unless both the classifier and the decoder are loaded.
    pub fn undecodable_classes(&self) -> Vec<ClassLabel> {
        let (Some(classifier), Some(decoder)) = (self.classifier(), self.label_decoder()) else {
            return Vec::new();
        };

        classifier
            .classes()
            .iter()
            .filter(|class| decoder.inverse_transform(class).is_err())
            .cloned()
            .collect()
    }

    pub fn report(&self) -> ArtifactReport {
        let entry = |kind: ArtifactKind, status: ArtifactStatus, error: Option<&str>| {
            ArtifactEntry {
                name: kind,
                status,
                required: kind.is_required(),
                error: error.map(str::to_string),
            }
        };

        ArtifactReport {
            models_dir: self.source.as_ref().map(|p| p.display().to_string()),
            loaded_at: self.loaded_at,
            operational: self.is_operational(),
            model: self.classifier_name().map(str::to_string),
            undecodable_classes: self
                .undecodable_classes()
                .iter()
                .map(ClassLabel::to_string)
                .collect(),
            artifacts: vec![
                entry(
                    ArtifactKind::Vectorizer,
                    self.vectorizer.status(),
                    self.vectorizer.error(),
                ),
                entry(
                    ArtifactKind::Classifier,
                    self.classifier.status(),
                    self.classifier.error(),
                ),
                entry(
                    ArtifactKind::LabelDecoder,
                    self.label_decoder.status(),
                    self.label_decoder.error(),
                ),
            ],
        }
    }
}

/// Status snapshot of an artifact set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_dir: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub operational: bool,
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub undecodable_classes: Vec<String>,
    pub artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub name: ArtifactKind,
    pub status: ArtifactStatus,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
