//! Builds an [`ArtifactSet`] from the models directory

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::classifier::ClassifierArtifact;
use super::label_encoder::LabelEncoder;
use super::tfidf::TfidfVectorizer;
use crate::config::ModelsConfig;
use crate::domain::{
    ArtifactKind, ArtifactSet, ArtifactSlot, Classifier, DomainError, FeatureTransformer,
    LabelDecoder,
};

/// Loads each artifact independently; never fails as a whole
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    config: ModelsConfig,
}

impl ArtifactLoader {
    pub fn new(config: ModelsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelsConfig {
        &self.config
    }

    /// Blocking file I/O; call from a blocking context
    pub fn load(&self) -> ArtifactSet {
        let vectorizer = load_slot(
            ArtifactKind::Vectorizer,
            &self.config.vectorizer_path(),
            |bytes| {
                let vectorizer = TfidfVectorizer::from_json(bytes)?;
                Ok(Arc::new(vectorizer) as Arc<dyn FeatureTransformer>)
            },
        );

        let classifier = load_slot(
            ArtifactKind::Classifier,
            &self.config.classifier_path(),
            |bytes| -> Result<Arc<dyn Classifier>, DomainError> {
                ClassifierArtifact::from_json(bytes)?.build()
            },
        );

        let label_decoder = load_slot(
            ArtifactKind::LabelDecoder,
            &self.config.label_decoder_path(),
            |bytes| {
                let encoder = LabelEncoder::from_json(bytes)?;
                Ok(Arc::new(encoder) as Arc<dyn LabelDecoder>)
            },
        );

        let set = ArtifactSet::new(vectorizer, classifier, label_decoder)
            .with_source(self.config.dir.clone());

        info!(
            models_dir = %self.config.dir.display(),
            operational = set.is_operational(),
            model = set.classifier_name().unwrap_or("none"),
            "Artifacts loaded"
        );

        let undecodable = set.undecodable_classes();
        if !undecodable.is_empty() {
            let classes: Vec<String> = undecodable.iter().map(ToString::to_string).collect();
            warn!(
                classes = %classes.join(", "),
                "Label decoder does not cover every classifier class; raw labels will be used"
            );
        }

        set
    }
}

fn load_slot<T: ?Sized>(
    kind: ArtifactKind,
    path: &Path,
    parse: impl FnOnce(&[u8]) -> Result<Arc<T>, DomainError>,
) -> ArtifactSlot<T> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(artifact = %kind, path = %path.display(), "Artifact not present");
            return ArtifactSlot::Absent;
        }
        Err(e) => {
            warn!(artifact = %kind, path = %path.display(), error = %e, "Failed to read artifact");
            return ArtifactSlot::Failed(e.to_string());
        }
    };

    match parse(&bytes) {
        Ok(artifact) => ArtifactSlot::Loaded(artifact),
        Err(e) => {
            warn!(artifact = %kind, path = %path.display(), error = %e, "Failed to load artifact");
            ArtifactSlot::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const VECTORIZER: &str = r#"{
        "vocabulary": {"love": 0, "hate": 1, "okay": 2, "this": 3},
        "idf": [1.5, 1.5, 1.2, 1.0]
    }"#;

    /// Classes 0 = negative, 1 = neutral, 2 = positive
    pub const CLASSIFIER: &str = r#"{
        "kind": "logistic_regression",
        "classes": [0, 1, 2],
        "coef": [[-2.0, 3.0, 0.0, 0.0], [0.0, 0.0, 3.0, 0.0], [3.0, -2.0, 0.0, 0.0]],
        "intercept": [0.0, 0.2, 0.0]
    }"#;

    pub const LABEL_ENCODER: &str = r#"{"classes": ["negative", "neutral", "positive"]}"#;

    /// Scratch directory removed on drop
    pub struct ModelsDir(PathBuf);

    impl ModelsDir {
        pub fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "video-sentiment-{}-{}",
                name,
                uuid::Uuid::new_v4()
            ));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        /// All three artifacts written
        pub fn complete(name: &str) -> Self {
            Self::new(name)
                .with("tfidf_vectorizer.json", VECTORIZER)
                .with("classifier.json", CLASSIFIER)
                .with("label_encoder.json", LABEL_ENCODER)
        }

        pub fn with(self, file: &str, contents: &str) -> Self {
            fs::write(self.0.join(file), contents).unwrap();
            self
        }

        pub fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for ModelsDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }
}
