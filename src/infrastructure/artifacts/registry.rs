//! Shared handle to the current artifact set with atomic reload

use std::sync::{Arc, RwLock};

use tracing::info;

use super::loader::ArtifactLoader;
use crate::domain::{ArtifactSet, DomainError};

/// Publishes the current [`ArtifactSet`]
///
/// The lock only guards the `Arc` itself; callers take a snapshot and keep
/// using it even if a reload swaps in a new set meanwhile.
#[derive(Debug)]
pub struct ArtifactRegistry {
    current: RwLock<Arc<ArtifactSet>>,
    loader: Option<ArtifactLoader>,
}

impl ArtifactRegistry {
    pub fn new(loader: ArtifactLoader, initial: ArtifactSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            loader: Some(loader),
        }
    }

    /// Fixed set with no backing directory; reload is rejected
    pub fn fixed(set: ArtifactSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
            loader: None,
        }
    }

    /// Loads from disk synchronously
    pub fn load(loader: ArtifactLoader) -> Self {
        let initial = loader.load();
        Self::new(loader, initial)
    }

    pub fn current(&self) -> Arc<ArtifactSet> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, set: ArtifactSet) -> Arc<ArtifactSet> {
        let set = Arc::new(set);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::clone(&set);
        set
    }

    /// Re-reads every artifact off the async workers, then swaps
    pub async fn reload(&self) -> Result<Arc<ArtifactSet>, DomainError> {
        let loader = self
            .loader
            .clone()
            .ok_or_else(|| DomainError::configuration("artifact set has no models directory"))?;

        let set = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| DomainError::internal(format!("artifact reload task failed: {}", e)))?;

        let set = self.replace(set);
        info!(
            operational = set.is_operational(),
            model = set.classifier_name().unwrap_or("none"),
            "Artifacts reloaded"
        );

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelsConfig;
    use crate::infrastructure::artifacts::loader::fixtures::*;

    #[test]
    fn test_snapshot_survives_replace() {
        let registry = ArtifactRegistry::fixed(ArtifactSet::empty());
        let before = registry.current();

        let dir = ModelsDir::complete("swap");
        let loader = ArtifactLoader::new(ModelsConfig::default().with_dir(dir.path()));
        registry.replace(loader.load());

        assert!(!before.is_operational());
        assert!(registry.current().is_operational());
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_files() {
        let dir = ModelsDir::new("reload");
        let loader = ArtifactLoader::new(ModelsConfig::default().with_dir(dir.path()));
        let registry = ArtifactRegistry::load(loader);
        assert!(!registry.current().is_operational());

        let dir = dir
            .with("tfidf_vectorizer.json", VECTORIZER)
            .with("classifier.json", CLASSIFIER);
        let reloaded = registry.reload().await.unwrap();

        assert!(reloaded.is_operational());
        assert!(registry.current().is_operational());
        drop(dir);
    }

    #[tokio::test]
    async fn test_reload_without_loader_is_rejected() {
        let registry = ArtifactRegistry::fixed(ArtifactSet::empty());

        assert!(matches!(
            registry.reload().await,
            Err(DomainError::Configuration { .. })
        ));
    }
}
