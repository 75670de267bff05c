//! Video Sentiment API
//!
//! Classifies the sentiment of video comments with pretrained artifacts:
//! - TF-IDF vectorizer, linear or random forest classifier, label encoder
//! - Batch summaries with class distribution and mean confidence
//! - Video metadata and comment extraction through yt-dlp

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    artifacts::{ArtifactLoader, ArtifactRegistry},
    services::{AnalysisLimits, AnalysisService},
    video::YtDlpExtractor,
};
use tracing::{info, warn};

/// Load artifacts and wire the services for `config`
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let registry = Arc::new(load_artifacts(config).await?);

    if !registry.current().is_operational() {
        warn!(
            models_dir = %config.models.dir.display(),
            "Vectorizer or classifier not loaded; batch analysis will be unavailable"
        );
    }

    let extractor = Arc::new(YtDlpExtractor::from_config(&config.video));
    info!(
        extractor = %config.video.extractor_path,
        timeout_secs = config.video.timeout_secs,
        "Video extractor configured"
    );

    let service = AnalysisService::new(registry, extractor)
        .with_limits(AnalysisLimits::from(&config.video));

    Ok(AppState::new(Arc::new(service)))
}

/// Reads the artifact files off the async workers
pub async fn load_artifacts(config: &AppConfig) -> anyhow::Result<ArtifactRegistry> {
    let loader = ArtifactLoader::new(config.models.clone());
    let registry = tokio::task::spawn_blocking(move || ArtifactRegistry::load(loader)).await?;
    Ok(registry)
}
