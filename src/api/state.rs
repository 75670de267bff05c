//! Application state for shared services

use std::sync::Arc;

use crate::domain::{ArtifactReport, BatchResult, DomainError, VideoInfo};
use crate::infrastructure::services::{
    AnalysisService, AnalyzeVideoRequest, TextSentiment, VideoAnalysis,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<dyn AnalysisServiceTrait>,
}

impl AppState {
    pub fn new(analysis_service: Arc<dyn AnalysisServiceTrait>) -> Self {
        Self { analysis_service }
    }
}

/// Trait for analysis service operations
#[async_trait::async_trait]
pub trait AnalysisServiceTrait: Send + Sync {
    async fn analyze_batch(&self, comments: Vec<String>) -> Result<BatchResult, DomainError>;
    async fn analyze_video(&self, request: AnalyzeVideoRequest)
        -> Result<VideoAnalysis, DomainError>;
    async fn video_metadata(&self, url: &str) -> Result<VideoInfo, DomainError>;
    fn analyze_text(&self, text: &str) -> TextSentiment;
    fn artifact_report(&self) -> ArtifactReport;
    async fn reload_artifacts(&self) -> Result<ArtifactReport, DomainError>;
}

#[async_trait::async_trait]
impl AnalysisServiceTrait for AnalysisService {
    async fn analyze_batch(&self, comments: Vec<String>) -> Result<BatchResult, DomainError> {
        AnalysisService::analyze_batch(self, comments).await
    }

    async fn analyze_video(
        &self,
        request: AnalyzeVideoRequest,
    ) -> Result<VideoAnalysis, DomainError> {
        AnalysisService::analyze_video(self, request).await
    }

    async fn video_metadata(&self, url: &str) -> Result<VideoInfo, DomainError> {
        AnalysisService::video_metadata(self, url).await
    }

    fn analyze_text(&self, text: &str) -> TextSentiment {
        AnalysisService::analyze_text(self, text)
    }

    fn artifact_report(&self) -> ArtifactReport {
        AnalysisService::artifact_report(self)
    }

    async fn reload_artifacts(&self) -> Result<ArtifactReport, DomainError> {
        AnalysisService::reload_artifacts(self).await
    }
}
