//! Analysis service - sentiment over comment batches and videos

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::VideoConfig;
use crate::domain::{
    keyword_sentiment, ArtifactReport, BatchResult, DomainError, Distribution, PredictionItem,
    SentimentPipeline, VideoExtractor, VideoInfo,
};
use crate::infrastructure::artifacts::ArtifactRegistry;
use crate::infrastructure::observability::record_sentiment_batch;

pub const COMMENTS_ANALYZED: &str = "Comments analyzed using server ML model";
pub const NO_COMMENTS: &str = "Could not fetch comments from the video extractor. You can POST \
     comments to /analyze/comments/batch for model analysis.";

/// Request to analyze a video and optionally its comments
#[derive(Debug, Clone)]
pub struct AnalyzeVideoRequest {
    pub video_url: String,
    pub analyze_comments: bool,
    pub max_comments: usize,
}

/// Placeholder content analysis attached to every video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub sentiment: String,
    pub keywords: Vec<String>,
}

impl Default for ContentAnalysis {
    fn default() -> Self {
        Self {
            sentiment: "neutral".to_string(),
            keywords: Vec::new(),
        }
    }
}

/// Outcome of classifying a video's comments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentsAnalysis {
    pub analyzed: usize,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_results: Option<Vec<PredictionItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

impl CommentsAnalysis {
    fn unavailable(summary: impl Into<String>) -> Self {
        Self {
            analyzed: 0,
            summary: summary.into(),
            distribution: None,
            average_confidence: None,
            sample_results: None,
            model_used: None,
        }
    }

    fn from_batch(batch: BatchResult, sample_size: usize) -> Self {
        let mut sample = batch.results;
        sample.truncate(sample_size);

        Self {
            analyzed: batch.count,
            summary: COMMENTS_ANALYZED.to_string(),
            distribution: batch.distribution,
            average_confidence: batch.average_confidence,
            sample_results: Some(sample),
            model_used: batch.model_name,
        }
    }
}

/// Video metadata plus analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoAnalysis {
    #[serde(flatten)]
    pub video: VideoInfo,
    pub analysis: ContentAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_analysis: Option<CommentsAnalysis>,
}

/// Result of the keyword heuristic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSentiment {
    pub text: String,
    pub sentiment: String,
}

/// Limits applied to video requests
#[derive(Debug, Clone)]
pub struct AnalysisLimits {
    pub max_comments_limit: usize,
    pub sample_size: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self::from(&VideoConfig::default())
    }
}

impl From<&VideoConfig> for AnalysisLimits {
    fn from(config: &VideoConfig) -> Self {
        Self {
            max_comments_limit: config.max_comments_limit,
            sample_size: config.sample_size,
        }
    }
}

/// Analysis service wiring the sentiment pipeline to the video extractor
pub struct AnalysisService {
    artifacts: Arc<ArtifactRegistry>,
    extractor: Arc<dyn VideoExtractor>,
    limits: AnalysisLimits,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("extractor", &self.extractor.extractor_name())
            .field("limits", &self.limits)
            .finish()
    }
}

impl AnalysisService {
    pub fn new(artifacts: Arc<ArtifactRegistry>, extractor: Arc<dyn VideoExtractor>) -> Self {
        Self {
            artifacts,
            extractor,
            limits: AnalysisLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AnalysisLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Classify a batch; an empty batch never touches the models
    pub async fn analyze_batch(&self, comments: Vec<String>) -> Result<BatchResult, DomainError> {
        if comments.is_empty() {
            return Ok(BatchResult::empty());
        }

        let pipeline = SentimentPipeline::new(self.artifacts.current());
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || pipeline.analyze(&comments))
            .await
            .map_err(|e| DomainError::internal(format!("classification task failed: {}", e)))?;

        let duration = start.elapsed();
        match &result {
            Ok(batch) => {
                let model = batch.model_name.as_deref().unwrap_or("unknown");
                record_sentiment_batch(model, batch.count, duration, true);
                info!(
                    count = batch.count,
                    model = %model,
                    duration_ms = duration.as_millis() as u64,
                    "Comment batch analyzed"
                );
            }
            Err(e) => {
                record_sentiment_batch("unavailable", 0, duration, false);
                warn!(error = %e, "Comment batch analysis failed");
            }
        }

        result
    }

    /// Metadata only, no comments
    pub async fn video_metadata(&self, url: &str) -> Result<VideoInfo, DomainError> {
        validate_video_url(url)?;
        self.extractor.extract(url, None).await
    }

    pub async fn analyze_video(
        &self,
        request: AnalyzeVideoRequest,
    ) -> Result<VideoAnalysis, DomainError> {
        validate_video_url(&request.video_url)?;
        let max_comments = self.comment_limit(request.max_comments);

        // a zero limit never asks the extractor for comments
        let fetch_limit = request
            .analyze_comments
            .then_some(max_comments)
            .filter(|&max| max > 0);
        let video = self
            .extractor
            .extract(&request.video_url, fetch_limit)
            .await?;

        let comments_analysis = if request.analyze_comments {
            Some(self.analyze_comments(&video, max_comments).await?)
        } else {
            None
        };

        Ok(VideoAnalysis {
            video,
            analysis: ContentAnalysis::default(),
            comments_analysis,
        })
    }

    async fn analyze_comments(
        &self,
        video: &VideoInfo,
        max_comments: usize,
    ) -> Result<CommentsAnalysis, DomainError> {
        let texts = video.comment_texts(max_comments);

        if texts.is_empty() {
            debug!(raw_comments = video.comments.len(), "No comment text to analyze");
            return Ok(CommentsAnalysis::unavailable(NO_COMMENTS));
        }

        match self.analyze_batch(texts).await {
            Ok(batch) => Ok(CommentsAnalysis::from_batch(batch, self.limits.sample_size)),
            Err(e) if e.is_models_not_loaded() => Ok(CommentsAnalysis::unavailable(format!(
                "Model not available on server: {}. You can POST comments to \
                 /analyze/comments/batch to analyze using a remote model service.",
                e
            ))),
            Err(e) => Err(e),
        }
    }

    pub fn analyze_text(&self, text: &str) -> TextSentiment {
        TextSentiment {
            text: text.to_string(),
            sentiment: keyword_sentiment(text).to_string(),
        }
    }

    pub fn artifact_report(&self) -> ArtifactReport {
        self.artifacts.current().report()
    }

    pub async fn reload_artifacts(&self) -> Result<ArtifactReport, DomainError> {
        Ok(self.artifacts.reload().await?.report())
    }

    /// Requested comment count capped at the configured ceiling
    fn comment_limit(&self, requested: usize) -> usize {
        if requested > self.limits.max_comments_limit {
            debug!(
                requested,
                limit = self.limits.max_comments_limit,
                "Capping max_comments"
            );
        }
        requested.min(self.limits.max_comments_limit)
    }
}

fn validate_video_url(url: &str) -> Result<(), DomainError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(DomainError::validation("video_url must not be empty"));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(DomainError::validation(
            "video_url must start with http:// or https://",
        ));
    }

    Ok(())
}
