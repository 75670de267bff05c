//! Sentiment analysis endpoint handlers

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{AnalyzeVideoBody, ApiError, BatchCommentsRequest, Json, TextRequest};
use crate::domain::BatchResult;
use crate::infrastructure::services::{TextSentiment, VideoAnalysis};

/// POST /analyze/comments/batch
pub async fn analyze_comments_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchCommentsRequest>,
) -> Result<Json<BatchResult>, ApiError> {
    debug!(count = request.comments.len(), "Analyzing comment batch");

    let result = state
        .analysis_service
        .analyze_batch(request.comments)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(result))
}

/// POST /analyze/video
pub async fn analyze_video(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeVideoBody>,
) -> Result<Json<VideoAnalysis>, ApiError> {
    let request = body.into_request();
    debug!(
        video_url = %request.video_url,
        analyze_comments = request.analyze_comments,
        max_comments = request.max_comments,
        "Analyzing video"
    );

    let analysis = state
        .analysis_service
        .analyze_video(request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(analysis))
}

/// POST /analyze/text
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Json<TextSentiment> {
    Json(state.analysis_service.analyze_text(&request.text))
}
