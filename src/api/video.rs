//! Video metadata and root endpoints

use axum::extract::{Query, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, RootResponse, VideoQuery};
use crate::domain::VideoInfo;

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello from the video sentiment API!".to_string(),
    })
}

/// GET /youtube?url=
pub async fn video_metadata(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<VideoInfo>, ApiError> {
    debug!(url = %query.url, "Fetching video metadata");

    let video = state
        .analysis_service
        .video_metadata(&query.url)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(video))
}
