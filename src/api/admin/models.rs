//! Artifact status and reload handlers

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::ArtifactReport;

/// GET /admin/models
pub async fn model_status(State(state): State<AppState>) -> Json<ArtifactReport> {
    Json(state.analysis_service.artifact_report())
}

/// POST /admin/models/reload
pub async fn reload_models(
    State(state): State<AppState>,
) -> Result<Json<ArtifactReport>, ApiError> {
    info!("Reloading model artifacts");

    let report = state
        .analysis_service
        .reload_artifacts()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(report))
}
