//! Admin API endpoints for managing loaded artifacts

pub mod models;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/models", get(models::model_status))
        .route("/models/reload", post(models::reload_models))
}
