//! Health check endpoints for container probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::{ArtifactReport, ArtifactStatus};

use super::state::AppState;

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness with version; 200 whenever the process is serving
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness with one check per artifact
///
/// Missing models degrade the service but it still answers metadata and
/// heuristic requests, so the status code stays 200.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let report = state.analysis_service.artifact_report();
    let (overall_status, checks) = artifact_checks(&report);

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn artifact_checks(report: &ArtifactReport) -> (HealthStatus, Vec<HealthCheck>) {
    let checks: Vec<HealthCheck> = report
        .artifacts
        .iter()
        .map(|artifact| {
            let status = match (artifact.status, artifact.required) {
                (ArtifactStatus::Loaded, _) => HealthStatus::Healthy,
                (_, true) => HealthStatus::Unhealthy,
                (_, false) => HealthStatus::Degraded,
            };

            let message = match artifact.status {
                ArtifactStatus::Loaded => None,
                ArtifactStatus::Absent => Some("not present".to_string()),
                ArtifactStatus::Failed => artifact.error.clone(),
            };

            HealthCheck {
                name: artifact.name.to_string(),
                status,
                message,
            }
        })
        .collect();

    let overall = if report.operational {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    (overall, checks)
}
