//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Full health check with storage status
//! - `/health/ready` - Readiness check
//! - `/health/live` - Liveness check

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{render::RendererStrategy, AppState};

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual dependency check result
#[derive(Debug, Serialize, ToSchema)]
pub struct DependencyCheck {
    pub status: HealthStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Dependency checks collection
#[derive(Debug, Serialize, ToSchema)]
pub struct DependencyChecks {
    pub storage: DependencyCheck,
}

/// Full health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    #[schema(value_type = String)]
    pub renderer: RendererStrategy,
    pub checks: DependencyChecks,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize, ToSchema)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Check that the data directory is reachable
async fn check_storage(data_dir: &Path) -> DependencyCheck {
    let start = Instant::now();

    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => DependencyCheck {
            status: HealthStatus::Healthy,
            latency_ms: start.elapsed().as_millis() as u64,
            error: None,
        },
        Ok(_) => DependencyCheck {
            status: HealthStatus::Unhealthy,
            latency_ms: start.elapsed().as_millis() as u64,
            error: Some(format!("{} is not a directory", data_dir.display())),
        },
        Err(e) => DependencyCheck {
            status: HealthStatus::Unhealthy,
            latency_ms: start.elapsed().as_millis() as u64,
            error: Some(e.to_string()),
        },
    }
}

/// Full health check endpoint
///
/// Returns version, uptime, the active renderer strategy and whether the
/// data directory is reachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Data directory unreachable", body = HealthResponse),
    ),
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state.config.data_dir).await;
    let status = storage.status.clone();

    let response = HealthResponse {
        status: status.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        renderer: state.config.renderer,
        checks: DependencyChecks { storage },
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Readiness check endpoint
///
/// Returns 200 OK once the data directory is reachable.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SimpleHealthResponse>) {
    let storage = check_storage(&state.config.data_dir).await;

    if storage.status == HealthStatus::Unhealthy {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleHealthResponse {
                status: HealthStatus::Unhealthy,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}

/// Liveness check endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
