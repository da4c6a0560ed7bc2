//! Artifact listing endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

/// Links to every exported artifact
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllResponse {
    #[serde(rename = "allFiles")]
    pub all_files: Vec<String>,
}

/// List all exported artifacts
///
/// Returns one CDN link per artifact directory under the artifact root.
#[utoipa::path(
    get,
    path = "/api/v1/all",
    tag = "files",
    responses(
        (status = 200, description = "Artifact links", body = AllResponse),
        (status = 400, description = "Artifact root unreadable", body = crate::error::ErrorResponse),
    ),
)]
pub async fn list_all(State(state): State<Arc<AppState>>) -> AppResult<Json<AllResponse>> {
    let all_files = state.catalog.list().await?;
    Ok(Json(AllResponse { all_files }))
}
