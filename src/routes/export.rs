//! Schema export endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use bytes::Bytes;

use crate::{error::AppResult, export::ArtifactUrls, AppState};

/// Export an OpenAPI schema to static documentation
///
/// Accepts a full OpenAPI JSON schema, stores it, renders static
/// documentation and returns the CDN links of the rendered pages.
#[utoipa::path(
    post,
    path = "/api/v1/openapi-export",
    tag = "openapi",
    request_body = crate::schema::SchemaDocument,
    responses(
        (status = 200, description = "Schema exported", body = ArtifactUrls),
        (status = 400, description = "Export failed", body = crate::error::ErrorResponse),
    ),
)]
pub async fn openapi_export(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<ArtifactUrls>> {
    let outcome = state.coordinator.export(&body).await?;
    Ok(Json(outcome.urls))
}
