//! Dereferenced schema endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::AppResult, AppState};

/// Return the fully expanded form of a stored schema
///
/// The body is the dereferencer's JSON output, passed through unchanged.
#[utoipa::path(
    get,
    path = "/api/v1/expand/{name}",
    tag = "openapi",
    params(
        ("name" = String, Path, description = "Schema title, optionally with a .json suffix")
    ),
    responses(
        (status = 200, description = "Expanded schema", body = crate::schema::SchemaDocument, content_type = "application/json"),
        (status = 400, description = "Unknown schema or dereference failure", body = crate::error::ErrorResponse),
    ),
)]
pub async fn expanded_openapi(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let expanded = state.coordinator.dereference(&name).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], expanded).into_response())
}
