//! Documentation endpoints for the AutoDoc API
//!
//! Serves Swagger UI and the raw OpenAPI spec. When a docs key is
//! configured, requests must send it in `X-Docs-Key`; anything else gets a
//! 404 so the endpoints stay hidden.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

use crate::docs::ApiDoc;

/// Middleware protecting the docs endpoints with an optional key
pub async fn docs_auth_middleware(
    State(expected_key): State<Option<String>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    // No key configured: open access
    let Some(expected) = expected_key else {
        return Ok(next.run(request).await);
    };

    let provided_key = request
        .headers()
        .get("X-Docs-Key")
        .and_then(|v| v.to_str().ok());

    match provided_key {
        Some(provided) if provided == expected => Ok(next.run(request).await),
        _ => Err(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Handler for OpenAPI JSON endpoint
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Handler for Swagger UI HTML
async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// Create the docs router
///
/// Routes:
/// - GET /swagger, /swagger/, /swagger/index.html - Swagger UI
/// - GET /swagger/openapi.json - Raw OpenAPI spec
///
/// Generic over the parent router's state.
pub fn create_docs_router<S>(docs_key: Option<String>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/swagger", get(swagger_ui))
        .route("/swagger/", get(swagger_ui))
        .route("/swagger/index.html", get(swagger_ui))
        .route("/swagger/openapi.json", get(openapi_json))
        .layer(axum::middleware::from_fn_with_state(
            docs_key,
            docs_auth_middleware,
        ))
}

/// Swagger UI HTML template, assets from unpkg
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AutoDoc API - Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/swagger/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>"#;
