//! HTTP routes for AutoDoc
//!
//! The export API is nested under `/api/v1`; health checks and the
//! service's own API docs sit at the root.

pub mod artifacts;
pub mod docs;
pub mod expand;
pub mod export;
pub mod health;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Prefix of the export API
pub const API_PREFIX: &str = "/api/v1";

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/openapi-export", post(export::openapi_export))
        .route("/all", get(artifacts::list_all))
        .route("/expand/:name", get(expand::expanded_openapi));

    // Public routes (health checks)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check));

    Router::new()
        .nest(API_PREFIX, api_routes)
        .merge(public_routes)
        .merge(docs::create_docs_router(state.config.docs_key.clone()))
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
