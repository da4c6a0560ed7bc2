//! OpenAPI specification for the AutoDoc API
//!
//! Aggregates all endpoints and schemas into a single OpenAPI document.

use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    export::ArtifactUrls,
    routes::{
        artifacts::AllResponse,
        health::{DependencyCheck, DependencyChecks, HealthResponse, HealthStatus},
    },
    schema::{SchemaDocument, SchemaInfo},
};

/// OpenAPI specification for the AutoDoc API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AutoDoc API",
        version = "1.0.0",
        description = "Stores OpenAPI schemas, renders static HTML documentation and returns CDN links"
    ),
    paths(
        crate::routes::export::openapi_export,
        crate::routes::artifacts::list_all,
        crate::routes::expand::expanded_openapi,
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            // Export
            SchemaDocument,
            SchemaInfo,
            ArtifactUrls,
            AllResponse,
            // Health
            HealthStatus,
            DependencyCheck,
            DependencyChecks,
            HealthResponse,
            // Error
            ErrorResponse,
        )
    ),
    tags(
        (name = "openapi", description = "Schema export and expansion"),
        (name = "files", description = "Exported artifacts"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
