//! Error types for AutoDoc
//!
//! Every failure in the export pipeline is an [`AppError`]. At the HTTP
//! boundary all variants collapse into the same `400 {"error": "..."}` shape;
//! the detailed Display form (paths, stderr, raw tool output) only reaches
//! the server log.

use std::path::{Path, PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body is not a decodable schema document
    #[error("Invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Identity field missing or unusable as a path segment
    #[error("Invalid schema: {0}")]
    Validation(String),

    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External renderer could not be spawned, exited non-zero or left no output
    #[error("Renderer '{renderer}' failed: {reason}; stderr: {stderr}")]
    Render {
        renderer: String,
        reason: String,
        stderr: String,
    },

    /// External dereferencer failed or printed something that is not JSON
    #[error("Dereference failed: {reason}; output: {output}")]
    Dereference { reason: String, output: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a filesystem error together with the path it happened on
    pub fn storage(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::Storage {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Stable kind name used in log records
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "decode",
            AppError::Validation(_) => "validation",
            AppError::Storage { .. } => "storage",
            AppError::Render { .. } => "render",
            AppError::Dereference { .. } => "dereference",
            AppError::Internal(_) => "internal",
        }
    }

    /// Short message safe to hand back to clients
    pub fn client_message(&self) -> String {
        match self {
            AppError::Decode(e) => format!("invalid JSON body: {}", e),
            AppError::Validation(msg) => msg.clone(),
            AppError::Storage { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                "not found".to_string()
            }
            AppError::Storage { .. } => "storage failure".to_string(),
            AppError::Render { renderer, .. } => {
                format!("documentation rendering failed ({})", renderer)
            }
            AppError::Dereference { .. } => "schema dereference failed".to_string(),
            AppError::Internal(_) => "internal error".to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "invalid JSON body")]
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(kind = self.kind(), error = %self, "Error handling request");

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
