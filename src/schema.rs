//! OpenAPI schema document model
//!
//! Only the shape is checked on decode. The `info.title` field is the
//! document's identity and doubles as a filesystem path segment, so it is
//! validated separately with [`validate_title`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Full OpenAPI schema payload submitted for export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SchemaDocument {
    #[schema(example = "3.0.0")]
    pub openapi: String,
    pub info: SchemaInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub paths: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub components: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub servers: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub tags: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub security: Option<Vec<Value>>,
    /// Any other top-level member (webhooks, `x-` extensions, ...)
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

/// The `info` object of a schema document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SchemaInfo {
    /// Missing titles decode as empty and are rejected by [`validate_title`]
    #[serde(default)]
    #[schema(example = "example-service")]
    pub title: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "termsOfService",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub terms_of_service: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl SchemaDocument {
    /// Decode a request body. Fails with `Decode` on malformed JSON or a
    /// missing structural member; no OpenAPI semantics are checked.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The validated identity of this document
    pub fn title(&self) -> AppResult<&str> {
        validate_title(&self.info.title)
    }
}

/// Check that a title can be used as a single path segment.
///
/// Rejects empty titles, `.`/`..`, and anything containing a path
/// separator or NUL byte.
pub fn validate_title(title: &str) -> AppResult<&str> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "info.title must not be empty".to_string(),
        ));
    }

    if title == "." || title == ".." {
        return Err(AppError::Validation(format!(
            "info.title '{}' is not a valid name",
            title
        )));
    }

    if title.contains(['/', '\\', '\0']) {
        return Err(AppError::Validation(format!(
            "info.title '{}' must not contain path separators",
            title.escape_default()
        )));
    }

    Ok(title)
}
