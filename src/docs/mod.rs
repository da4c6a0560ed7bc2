//! API Documentation module
//!
//! Provides the OpenAPI description of AutoDoc's own HTTP API using utoipa.

mod openapi;

pub use openapi::ApiDoc;
