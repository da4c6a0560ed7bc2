//! Export endpoint integration tests
//!
//! Tests for POST /api/v1/openapi-export

use std::sync::Arc;

use autodoc::{render::ScalarRenderer, RendererStrategy};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    cat_dereferencer, failing_script, schema, schema_with_refs, spawn_app, spawn_app_with,
    spawn_legacy_app, test_config,
};

#[tokio::test]
async fn test_export_orders_service_scalar() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/v1/openapi-export")
        .json(&schema("orders-service", "1.0.0"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"url": "https://cdn.example.com/orders-service/index.html"})
    );

    let stored = app.schema_path("orders-service");
    assert!(stored.is_file());

    // Renderer got the absolute stored path and the title's output directory
    let log = app.render_log();
    assert_eq!(log.len(), 1);
    let (source, output) = log[0].split_once('|').unwrap();
    assert_eq!(source, stored.canonicalize().unwrap().to_string_lossy());
    assert!(output.ends_with("/scalar/orders-service"));

    let rendered = app.data_dir().join("scalar/orders-service/index.html");
    assert!(rendered.is_file());
}

#[tokio::test]
async fn test_export_legacy_returns_both_urls() {
    let app = spawn_legacy_app();

    let response = app
        .server
        .post("/api/v1/openapi-export")
        .json(&schema("billing", "3.1.0"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "url": "https://cdn.example.com/billing/swagger.html",
            "redocUrl": "https://cdn.example.com/billing/redoc.html"
        })
    );

    assert_eq!(app.render_log().len(), 2);
    assert!(app.data_dir().join("exported/billing/swagger.html").is_file());
    assert!(app.data_dir().join("exported/billing/redoc.html").is_file());
}

#[tokio::test]
async fn test_reexport_overwrites_stored_schema() {
    let app = spawn_app();

    let first = schema_with_refs("orders");
    let mut second = schema("orders", "2.0.0");
    second["paths"] = json!({"/health": {"get": {"responses": {"200": {"description": "ok"}}}}});

    app.server
        .post("/api/v1/openapi-export")
        .json(&first)
        .await
        .assert_status_ok();
    app.server
        .post("/api/v1/openapi-export")
        .json(&second)
        .await
        .assert_status_ok();

    let stored: Value =
        serde_json::from_slice(&std::fs::read(app.schema_path("orders")).unwrap()).unwrap();
    assert_eq!(stored, second);
    assert_eq!(app.render_log().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_rejected_without_writes() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/v1/openapi-export")
        .text("{\"openapi\": \"3.0.0\", \"info\": ")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(!body["error"].as_str().unwrap().is_empty());

    assert!(!app.data_dir().join("schemas").exists());
    assert!(!app.data_dir().join("scalar").exists());
    assert!(app.render_log().is_empty());
}

#[tokio::test]
async fn test_missing_title_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/v1/openapi-export")
        .json(&json!({"openapi": "3.0.0", "info": {"version": "1.0.0"}}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("info.title"));
    assert!(!app.data_dir().join("schemas").exists());
    assert!(app.render_log().is_empty());
}

#[tokio::test]
async fn test_empty_and_traversal_titles_are_rejected() {
    let app = spawn_app();

    for title in ["", "../../etc/passwd", "nested/title"] {
        let response = app
            .server
            .post("/api/v1/openapi-export")
            .json(&schema(title, "1.0.0"))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "title {:?}", title);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("info.title"));
    }

    assert!(!app.data_dir().join("schemas").exists());
    assert!(app.render_log().is_empty());
}

#[tokio::test]
async fn test_renderer_failure_keeps_schema_and_hides_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), RendererStrategy::Scalar);
    let renderer = Arc::new(ScalarRenderer::new(failing_script(
        "Error: unsupported OpenAPI version 9.9",
    )));
    let app = spawn_app_with(dir, config, renderer, cat_dereferencer());

    let response = app
        .server
        .post("/api/v1/openapi-export")
        .json(&schema("broken", "1.0.0"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("rendering failed"));
    assert!(!message.contains("unsupported OpenAPI version"));

    assert!(app.schema_path("broken").is_file());
    assert!(!app.data_dir().join("scalar/broken/index.html").exists());
}

#[tokio::test]
async fn test_verification_rejects_renderer_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), RendererStrategy::Scalar);
    config.verify_artifacts = true;
    let renderer = Arc::new(ScalarRenderer::new(autodoc::render::CommandSpec::new(
        "true",
        Vec::<String>::new(),
    )));
    let app = spawn_app_with(dir, config, renderer, cat_dereferencer());

    let response = app
        .server
        .post("/api/v1/openapi-export")
        .json(&schema("silent", "1.0.0"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
