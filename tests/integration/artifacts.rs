//! Artifact listing integration tests
//!
//! Tests for GET /api/v1/all

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{schema, spawn_app, spawn_legacy_app};

#[tokio::test]
async fn test_list_before_any_export_is_an_error() {
    let app = spawn_app();

    let response = app.server.get("/api/v1/all").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_returns_one_url_per_export() {
    let app = spawn_app();
    let titles = ["payments", "accounts", "orders-service"];

    for title in titles {
        app.server
            .post("/api/v1/openapi-export")
            .json(&schema(title, "1.0.0"))
            .await
            .assert_status_ok();
    }
    // Re-export does not add a second entry
    app.server
        .post("/api/v1/openapi-export")
        .json(&schema("payments", "1.1.0"))
        .await
        .assert_status_ok();

    let response = app.server.get("/api/v1/all").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let urls: Vec<&str> = body["allFiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    assert_eq!(urls.len(), titles.len());
    for title in titles {
        let segment = format!("/{}/", title);
        assert!(urls.iter().any(|u| u.contains(&segment)), "missing {}", title);
    }
    assert_eq!(urls[0], "https://cdn.example.com/accounts/index.html");
}

#[tokio::test]
async fn test_list_includes_directories_without_artifacts() {
    let app = spawn_app();
    std::fs::create_dir_all(app.data_dir().join("scalar/hand-made")).unwrap();

    let response = app.server.get("/api/v1/all").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["allFiles"][0],
        "https://cdn.example.com/hand-made/index.html"
    );
}

#[tokio::test]
async fn test_legacy_listing_links_swagger_page() {
    let app = spawn_legacy_app();
    app.server
        .post("/api/v1/openapi-export")
        .json(&schema("billing", "1.0.0"))
        .await
        .assert_status_ok();

    let body: Value = app.server.get("/api/v1/all").await.json();
    assert_eq!(
        body["allFiles"],
        serde_json::json!(["https://cdn.example.com/billing/swagger.html"])
    );
}
