//! Common test utilities for AutoDoc
//!
//! Builds a full application over a temporary data directory. External
//! tools are replaced by small `sh` scripts so the real process plumbing
//! is exercised without Node or the documentation CLIs installed.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use autodoc::{
    render::{CommandSpec, RedocRenderer, ScalarRenderer},
    routes, AppState, CommandDereferencer, Config, Dereferencer, Renderer, RendererStrategy,
};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Test configuration constants
pub mod constants {
    /// CDN base used by every test app
    pub const TEST_CDN_URL: &str = "https://cdn.example.com/";
    /// Name of the file the fake renderers append invocations to
    pub const RENDER_LOG: &str = "render.log";
}

/// A running test application and the directory backing it
pub struct TestApp {
    pub server: TestServer,
    pub dir: TempDir,
}

impl TestApp {
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn schema_path(&self, title: &str) -> PathBuf {
        self.dir.path().join("schemas").join(format!("{}.json", title))
    }

    /// `source|output` lines, one per renderer invocation
    pub fn render_log(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join(constants::RENDER_LOG))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Configuration pointing at `data_dir`
pub fn test_config(data_dir: &Path, renderer: RendererStrategy) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        cdn_url: constants::TEST_CDN_URL.to_string(),
        data_dir: data_dir.to_path_buf(),
        renderer,
        verify_artifacts: false,
        scalar_command: None,
        swagger_command: None,
        redoc_command: None,
        deref_command: None,
        node_dir: data_dir.to_path_buf(),
        docs_key: None,
    }
}

/// Script that logs its arguments and copies the schema to `$2/<file>`
fn copy_script(log: &Path, file: &str) -> CommandSpec {
    let script = format!(
        "echo \"$1|$2\" >> \"$3\" && cp \"$1\" \"$2/{}\"",
        file
    );
    CommandSpec::new(
        "sh",
        [
            "-c".to_string(),
            script,
            "sh".to_string(),
            "{source}".to_string(),
            "{output}".to_string(),
            log.to_string_lossy().into_owned(),
        ],
    )
}

/// Script that writes to stderr and exits non-zero
pub fn failing_script(stderr: &str) -> CommandSpec {
    CommandSpec::new(
        "sh",
        ["-c".to_string(), format!("echo '{}' >&2; exit 1", stderr)],
    )
}

/// Scalar renderer writing `index.html`
pub fn scalar_renderer(dir: &Path) -> Arc<dyn Renderer> {
    Arc::new(ScalarRenderer::new(copy_script(
        &dir.join(constants::RENDER_LOG),
        "index.html",
    )))
}

/// Legacy renderer writing `swagger.html` and `redoc.html`
pub fn redoc_renderer(dir: &Path) -> Arc<dyn Renderer> {
    let log = dir.join(constants::RENDER_LOG);
    Arc::new(RedocRenderer::new(
        copy_script(&log, "swagger.html"),
        copy_script(&log, "redoc.html"),
    ))
}

/// Dereferencer that prints the stored schema unchanged
pub fn cat_dereferencer() -> Arc<dyn Dereferencer> {
    Arc::new(CommandDereferencer::new(CommandSpec::new(
        "sh",
        ["-c", "cat \"$1\"", "sh", "{source}"],
    )))
}

/// Build an app with explicit collaborators
pub fn spawn_app_with(
    dir: TempDir,
    config: Config,
    renderer: Arc<dyn Renderer>,
    dereferencer: Arc<dyn Dereferencer>,
) -> TestApp {
    let state = Arc::new(AppState::new_for_testing(config, renderer, dereferencer));
    let server =
        TestServer::new(routes::create_router(state)).expect("Failed to create test server");
    TestApp { server, dir }
}

/// Build an app using the scalar strategy
pub fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(dir.path(), RendererStrategy::Scalar);
    let renderer = scalar_renderer(dir.path());
    spawn_app_with(dir, config, renderer, cat_dereferencer())
}

/// Build an app using the legacy redoc strategy
pub fn spawn_legacy_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(dir.path(), RendererStrategy::Redoc);
    let renderer = redoc_renderer(dir.path());
    spawn_app_with(dir, config, renderer, cat_dereferencer())
}

/// Minimal valid schema document
pub fn schema(title: &str, version: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {"title": title, "version": version}
    })
}

/// Schema with an internal `$ref`
pub fn schema_with_refs(title: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {"title": title, "version": "1.0.0", "description": "Orders API"},
        "paths": {
            "/orders/{id}": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "An order",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Order"}
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Order": {"type": "object", "properties": {"id": {"type": "string"}}}
            }
        },
        "servers": [{"url": "https://api.example.com"}],
        "tags": [{"name": "orders"}]
    })
}
