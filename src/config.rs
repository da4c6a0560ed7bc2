//! Configuration management for AutoDoc
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::render::RendererStrategy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Base URL prepended verbatim to every artifact link
    pub cdn_url: String,
    /// Root directory holding `schemas/` and the artifact root
    pub data_dir: PathBuf,

    /// Which renderer integration produces the artifacts
    pub renderer: RendererStrategy,
    /// Fail exports whose renderer did not produce every entrypoint file
    pub verify_artifacts: bool,

    /// Command line overrides, `{source}` and `{output}` are substituted
    pub scalar_command: Option<String>,
    pub swagger_command: Option<String>,
    pub redoc_command: Option<String>,
    pub deref_command: Option<String>,
    /// Working directory of the Node-based redoc step
    pub node_dir: PathBuf,

    /// Key required to read this service's own API docs (open when unset)
    pub docs_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("AUTODOC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("AUTODOC_PORT")
                .unwrap_or_else(|_| "9090".to_string())
                .parse()
                .context("Invalid AUTODOC_PORT")?,

            cdn_url: env::var("CDN_URL").unwrap_or_default(),
            data_dir: env::var("AUTODOC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            renderer: env::var("AUTODOC_RENDERER")
                .unwrap_or_else(|_| "scalar".to_string())
                .parse()
                .context("Invalid AUTODOC_RENDERER")?,
            verify_artifacts: env::var("AUTODOC_VERIFY_ARTIFACTS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),

            scalar_command: non_empty_var("AUTODOC_SCALAR_COMMAND"),
            swagger_command: non_empty_var("AUTODOC_SWAGGER_COMMAND"),
            redoc_command: non_empty_var("AUTODOC_REDOC_COMMAND"),
            deref_command: non_empty_var("AUTODOC_DEREF_COMMAND"),
            node_dir: env::var("AUTODOC_NODE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./node_js")),

            docs_key: non_empty_var("AUTODOC_DOCS_KEY"),
        })
    }

    /// Directory holding one stored schema per title
    pub fn schemas_dir(&self) -> PathBuf {
        self.data_dir.join("schemas")
    }

    /// Directory holding one artifact directory per title
    pub fn artifact_root(&self) -> PathBuf {
        self.data_dir.join(self.renderer.artifact_dir())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
