//! Artifact renderer abstraction
//!
//! Rendering static HTML documentation is delegated to external tools. The
//! two integrations (the dual-file legacy redoc pipeline and the scalar
//! pipeline) sit behind the [`Renderer`] trait and are chosen at startup by
//! [`RendererStrategy`].

pub mod command;
pub mod redoc;
pub mod scalar;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::{config::Config, error::AppResult};

pub use command::{CommandFailure, CommandOutput, CommandSpec};
pub use redoc::RedocRenderer;
pub use scalar::ScalarRenderer;

/// What a rendered file is used for in the export response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrypointRole {
    /// Reported as `url`, also used by the artifact listing
    Primary,
    /// Reported as `redocUrl`
    Redoc,
}

/// A well-known file a renderer writes into the artifact directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrypoint {
    pub file: &'static str,
    pub role: EntrypointRole,
}

/// Trait implemented by every documentation renderer
///
/// `render` receives absolute paths: the stored schema and an existing
/// output directory. It must return only after the external tool exits.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renderer name for logging and error messages
    fn name(&self) -> &'static str;

    /// Files produced under the output directory, primary first
    fn entrypoints(&self) -> &'static [Entrypoint];

    /// Render `source` into `output`
    async fn render(&self, source: &Path, output: &Path) -> AppResult<()>;

    /// File the artifact listing links to
    fn primary_entrypoint(&self) -> &'static str {
        self.entrypoints()
            .iter()
            .find(|e| e.role == EntrypointRole::Primary)
            .map(|e| e.file)
            .unwrap_or("index.html")
    }
}

/// Renderer integration selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererStrategy {
    Scalar,
    Redoc,
}

impl RendererStrategy {
    /// Artifact root directory name for this strategy
    pub fn artifact_dir(self) -> &'static str {
        match self {
            RendererStrategy::Scalar => "scalar",
            RendererStrategy::Redoc => "exported",
        }
    }
}

impl fmt::Display for RendererStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererStrategy::Scalar => f.write_str("scalar"),
            RendererStrategy::Redoc => f.write_str("redoc"),
        }
    }
}

impl FromStr for RendererStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(RendererStrategy::Scalar),
            "redoc" | "legacy" => Ok(RendererStrategy::Redoc),
            other => anyhow::bail!("unknown renderer '{}', expected 'scalar' or 'redoc'", other),
        }
    }
}

/// Build the configured renderer
pub fn build_renderer(config: &Config) -> anyhow::Result<Arc<dyn Renderer>> {
    let renderer: Arc<dyn Renderer> = match config.renderer {
        RendererStrategy::Scalar => {
            let command = match &config.scalar_command {
                Some(line) => CommandSpec::parse(line)?,
                None => ScalarRenderer::default_command(),
            };
            Arc::new(ScalarRenderer::new(command))
        }
        RendererStrategy::Redoc => {
            let swagger = match &config.swagger_command {
                Some(line) => CommandSpec::parse(line)?,
                None => RedocRenderer::default_swagger_command(),
            };
            let redoc = match &config.redoc_command {
                Some(line) => CommandSpec::parse(line)?,
                None => RedocRenderer::default_redoc_command(),
            }
            .in_dir(&config.node_dir);
            Arc::new(RedocRenderer::new(swagger, redoc))
        }
    };
    Ok(renderer)
}
