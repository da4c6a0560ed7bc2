//! Legacy redoc renderer
//!
//! Two external steps per export: a Swagger UI page (`swagger.html`) and a
//! Redoc page (`redoc.html`). The second step only runs if the first
//! succeeded.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{CommandFailure, CommandSpec, Entrypoint, EntrypointRole, Renderer};
use crate::error::{AppError, AppResult};

const ENTRYPOINTS: &[Entrypoint] = &[
    Entrypoint {
        file: "swagger.html",
        role: EntrypointRole::Primary,
    },
    Entrypoint {
        file: "redoc.html",
        role: EntrypointRole::Redoc,
    },
];

/// Renders Swagger UI and Redoc pages for a schema
pub struct RedocRenderer {
    swagger: CommandSpec,
    redoc: CommandSpec,
}

impl RedocRenderer {
    pub fn new(swagger: CommandSpec, redoc: CommandSpec) -> Self {
        Self { swagger, redoc }
    }

    pub fn default_swagger_command() -> CommandSpec {
        CommandSpec::new(
            "/bin/bash",
            ["html-swagger.sh", "{source}", "{output}/swagger.html"],
        )
    }

    /// Meant to run from the Node project directory
    pub fn default_redoc_command() -> CommandSpec {
        CommandSpec::new(
            "npx",
            [
                "--no-install",
                "@redocly/cli",
                "build-docs",
                "{source}",
                "--output={output}/redoc.html",
            ],
        )
    }

    fn render_error(&self, step: &str, failure: CommandFailure) -> AppError {
        AppError::Render {
            renderer: format!("{}:{}", self.name(), step),
            reason: failure.to_string(),
            stderr: failure.stderr().to_string(),
        }
    }
}

#[async_trait]
impl Renderer for RedocRenderer {
    fn name(&self) -> &'static str {
        "redoc"
    }

    fn entrypoints(&self) -> &'static [Entrypoint] {
        ENTRYPOINTS
    }

    #[instrument(skip(self), fields(renderer = "redoc"))]
    async fn render(&self, source: &Path, output: &Path) -> AppResult<()> {
        self.swagger
            .run(source, Some(output))
            .await
            .map_err(|e| self.render_error("swagger", e))?;

        self.redoc
            .run(source, Some(output))
            .await
            .map_err(|e| self.render_error("redoc", e))?;

        info!(output = %output.display(), "Rendered swagger and redoc docs");
        Ok(())
    }
}
