//! Scalar renderer
//!
//! Single-step pipeline producing `index.html`.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{CommandSpec, Entrypoint, EntrypointRole, Renderer};
use crate::error::{AppError, AppResult};

const ENTRYPOINTS: &[Entrypoint] = &[Entrypoint {
    file: "index.html",
    role: EntrypointRole::Primary,
}];

/// Renders a schema with the scalar tooling
pub struct ScalarRenderer {
    command: CommandSpec,
}

impl ScalarRenderer {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }

    pub fn default_command() -> CommandSpec {
        CommandSpec::new(
            "/bin/bash",
            ["html-scalar.sh", "{source}", "{output}/index.html"],
        )
    }
}

#[async_trait]
impl Renderer for ScalarRenderer {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn entrypoints(&self) -> &'static [Entrypoint] {
        ENTRYPOINTS
    }

    #[instrument(skip(self), fields(renderer = "scalar"))]
    async fn render(&self, source: &Path, output: &Path) -> AppResult<()> {
        self.command
            .run(source, Some(output))
            .await
            .map_err(|e| AppError::Render {
                renderer: self.name().to_string(),
                reason: e.to_string(),
                stderr: e.stderr().to_string(),
            })?;

        info!(output = %output.display(), "Rendered scalar docs");
        Ok(())
    }
}
