//! Schema dereferencing
//!
//! Produces the fully expanded form of a stored schema (every `$ref`
//! inlined) by running an external tool that prints JSON on stdout.

use std::path::Path;

use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::{
    error::{AppError, AppResult},
    render::CommandSpec,
};

/// Trait implemented by schema dereferencers
#[async_trait]
pub trait Dereferencer: Send + Sync {
    /// Return the expanded JSON text for the schema stored at `source`
    async fn dereference(&self, source: &Path) -> AppResult<String>;
}

/// Dereferencer backed by an external command
pub struct CommandDereferencer {
    command: CommandSpec,
}

impl CommandDereferencer {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }

    pub fn default_command() -> CommandSpec {
        CommandSpec::new("node", ["node_js/deref.js", "{source}"])
    }
}

#[async_trait]
impl Dereferencer for CommandDereferencer {
    #[instrument(skip(self))]
    async fn dereference(&self, source: &Path) -> AppResult<String> {
        let output = self
            .command
            .run(source, None)
            .await
            .map_err(|e| AppError::Dereference {
                reason: e.to_string(),
                output: e.combined_output(),
            })?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if let Err(e) = serde_json::from_str::<serde::de::IgnoredAny>(&text) {
            warn!(error = %e, "Dereferencer printed invalid JSON");
            return Err(AppError::Dereference {
                reason: format!("invalid JSON output: {}", e),
                output: output.combined(),
            });
        }

        Ok(text)
    }
}
