//! AutoDoc - OpenAPI documentation exporter
//!
//! Accepts OpenAPI schema documents over HTTP, stores them, runs an external
//! renderer to produce static HTML documentation and hands back CDN links
//! to the result. Stored schemas can also be returned fully dereferenced.

pub mod catalog;
pub mod config;
pub mod deref;
pub mod docs;
pub mod error;
pub mod export;
pub mod render;
pub mod routes;
pub mod schema;
pub mod store;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::catalog::ArtifactCatalog;
pub use crate::config::Config;
pub use crate::deref::{CommandDereferencer, Dereferencer};
pub use crate::export::{ArtifactUrls, ExportCoordinator};
pub use crate::render::{Renderer, RendererStrategy};
pub use crate::store::SchemaStore;

use crate::render::{build_renderer, CommandSpec};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Store, render and dereference pipeline
    pub coordinator: Arc<ExportCoordinator>,
    /// Listing of rendered artifacts
    pub catalog: Arc<ArtifactCatalog>,
}

impl AppState {
    /// Create a new application state with the configured external tools
    pub fn new(config: Config) -> Result<Self> {
        let renderer = build_renderer(&config)?;

        let deref_command = match &config.deref_command {
            Some(line) => CommandSpec::parse(line)?,
            None => CommandDereferencer::default_command(),
        };
        let dereferencer: Arc<dyn Dereferencer> =
            Arc::new(CommandDereferencer::new(deref_command));

        Ok(Self::assemble(config, renderer, dereferencer))
    }

    /// Create a new application state for testing with fake external tools
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing(
        config: Config,
        renderer: Arc<dyn Renderer>,
        dereferencer: Arc<dyn Dereferencer>,
    ) -> Self {
        Self::assemble(config, renderer, dereferencer)
    }

    fn assemble(
        config: Config,
        renderer: Arc<dyn Renderer>,
        dereferencer: Arc<dyn Dereferencer>,
    ) -> Self {
        let catalog = Arc::new(ArtifactCatalog::new(
            config.artifact_root(),
            config.cdn_url.clone(),
            renderer.primary_entrypoint(),
        ));

        let coordinator = Arc::new(
            ExportCoordinator::new(
                SchemaStore::new(config.schemas_dir()),
                config.artifact_root(),
                config.cdn_url.clone(),
                renderer,
                dereferencer,
            )
            .with_artifact_verification(config.verify_artifacts),
        );

        Self {
            config,
            start_time: Instant::now(),
            coordinator,
            catalog,
        }
    }
}
