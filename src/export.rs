//! Export coordinator
//!
//! Drives a schema from request body to artifact links:
//!
//! 1. decode the body into a [`SchemaDocument`] and validate its title
//! 2. store it under `schemas/<title>.json`, replacing any earlier version
//! 3. create `<artifact-root>/<title>`
//! 4. run the configured [`Renderer`] with both absolute paths
//! 5. compose the CDN links for the renderer's entrypoint files
//!
//! Nothing is rolled back: a render failure leaves the stored schema in
//! place. Operations on the same title are serialized by a per-title lock;
//! different titles run independently.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    catalog::artifact_url,
    deref::Dereferencer,
    error::{AppError, AppResult},
    render::{EntrypointRole, Renderer},
    schema::{validate_title, SchemaDocument},
    store::SchemaStore,
};

/// Links to a freshly exported artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArtifactUrls {
    #[schema(example = "https://cdn.example.com/example-service/index.html")]
    pub url: String,
    #[serde(rename = "redocUrl", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "https://cdn.example.com/example-service/redoc.html")]
    pub redoc_url: Option<String>,
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub title: String,
    pub schema_path: PathBuf,
    pub artifact_dir: PathBuf,
    pub urls: ArtifactUrls,
}

/// Coordinates the schema store and the renderer
pub struct ExportCoordinator {
    store: SchemaStore,
    artifact_root: PathBuf,
    cdn_url: String,
    renderer: Arc<dyn Renderer>,
    dereferencer: Arc<dyn Dereferencer>,
    verify_artifacts: bool,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ExportCoordinator {
    pub fn new(
        store: SchemaStore,
        artifact_root: impl Into<PathBuf>,
        cdn_url: impl Into<String>,
        renderer: Arc<dyn Renderer>,
        dereferencer: Arc<dyn Dereferencer>,
    ) -> Self {
        Self {
            store,
            artifact_root: artifact_root.into(),
            cdn_url: cdn_url.into(),
            renderer,
            dereferencer,
            verify_artifacts: false,
            locks: DashMap::new(),
        }
    }

    /// Require every entrypoint file to exist after rendering
    pub fn with_artifact_verification(mut self, enabled: bool) -> Self {
        self.verify_artifacts = enabled;
        self
    }

    /// Export a raw request body
    pub async fn export(&self, body: &[u8]) -> AppResult<ExportOutcome> {
        let document = SchemaDocument::from_slice(body)?;
        self.export_document(&document).await
    }

    /// Export an already decoded document
    #[instrument(skip(self, document), fields(title = %document.info.title, renderer = self.renderer.name()))]
    pub async fn export_document(&self, document: &SchemaDocument) -> AppResult<ExportOutcome> {
        let title = document.title()?.to_string();
        info!("Accepted a new schema");

        let lock = self.title_lock(&title);
        let result = {
            let _guard = lock.lock().await;
            self.export_locked(&title, document).await
        };
        drop(lock);
        self.release_lock(&title);

        let outcome = result?;
        info!(url = %outcome.urls.url, "Exported");
        Ok(outcome)
    }

    async fn export_locked(&self, title: &str, document: &SchemaDocument) -> AppResult<ExportOutcome> {
        let schema_path = self.store.write(document).await?;
        info!(path = %schema_path.display(), "Wrote schema");

        let artifact_dir = self.artifact_root.join(title);
        fs::create_dir_all(&artifact_dir)
            .await
            .map_err(|e| AppError::storage(&artifact_dir, e))?;

        let schema_path = absolute(&schema_path).await?;
        let artifact_dir = absolute(&artifact_dir).await?;

        self.renderer.render(&schema_path, &artifact_dir).await?;

        if self.verify_artifacts {
            self.verify_output(&artifact_dir).await?;
        }

        Ok(ExportOutcome {
            title: title.to_string(),
            urls: self.urls_for(title),
            schema_path,
            artifact_dir,
        })
    }

    async fn verify_output(&self, artifact_dir: &Path) -> AppResult<()> {
        for entrypoint in self.renderer.entrypoints() {
            let file = artifact_dir.join(entrypoint.file);
            let present = fs::metadata(&file)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !present {
                warn!(file = %file.display(), "Renderer exited cleanly but produced no file");
                return Err(AppError::Render {
                    renderer: self.renderer.name().to_string(),
                    reason: format!("expected output {} was not produced", entrypoint.file),
                    stderr: String::new(),
                });
            }
        }
        Ok(())
    }

    /// Links for `title`, one per renderer entrypoint. No filesystem check.
    pub fn urls_for(&self, title: &str) -> ArtifactUrls {
        let mut url = None;
        let mut redoc_url = None;
        for entrypoint in self.renderer.entrypoints() {
            let link = artifact_url(&self.cdn_url, title, entrypoint.file);
            match entrypoint.role {
                EntrypointRole::Primary => url = url.or(Some(link)),
                EntrypointRole::Redoc => redoc_url = redoc_url.or(Some(link)),
            }
        }

        ArtifactUrls {
            url: url.unwrap_or_else(|| {
                artifact_url(&self.cdn_url, title, self.renderer.primary_entrypoint())
            }),
            redoc_url,
        }
    }

    /// Fully expanded JSON for a stored schema.
    ///
    /// `name` may carry a trailing `.json`, which is stripped once. Read-only
    /// with respect to the store.
    #[instrument(skip(self))]
    pub async fn dereference(&self, name: &str) -> AppResult<String> {
        let title = validate_title(name.strip_suffix(".json").unwrap_or(name))?.to_string();
        info!(title = %title, "Received request for schema");

        let lock = self.title_lock(&title);
        let result = {
            let _guard = lock.lock().await;
            self.dereference_locked(&title).await
        };
        drop(lock);
        self.release_lock(&title);

        result
    }

    async fn dereference_locked(&self, title: &str) -> AppResult<String> {
        let path = self.store.existing_path(title).await?;
        let path = absolute(&path).await?;
        self.dereferencer.dereference(&path).await
    }

    fn title_lock(&self, title: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(title.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry once nobody else holds or waits on it
    fn release_lock(&self, title: &str) {
        self.locks
            .remove_if(title, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.len()
    }
}

async fn absolute(path: &Path) -> AppResult<PathBuf> {
    fs::canonicalize(path)
        .await
        .map_err(|e| AppError::storage(path, e))
}
