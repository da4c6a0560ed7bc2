//! Artifact catalog
//!
//! Lists the artifact directories already produced and turns each into a
//! CDN link. A directory is listed whether or not it holds rendered files.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, instrument};

use crate::error::{AppError, AppResult};

/// Compose `<cdn><title>/<file>`. The CDN base is used verbatim.
pub fn artifact_url(cdn_url: &str, title: &str, file: &str) -> String {
    format!("{}{}/{}", cdn_url, title, file)
}

/// Read-only view over the artifact root
#[derive(Debug, Clone)]
pub struct ArtifactCatalog {
    root: PathBuf,
    cdn_url: String,
    entrypoint: &'static str,
}

impl ArtifactCatalog {
    pub fn new(root: impl Into<PathBuf>, cdn_url: impl Into<String>, entrypoint: &'static str) -> Self {
        Self {
            root: root.into(),
            cdn_url: cdn_url.into(),
            entrypoint,
        }
    }

    /// CDN links for every artifact directory, sorted by title.
    ///
    /// Fails with `Storage` when the root cannot be read, including when it
    /// does not exist yet.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| AppError::storage(&self.root, e))?;

        let mut titles = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::storage(&self.root, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| AppError::storage(entry.path(), e))?;
            if file_type.is_dir() {
                titles.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        titles.sort();

        debug!(count = titles.len(), "Listed artifacts");
        Ok(titles
            .iter()
            .map(|title| artifact_url(&self.cdn_url, title, self.entrypoint))
            .collect())
    }
}
