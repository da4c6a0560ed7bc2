//! Schema store
//!
//! File-based key/blob store: one `<title>.json` per schema title under a
//! single root directory. Writes replace earlier content for the same title.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, instrument};

use crate::{
    error::{AppError, AppResult},
    schema::{validate_title, SchemaDocument},
};

/// Persists schema documents keyed by their title
#[derive(Debug, Clone)]
pub struct SchemaStore {
    root: PathBuf,
}

impl SchemaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of the stored schema for `title`
    pub fn path_for(&self, title: &str) -> AppResult<PathBuf> {
        let title = validate_title(title)?;
        Ok(self.root.join(format!("{}.json", title)))
    }

    /// Serialize and persist a document, replacing any prior version.
    ///
    /// Content goes to a sibling temp file first and is renamed into place,
    /// so readers see either the old or the new document.
    #[instrument(skip(self, document), fields(title = %document.info.title))]
    pub async fn write(&self, document: &SchemaDocument) -> AppResult<PathBuf> {
        let path = self.path_for(document.title()?)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::storage(&self.root, e))?;

        let json = serde_json::to_vec_pretty(document).map_err(|e| {
            AppError::Internal(anyhow::Error::new(e).context("failed to serialize schema"))
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| AppError::storage(&tmp, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::storage(&path, e))?;

        debug!(path = %path.display(), bytes = json.len(), "Stored schema");
        Ok(path)
    }

    /// Path of an already stored schema, `Storage(NotFound)` if absent
    pub async fn existing_path(&self, title: &str) -> AppResult<PathBuf> {
        let path = self.path_for(title)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(AppError::storage(
                &path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a regular file"),
            )),
            Err(e) => Err(AppError::storage(&path, e)),
        }
    }
}
