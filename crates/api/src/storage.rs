//! Contract document storage under the configured media root.
//!
//! Documents live in `<media_root>/documents/` and are referenced from the
//! database by their path relative to the media root, e.g.
//! `documents/5f0c..._contract.pdf`.

use std::path::{Path, PathBuf};

use crm_core::validation::sanitize_file_name;
use crm_db::models::contract::DOCUMENTS_DIR;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a stored document.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write an uploaded document and return its relative reference.
    ///
    /// The client file name is sanitized and prefixed with a random UUID, so
    /// two uploads never overwrite each other.
    pub async fn save(&self, file_name: &str, data: &[u8]) -> std::io::Result<String> {
        let relative = format!(
            "{DOCUMENTS_DIR}/{}_{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(file_name)
        );

        tokio::fs::create_dir_all(self.root.join(DOCUMENTS_DIR)).await?;
        tokio::fs::write(self.resolve(&relative), data).await?;

        tracing::debug!(path = %relative, bytes = data.len(), "Stored document");
        Ok(relative)
    }

    /// Best-effort removal of a stored document.
    pub async fn remove(&self, relative: &str) {
        if let Err(e) = tokio::fs::remove_file(self.resolve(relative)).await {
            tracing::warn!(path = %relative, error = %e, "Failed to remove document");
        }
    }
}
