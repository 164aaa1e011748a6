//! Local filesystem storage for uploaded note images.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use fundoo_core::files::{FileStore, FileStoreError};

/// Stores files under a root directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory files are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, relative_path: &str, content: &[u8]) -> Result<(), FileStoreError> {
        let path = self.root.join(relative_path);
        let write_failed = |e: std::io::Error| FileStoreError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_failed)?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(write_failed)?;

        debug!(path = %path.display(), bytes = content.len(), "Stored file");
        Ok(())
    }
}
