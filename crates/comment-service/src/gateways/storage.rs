//! Filesystem blob store
//!
//! Stores attachment bytes under the configured upload directory and hands
//! back the public URL path they will be served from. Keys are generated by
//! the caller (UUID + extension), so writes never collide.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use comment_core::traits::{BlobStore, GatewayError};

/// Blob store backed by a local directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FsBlobStore {
    /// Create a new store rooted at `root`, serving under `public_base`
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, GatewayError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| GatewayError::Storage(e.to_string()))?;

        let path = self.root.join(key);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| GatewayError::Storage(e.to_string()))?;

        Ok(format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            key
        ))
    }
}
