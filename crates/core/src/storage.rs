//! Binary asset storage for uploaded map images.
//!
//! Assets are addressed by an opaque relative path (e.g.
//! `maps/5f0c...e1.png`) returned by [`AssetStore::put`]. The path is what
//! gets persisted on the map row and what the `/media` route serves.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

/// Errors that can occur during asset storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested asset does not exist.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset path escapes the store root or is otherwise malformed.
    #[error("invalid asset path: {0}")]
    InvalidPath(String),

    /// The payload exceeds the configured size limit.
    #[error("asset exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Path-addressed binary asset storage.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `data` under `dir`, keeping the extension of `original_name`.
    /// Returns the relative path of the new asset.
    async fn put(
        &self,
        dir: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, StorageError>;

    /// Read all bytes of the asset at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an asset exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete an asset. Returns `true` if it existed.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Confirm the store can currently accept uploads.
    async fn health_check(&self) -> Result<(), StorageError>;
}

/// Asset store backed by a local directory.
pub struct LocalAssetStore {
    root: PathBuf,
    max_size: u64,
}

impl LocalAssetStore {
    /// Create the store, making sure `root` exists.
    pub async fn new(root: impl Into<PathBuf>, max_size: u64) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root, max_size })
    }

    /// Directory the assets live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative asset path, rejecting anything that would leave
    /// the store root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        let clean = !path.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(
        &self,
        dir: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let rel = format!(
            "{dir}/{}.{}",
            uuid::Uuid::new_v4().simple(),
            file_extension(original_name)
        );
        let full = self.resolve(&rel)?;

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full, data).await?;

        tracing::debug!(path = %rel, bytes = data.len(), "Stored asset");
        Ok(rel)
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        match fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let full = self.resolve(path)?;
        Ok(fs::try_exists(&full).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        let meta = fs::metadata(&self.root).await?;
        if !meta.is_dir() || meta.permissions().readonly() {
            return Err(StorageError::InvalidPath(self.root.display().to_string()));
        }
        Ok(())
    }
}

/// Lowercased, alphanumeric-only extension of `name`, or `"bin"`.
pub fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string())
}
