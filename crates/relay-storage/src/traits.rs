//! Publisher abstraction trait
//!
//! This module defines the Publisher trait that all storage backends must implement.

use async_trait::async_trait;
use relay_core::{ObjectKey, StorageBackend, StorageCredentials};
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where a published object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedObject {
    pub bucket: String,
    pub key: ObjectKey,
    pub size_bytes: u64,
    pub url: String,
}

/// Write-only object storage capability.
///
/// `publish` uploads the full contents of `source` to `bucket` under `key`,
/// overwriting any object already stored there.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        bucket: &str,
        source: &Path,
        key: &ObjectKey,
        credentials: &StorageCredentials,
    ) -> StorageResult<PublishedObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
