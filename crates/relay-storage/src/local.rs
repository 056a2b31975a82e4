use crate::traits::{PublishedObject, Publisher, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use relay_core::{ObjectKey, StorageCredentials};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem publisher
///
/// Objects land at `{base_path}/{bucket}/{key}`. Credentials are ignored.
#[derive(Clone, Debug)]
pub struct LocalPublisher {
    base_path: PathBuf,
}

impl LocalPublisher {
    /// Create a new LocalPublisher rooted at `base_path` (created if missing).
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalPublisher { base_path })
    }

    /// Convert bucket and key to a filesystem path, rejecting traversal.
    fn object_path(&self, bucket: &str, key: &ObjectKey) -> StorageResult<PathBuf> {
        for part in [bucket, key.as_str()] {
            if part.is_empty() || part.contains("..") || part.starts_with('/') {
                return Err(StorageError::InvalidKey(format!(
                    "Storage path component {:?} contains invalid characters",
                    part
                )));
            }
        }

        if bucket.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "Bucket name {:?} must not contain '/'",
                bucket
            )));
        }

        Ok(self.base_path.join(bucket).join(key.as_str()))
    }

    fn generate_url(path: &Path) -> String {
        format!("file://{}", path.display())
    }
}

#[async_trait]
impl Publisher for LocalPublisher {
    async fn publish(
        &self,
        bucket: &str,
        source: &Path,
        key: &ObjectKey,
        _credentials: &StorageCredentials,
    ) -> StorageResult<PublishedObject> {
        let path = self.object_path(bucket, key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let start = std::time::Instant::now();

        let size = fs::copy(source, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to copy {} to {}: {}",
                source.display(),
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local publish successful"
        );

        Ok(PublishedObject {
            bucket: bucket.to_string(),
            key: key.clone(),
            size_bytes: size,
            url: Self::generate_url(&path),
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
