#[cfg(feature = "storage-gcs")]
use crate::GcsPublisher;
#[cfg(feature = "storage-local")]
use crate::LocalPublisher;
use crate::{Publisher, StorageBackend, StorageError, StorageResult};
use relay_core::RelayConfig;
use std::sync::Arc;

/// Create a publisher based on configuration
pub async fn create_publisher(config: &RelayConfig) -> StorageResult<Arc<dyn Publisher>> {
    match config.storage_backend {
        #[cfg(feature = "storage-gcs")]
        StorageBackend::Gcs => Ok(Arc::new(GcsPublisher::new())),

        #[cfg(not(feature = "storage-gcs"))]
        StorageBackend::Gcs => Err(StorageError::ConfigError(
            "GCS storage backend not available (storage-gcs feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let publisher = LocalPublisher::new(base_path).await?;
            Ok(Arc::new(publisher))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
