use crate::traits::{PublishedObject, Publisher, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use relay_core::{ObjectKey, StorageCredentials};
use std::path::Path;

const PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

/// Google Cloud Storage publisher
///
/// A client is built per call because the service account arrives with each
/// invocation's configuration rather than at startup.
#[derive(Clone, Debug, Default)]
pub struct GcsPublisher;

impl GcsPublisher {
    pub fn new() -> Self {
        Self
    }

    fn build_store(
        bucket: &str,
        credentials: &StorageCredentials,
    ) -> StorageResult<GoogleCloudStorage> {
        GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_service_account_key(credentials.as_json())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    /// Public URL for an object: https://storage.googleapis.com/{bucket}/{key}
    fn generate_url(bucket: &str, key: &ObjectKey) -> String {
        format!("{}/{}/{}", PUBLIC_BASE_URL, bucket, key)
    }

    fn classify(error: ObjectStoreError) -> StorageError {
        match error {
            ObjectStoreError::Unauthenticated { .. }
            | ObjectStoreError::PermissionDenied { .. } => {
                StorageError::AuthenticationFailed(error.to_string())
            }
            other => StorageError::UploadFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl Publisher for GcsPublisher {
    async fn publish(
        &self,
        bucket: &str,
        source: &Path,
        key: &ObjectKey,
        credentials: &StorageCredentials,
    ) -> StorageResult<PublishedObject> {
        let store = Self::build_store(bucket, credentials)?;

        let data = tokio::fs::read(source).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to read staged file {}: {}",
                source.display(),
                e
            ))
        })?;
        let size = data.len() as u64;
        let location = ObjectPath::from(key.as_str());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store
            .put(&location, PutPayload::from(Bytes::from(data)))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS upload failed"
            );
            Self::classify(e)
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            project_id = ?credentials.project_id(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS upload successful"
        );

        Ok(PublishedObject {
            bucket: bucket.to_string(),
            key: key.clone(),
            size_bytes: size,
            url: Self::generate_url(bucket, key),
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}
