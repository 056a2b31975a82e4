//! Test helpers: in-memory collaborators and fixtures for pipeline tests.
//!
//! Run from workspace root: `cargo test -p relay-worker --test pipeline_test`.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use relay_core::{
    AuditRecord, Envelope, KeyStrategy, ObjectKey, PipelineVariant, RelayConfig, StorageBackend,
    StorageCredentials, SubmissionPayload,
};
use relay_infra::{AuditError, AuditStore, EmailError, EmailTemplates, Mailer};
use relay_processing::{ArchiveValidator, Fetcher};
use relay_storage::{PublishedObject, Publisher, StorageError, StorageResult};
use relay_worker::{Pipeline, PipelineComponents};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BUCKET: &str = "submissions";
pub const TABLE: &str = "relay-audit";

/// Publisher that keeps uploads in memory.
#[derive(Default)]
pub struct MemoryPublisher {
    pub fail_with: Option<String>,
    pub objects: Mutex<Vec<(String, ObjectKey, Vec<u8>)>>,
}

impl MemoryPublisher {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(_, key, _)| key.to_string())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(
        &self,
        bucket: &str,
        source: &Path,
        key: &ObjectKey,
        _credentials: &StorageCredentials,
    ) -> StorageResult<PublishedObject> {
        if let Some(message) = &self.fail_with {
            return Err(StorageError::AuthenticationFailed(message.clone()));
        }
        let data = tokio::fs::read(source).await?;
        let size_bytes = data.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.clone(), data));
        Ok(PublishedObject {
            bucket: bucket.to_string(),
            key: key.clone(),
            size_bytes,
            url: format!("memory://{}/{}", bucket, key),
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that records every attempt, optionally rejecting them all.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.fail {
            return Err(EmailError::Delivery("554 Message rejected".to_string()));
        }
        Ok(())
    }
}

/// Audit store that keeps records in memory, optionally failing every write.
#[derive(Default)]
pub struct MemoryAuditStore {
    pub fail: bool,
    pub records: Mutex<Vec<(String, AuditRecord)>>,
}

impl MemoryAuditStore {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn tables(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(table, _)| table.clone())
            .collect()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn put(&self, table: &str, record: &AuditRecord) -> Result<(), AuditError> {
        if self.fail {
            return Err(AuditError::WriteFailed {
                table: table.to_string(),
                id: record.id.to_string(),
                message: "ProvisionedThroughputExceededException".to_string(),
            });
        }
        self.records
            .lock()
            .unwrap()
            .push((table.to_string(), record.clone()));
        Ok(())
    }
}

/// Pipeline plus handles on its collaborators.
pub struct TestPipeline {
    pub pipeline: Pipeline,
    pub publisher: Arc<MemoryPublisher>,
    pub mailer: Arc<RecordingMailer>,
    pub audit: Arc<MemoryAuditStore>,
    pub _scratch: TempDir,
}

pub struct TestPipelineBuilder {
    config: RelayConfig,
    publisher: MemoryPublisher,
    mailer: RecordingMailer,
    audit: MemoryAuditStore,
    keys: Option<Arc<dyn KeyStrategy>>,
}

impl TestPipelineBuilder {
    pub fn new(variant: PipelineVariant) -> Self {
        Self {
            config: RelayConfig {
                audit_table: Some(TABLE.to_string()),
                bucket: Some(BUCKET.to_string()),
                credentials_blob: Some(credentials_blob()),
                variant,
                ..Default::default()
            },
            publisher: MemoryPublisher::default(),
            mailer: RecordingMailer::default(),
            audit: MemoryAuditStore::default(),
            keys: None,
        }
    }

    pub fn config(mut self, f: impl FnOnce(&mut RelayConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn publisher(mut self, publisher: MemoryPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn failing_mailer(mut self) -> Self {
        self.mailer.fail = true;
        self
    }

    pub fn failing_audit(mut self) -> Self {
        self.audit.fail = true;
        self
    }

    pub fn keys(mut self, keys: Arc<dyn KeyStrategy>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn build(self) -> TestPipeline {
        let scratch = tempfile::tempdir().unwrap();
        let mut config = self.config;
        config.scratch_dir = scratch.path().to_path_buf();

        let publisher = Arc::new(self.publisher);
        let mailer = Arc::new(self.mailer);
        let audit = Arc::new(self.audit);
        let keys = self
            .keys
            .unwrap_or_else(|| relay_worker::components::key_strategy(config.variant));

        let components = PipelineComponents {
            fetcher: Fetcher::new().unwrap(),
            validator: ArchiveValidator::new(),
            publisher: publisher.clone(),
            mailer: mailer.clone(),
            audit: audit.clone(),
            keys,
            templates: EmailTemplates::new("Relay Team"),
        };

        TestPipeline {
            pipeline: Pipeline::new(config, components),
            publisher,
            mailer,
            audit,
            _scratch: scratch,
        }
    }
}

pub fn credentials_blob() -> String {
    STANDARD.encode(
        r#"{"type":"service_account","project_id":"relay-test","client_email":"relay@relay-test.iam.gserviceaccount.com"}"#,
    )
}

pub fn envelope(name: &str, url: &str, email: &str) -> Envelope {
    Envelope::wrap(&SubmissionPayload {
        name: Some(name.to_string()),
        url: Some(url.to_string()),
        email: Some(email.to_string()),
    })
    .unwrap()
}

/// Build a zip archive in memory from `(name, contents)` pairs.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::{FileOptions, ZipWriter};

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        for (name, data) in entries {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// Serve `body` at `path` on a mock server; returns the server and full URL.
pub async fn serve(path: &str, status: usize, body: Vec<u8>) -> (mockito::ServerGuard, String) {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", path)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;
    let url = format!("{}{}", server.url(), path);
    (server, url)
}
