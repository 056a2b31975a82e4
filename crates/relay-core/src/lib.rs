//! Relay Core Library
//!
//! This crate provides the configuration, error taxonomy, data model and
//! object-key strategies shared by every relay component.

pub mod config;
pub mod constants;
pub mod error;
pub mod keys;
pub mod models;

// Re-export commonly used types
pub use config::{EmailTransport, PipelineVariant, RelayConfig, SmtpSettings, StorageBackend};
pub use error::{FailureKind, PreflightError, StageError};
pub use keys::{
    staging_path, InMemoryUploadCounter, KeyStrategy, ObjectKey, RandomKeyStrategy,
    SequentialKeyStrategy, UploadCounter,
};
pub use models::{
    AuditRecord, AuditStatus, Envelope, InvocationResponse, PreparedSubmission, StorageCredentials,
    SubmissionPayload, SubmissionRequest,
};
