//! Audit recording
//!
//! Exactly one record is appended per invocation. Records are never read back.

#[cfg(feature = "audit-dynamodb")]
mod dynamodb;

use async_trait::async_trait;
use relay_core::{AuditRecord, AuditStatus};

#[cfg(feature = "audit-dynamodb")]
pub use dynamodb::DynamoAuditStore;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Failed to write audit record {id} to {table}: {message}")]
    WriteFailed {
        table: String,
        id: String,
        message: String,
    },
}

/// Append-only audit store.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn put(&self, table: &str, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Create a record with a fresh id and timestamp and append it to `table`.
pub async fn record_outcome(
    store: &dyn AuditStore,
    table: &str,
    name: &str,
    email: &str,
    status: AuditStatus,
    details: &str,
) -> Result<AuditRecord, AuditError> {
    let record = AuditRecord::new(name, email, status, details);
    store.put(table, &record).await?;

    tracing::info!(
        table = %table,
        audit_id = %record.id,
        status = %record.status,
        "Audit record written"
    );

    Ok(record)
}
