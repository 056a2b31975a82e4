use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Outcome tag stored in the audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditStatus {
    Success,
    Failure,
}

impl Display for AuditStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AuditStatus::Success => write!(f, "Success"),
            AuditStatus::Failure => write!(f, "Failure"),
        }
    }
}

/// One write-only record per invocation describing its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub status: AuditStatus,
    pub details: String,
}

impl AuditRecord {
    /// Create a record with a fresh id, stamped now.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        status: AuditStatus,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            timestamp: Utc::now(),
            status,
            details: details.into(),
        }
    }

    /// ISO-8601 creation time with millisecond precision, e.g. `2024-03-01T12:00:00.000Z`.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
