//! Relay Infrastructure Library
//!
//! This crate provides the external collaborators of the pipeline:
//! - Telemetry initialization
//! - Email notification (SES, SMTP) and the best-effort notify policy
//! - Audit recording (DynamoDB)

pub mod audit;
#[cfg(any(feature = "audit-dynamodb", feature = "email-ses"))]
pub mod aws;
pub mod email;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

// Re-export commonly used types
pub use audit::{record_outcome, AuditError, AuditStore};
#[cfg(feature = "audit-dynamodb")]
pub use audit::DynamoAuditStore;
pub use email::{best_effort_notify, EmailError, EmailMessage, EmailTemplates, Mailer};
#[cfg(feature = "email-ses")]
pub use email::SesMailer;
#[cfg(feature = "email-smtp")]
pub use email::SmtpMailer;

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};
