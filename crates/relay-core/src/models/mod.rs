//! Domain models
//!
//! Shapes that flow through one invocation: the inbound envelope, the parsed
//! submission, decoded storage credentials, the audit record and the fixed
//! invocation response.

pub mod audit;
pub mod credentials;
pub mod envelope;
pub mod response;
pub mod submission;

pub use audit::{AuditRecord, AuditStatus};
pub use credentials::StorageCredentials;
pub use envelope::{Envelope, SubmissionPayload};
pub use response::InvocationResponse;
pub use submission::{PreparedSubmission, SubmissionRequest};
