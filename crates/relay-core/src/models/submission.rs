use crate::config::RelayConfig;
use crate::error::PreflightError;
use crate::models::credentials::StorageCredentials;
use crate::models::envelope::{Envelope, SubmissionPayload};

/// A validated submission. All three fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    name: String,
    source_url: String,
    recipient_email: String,
}

impl SubmissionRequest {
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        recipient_email: impl Into<String>,
    ) -> Result<Self, PreflightError> {
        let name = name.into().trim().to_string();
        let source_url = source_url.into().trim().to_string();
        let recipient_email = recipient_email.into().trim().to_string();

        let missing: Vec<&str> = [
            ("name", name.is_empty()),
            ("url", source_url.is_empty()),
            ("email", recipient_email.is_empty()),
        ]
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(field, _)| *field)
        .collect();

        if !missing.is_empty() {
            return Err(PreflightError::Validation(format!(
                "Missing required data: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            name,
            source_url,
            recipient_email,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn recipient_email(&self) -> &str {
        &self.recipient_email
    }
}

/// Everything one invocation needs once pre-flight has passed.
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub request: SubmissionRequest,
    pub bucket: String,
    pub audit_table: String,
    pub credentials: StorageCredentials,
}

impl PreparedSubmission {
    /// Parse the envelope and resolve per-invocation configuration.
    ///
    /// Check order: audit table, envelope, bucket, then credentials and the
    /// submission fields, and finally credential decoding.
    pub fn prepare(config: &RelayConfig, envelope: &Envelope) -> Result<Self, PreflightError> {
        let audit_table = config.audit_table.clone().ok_or_else(|| {
            PreflightError::Configuration(
                "audit table name not set in environment variables".to_string(),
            )
        })?;

        let payload = envelope.payload()?;

        let bucket = config.bucket.clone().ok_or_else(|| {
            PreflightError::Configuration(
                "bucket name not set in environment variables".to_string(),
            )
        })?;

        let credentials_blob = config.credentials_blob.as_deref().ok_or_else(|| {
            PreflightError::Validation("Missing required data: storage credentials".to_string())
        })?;

        let request = Self::request_from_payload(payload)?;
        let credentials = StorageCredentials::decode(credentials_blob)?;

        Ok(Self {
            request,
            bucket,
            audit_table,
            credentials,
        })
    }

    fn request_from_payload(
        payload: SubmissionPayload,
    ) -> Result<SubmissionRequest, PreflightError> {
        SubmissionRequest::new(
            payload.name.unwrap_or_default(),
            payload.url.unwrap_or_default(),
            payload.email.unwrap_or_default(),
        )
    }
}
