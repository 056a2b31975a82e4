//! Error types module
//!
//! Two families of errors exist per invocation:
//!
//! - [`PreflightError`]: raised while parsing the envelope and configuration,
//!   before any I/O. These propagate raw to the invoking platform and never
//!   produce an email or an audit record.
//! - [`StageError`]: raised by the fetch, validate and publish stages. These are
//!   caught by the orchestrator, which always sends exactly one failure email and
//!   writes exactly one failure audit record.

/// Failures that abort an invocation before any side effect.
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid storage credentials: {0}")]
    InvalidCredentials(String),

    #[error("Malformed notification envelope: {0}")]
    MalformedEnvelope(String),
}

/// Which notification template a stage failure maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Download, archive or upload failure; the submitter should resubmit.
    Generic,
    /// Every entry in the submitted archive was zero-length.
    EmptyArchive,
}

/// Failures of the fetch, validate and publish stages.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    #[error("Invalid archive: {0}")]
    ArchiveInvalid(String),

    #[error("Empty File")]
    ArchiveEmpty,

    #[error("Upload failed for {key}: {message}")]
    UploadFailed { key: String, message: String },
}

impl StageError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StageError::ArchiveEmpty => FailureKind::EmptyArchive,
            StageError::DownloadFailed { .. }
            | StageError::ArchiveInvalid(_)
            | StageError::UploadFailed { .. } => FailureKind::Generic,
        }
    }

    /// Free-text detail stored in the failure audit record.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Short machine-readable tag for log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            StageError::DownloadFailed { .. } => "fetch",
            StageError::ArchiveInvalid(_) | StageError::ArchiveEmpty => "validate",
            StageError::UploadFailed { .. } => "publish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_archive_detail_is_literal() {
        assert_eq!(StageError::ArchiveEmpty.detail(), "Empty File");
        assert_eq!(StageError::ArchiveEmpty.kind(), FailureKind::EmptyArchive);
    }

    #[test]
    fn test_other_failures_are_generic() {
        let download = StageError::DownloadFailed {
            url: "https://example.com/a.zip".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(download.kind(), FailureKind::Generic);
        assert!(download.detail().contains("connection refused"));
        assert_eq!(download.stage(), "fetch");

        let upload = StageError::UploadFailed {
            key: "alice/alice_1.zip".to_string(),
            message: "403 Forbidden".to_string(),
        };
        assert_eq!(upload.kind(), FailureKind::Generic);
        assert_eq!(upload.stage(), "publish");

        let invalid = StageError::ArchiveInvalid("invalid Zip archive".to_string());
        assert_eq!(invalid.kind(), FailureKind::Generic);
    }

    #[test]
    fn test_detail_containing_empty_file_text_is_not_empty_kind() {
        let download = StageError::DownloadFailed {
            url: "https://example.com/Empty File".to_string(),
            message: "Empty File".to_string(),
        };
        assert_eq!(download.kind(), FailureKind::Generic);
    }
}
