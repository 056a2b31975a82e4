use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Archive validation errors
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Invalid archive {path}: {message}")]
    InvalidArchive { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive inspection task failed: {0}")]
    TaskFailed(String),
}

/// Result of fully decompressing every entry of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: usize,
    pub uncompressed_bytes: u64,
}

impl ArchiveSummary {
    /// True when every entry decompressed to zero bytes, including the
    /// zero-entry case.
    pub fn is_empty(&self) -> bool {
        self.uncompressed_bytes == 0
    }
}

/// Zip archive validator
///
/// Each entry is decompressed fully into memory, so cost is proportional to
/// the total uncompressed size.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveValidator;

impl ArchiveValidator {
    pub fn new() -> Self {
        Self
    }

    pub async fn inspect(&self, path: &Path) -> Result<ArchiveSummary, ArchiveError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::inspect_blocking(&path))
            .await
            .map_err(|e| ArchiveError::TaskFailed(e.to_string()))?
    }

    fn inspect_blocking(path: &Path) -> Result<ArchiveSummary, ArchiveError> {
        let invalid = |message: String| ArchiveError::InvalidArchive {
            path: path.display().to_string(),
            message,
        };

        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| invalid(e.to_string()))?;

        let mut uncompressed_bytes: u64 = 0;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(|e| invalid(e.to_string()))?;
            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(|e| invalid(format!("entry {}: {}", entry.name(), e)))?;
            uncompressed_bytes += contents.len() as u64;
        }

        let summary = ArchiveSummary {
            entries: archive.len(),
            uncompressed_bytes,
        };

        tracing::debug!(
            path = %path.display(),
            entries = summary.entries,
            uncompressed_bytes = summary.uncompressed_bytes,
            "Archive inspected"
        );

        Ok(summary)
    }
}
