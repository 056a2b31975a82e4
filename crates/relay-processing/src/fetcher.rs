//! Streaming download of the submitted file to local scratch storage.
//!
//! One attempt per invocation, no retries and no request timeout: an
//! unresponsive server holds the invocation until the host's own limit.

use futures::StreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server responded with status {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// HTTP fetcher writing response bodies to disk as they stream in.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// GET `url` and persist the body at `destination`.
    ///
    /// Returns the number of bytes written once the file is flushed and synced.
    /// A non-success status is a failure; nothing is written in that case.
    #[tracing::instrument(skip(self, destination), fields(destination = %destination.display()))]
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        let parsed_url = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                message: "only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        let start = std::time::Instant::now();

        let response = self.client.get(parsed_url).send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Failed to download from URL");
            FetchError::Transport(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let write_error = |e: std::io::Error| FetchError::Write {
            path: destination.display().to_string(),
            message: e.to_string(),
        };

        let mut file = File::create(destination).await.map_err(write_error)?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Transport(e.to_string()))?;
            file.write_all(&chunk).await.map_err(write_error)?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(write_error)?;
        file.sync_all().await.map_err(write_error)?;

        tracing::info!(
            url = %url,
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Download complete"
        );

        Ok(written)
    }
}
