use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::error::PreflightError;

/// Decoded service-account credentials for the destination bucket.
///
/// The configured blob is base64 over a JSON document. Both layers are decoded
/// up front so a malformed blob fails the invocation before any I/O.
#[derive(Clone)]
pub struct StorageCredentials {
    json: String,
    value: serde_json::Map<String, serde_json::Value>,
}

impl StorageCredentials {
    pub fn decode(blob: &str) -> Result<Self, PreflightError> {
        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|e| PreflightError::InvalidCredentials(format!("invalid base64: {}", e)))?;

        let json = String::from_utf8(bytes)
            .map_err(|e| PreflightError::InvalidCredentials(format!("invalid UTF-8: {}", e)))?;

        Self::from_json(json)
    }

    pub fn from_json(json: String) -> Result<Self, PreflightError> {
        let value: serde_json::Value = serde_json::from_str(&json)
            .map_err(|e| PreflightError::InvalidCredentials(format!("invalid JSON: {}", e)))?;

        match value {
            serde_json::Value::Object(value) => Ok(Self { json, value }),
            _ => Err(PreflightError::InvalidCredentials(
                "credentials must be a JSON object".to_string(),
            )),
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.value.get("project_id").and_then(|v| v.as_str())
    }

    pub fn client_email(&self) -> Option<&str> {
        self.value.get("client_email").and_then(|v| v.as_str())
    }

    /// The decoded JSON document, as handed to the storage client.
    pub fn as_json(&self) -> &str {
        &self.json
    }
}

impl Debug for StorageCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageCredentials")
            .field("project_id", &self.project_id())
            .field("client_email", &self.client_email())
            .finish_non_exhaustive()
    }
}
