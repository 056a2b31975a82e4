//! Configuration module
//!
//! Runtime configuration is sourced from the process environment. The audit
//! table, bucket and credentials are kept optional here: their absence is a
//! per-invocation pre-flight failure, not a startup failure.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::*;

/// Which flavour of the pipeline runs for each invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineVariant {
    /// Download then publish under a random key.
    Simple,
    /// Download, reject empty archives, publish under a per-name sequential key.
    #[default]
    Extended,
}

impl PipelineVariant {
    pub fn validates_archive(&self) -> bool {
        matches!(self, PipelineVariant::Extended)
    }
}

impl FromStr for PipelineVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(PipelineVariant::Simple),
            "extended" => Ok(PipelineVariant::Extended),
            _ => Err(anyhow::anyhow!("Invalid pipeline variant: {}", s)),
        }
    }
}

impl Display for PipelineVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PipelineVariant::Simple => write!(f, "simple"),
            PipelineVariant::Extended => write!(f, "extended"),
        }
    }
}

/// Object storage backend the publisher writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Gcs,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcs" => Ok(StorageBackend::Gcs),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Gcs => write!(f, "gcs"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// Email delivery backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailTransport {
    #[default]
    Ses,
    Smtp,
}

impl FromStr for EmailTransport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ses" => Ok(EmailTransport::Ses),
            "smtp" => Ok(EmailTransport::Smtp),
            _ => Err(anyhow::anyhow!("Invalid email transport: {}", s)),
        }
    }
}

impl Display for EmailTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EmailTransport::Ses => write!(f, "ses"),
            EmailTransport::Smtp => write!(f, "smtp"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub tls: bool,
}

/// Relay configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub audit_table: Option<String>,
    pub bucket: Option<String>,
    /// Base64-encoded service account JSON, decoded per invocation.
    pub credentials_blob: Option<String>,
    pub variant: PipelineVariant,
    pub scratch_dir: PathBuf,
    pub storage_backend: StorageBackend,
    /// Root directory for the local backend; buckets become subdirectories.
    pub local_storage_path: Option<PathBuf>,
    pub email_transport: EmailTransport,
    pub email_sender: String,
    pub email_signature: String,
    pub smtp: SmtpSettings,
    pub aws_region: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            audit_table: None,
            bucket: None,
            credentials_blob: None,
            variant: PipelineVariant::default(),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            storage_backend: StorageBackend::default(),
            local_storage_path: None,
            email_transport: EmailTransport::default(),
            email_sender: DEFAULT_EMAIL_SENDER.to_string(),
            email_signature: DEFAULT_EMAIL_SIGNATURE.to_string(),
            smtp: SmtpSettings {
                port: DEFAULT_SMTP_PORT,
                tls: true,
                ..Default::default()
            },
            aws_region: None,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values are
    /// treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let variant = match var(ENV_PIPELINE_VARIANT) {
            Some(v) => v.parse()?,
            None => PipelineVariant::default(),
        };

        let storage_backend = match var(ENV_STORAGE_BACKEND) {
            Some(v) => v.parse()?,
            None => StorageBackend::default(),
        };

        let email_transport = match var(ENV_EMAIL_TRANSPORT) {
            Some(v) => v.parse()?,
            None => EmailTransport::default(),
        };

        let smtp = SmtpSettings {
            host: var("SMTP_HOST"),
            port: var("SMTP_PORT")
                .and_then(|s| s.parse().ok())
                .filter(|&p| p > 0)
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: var("SMTP_USER"),
            password: var("SMTP_PASSWORD"),
            tls: var("SMTP_TLS")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
        };

        let config = RelayConfig {
            audit_table: var(ENV_AUDIT_TABLE),
            bucket: var(ENV_BUCKET),
            credentials_blob: var(ENV_CREDENTIALS),
            variant,
            scratch_dir: var(ENV_SCRATCH_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRATCH_DIR)),
            storage_backend,
            local_storage_path: var(ENV_LOCAL_STORAGE_PATH).map(PathBuf::from),
            email_transport,
            email_sender: var(ENV_EMAIL_SENDER)
                .unwrap_or_else(|| DEFAULT_EMAIL_SENDER.to_string()),
            email_signature: var(ENV_EMAIL_SIGNATURE)
                .unwrap_or_else(|| DEFAULT_EMAIL_SIGNATURE.to_string()),
            smtp,
            aws_region: var("AWS_REGION").or_else(|| var("AWS_DEFAULT_REGION")),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.email_transport == EmailTransport::Smtp && self.smtp.host.is_none() {
            return Err(anyhow::anyhow!(
                "EMAIL_TRANSPORT=smtp requires SMTP_HOST to be set"
            ));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        if self.email_sender.trim().is_empty() {
            return Err(anyhow::anyhow!("EMAIL_SENDER must not be empty"));
        }

        Ok(())
    }
}
