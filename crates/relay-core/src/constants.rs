//! Environment variable names and fixed defaults.

pub const ENV_AUDIT_TABLE: &str = "DYNAMODB_TABLE_NAME";
pub const ENV_BUCKET: &str = "GCP_BUCKET_NAME";
pub const ENV_CREDENTIALS: &str = "GCP_CREDENTIALS";
pub const ENV_PIPELINE_VARIANT: &str = "PIPELINE_VARIANT";
pub const ENV_SCRATCH_DIR: &str = "SCRATCH_DIR";
pub const ENV_STORAGE_BACKEND: &str = "STORAGE_BACKEND";
pub const ENV_LOCAL_STORAGE_PATH: &str = "LOCAL_STORAGE_PATH";
pub const ENV_EMAIL_TRANSPORT: &str = "EMAIL_TRANSPORT";
pub const ENV_EMAIL_SENDER: &str = "EMAIL_SENDER";
pub const ENV_EMAIL_SIGNATURE: &str = "EMAIL_SIGNATURE";

pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";
pub const DEFAULT_EMAIL_SENDER: &str = "Pramod Cloud <no-reply@pramod.cloud>";
pub const DEFAULT_EMAIL_SIGNATURE: &str = "Pramod Cloud";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Extension given to staged files and object keys.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Audit detail written when the archive was published.
pub const SUCCESS_DETAIL: &str = "File downloaded and uploaded successfully";
