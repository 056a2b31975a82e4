use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use relay_core::{AuditRecord, Envelope, RelayConfig, SubmissionPayload};
use relay_infra::{init_telemetry, shutdown_telemetry, AuditError, AuditStore, EmailError, Mailer};
use relay_storage::LocalPublisher;
use relay_worker::{Pipeline, PipelineComponents};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "relay-replay")]
#[command(about = "Run one relay invocation locally from an event file or inline fields")]
struct Args {
    /// Path to a trigger event JSON file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["name", "url", "email"])]
    event: Option<PathBuf>,

    /// Submitter name (builds an event when --event is not given)
    #[arg(long)]
    name: Option<String>,

    /// Source URL of the submission
    #[arg(long)]
    url: Option<String>,

    /// Recipient address for the notification
    #[arg(long)]
    email: Option<String>,

    /// Publish into this directory instead of the configured backend
    #[arg(long, value_name = "DIR")]
    local_root: Option<PathBuf>,

    /// Log notifications and audit records instead of delivering them
    #[arg(long)]
    dry_run: bool,
}

/// Prints notifications to the log instead of sending them.
struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        tracing::info!(recipient = %recipient, subject = %subject, body = %body, "Dry-run email");
        Ok(())
    }
}

/// Prints audit records to the log instead of writing them.
struct ConsoleAuditStore;

#[async_trait]
impl AuditStore for ConsoleAuditStore {
    async fn put(&self, table: &str, record: &AuditRecord) -> Result<(), AuditError> {
        tracing::info!(
            table = %table,
            audit_id = %record.id,
            name = %record.name,
            email = %record.email,
            timestamp = %record.timestamp_iso(),
            status = %record.status,
            details = %record.details,
            "Dry-run audit record"
        );
        Ok(())
    }
}

fn load_envelope(args: &Args) -> Result<Envelope> {
    if let Some(path) = &args.event {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).context("Event file is not valid JSON")?;
        return Ok(Envelope::from_value(value)?);
    }

    let payload = SubmissionPayload {
        name: args.name.clone(),
        url: args.url.clone(),
        email: args.email.clone(),
    };
    Ok(Envelope::wrap(&payload)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry("relay-replay").map_err(|e| anyhow::anyhow!(e))?;

    let args = Args::parse();
    let config = RelayConfig::from_env()?;
    let envelope = load_envelope(&args)?;

    let mut components = if args.dry_run {
        PipelineComponents {
            fetcher: relay_processing::Fetcher::new()?,
            validator: relay_processing::ArchiveValidator::new(),
            publisher: relay_storage::create_publisher(&config).await?,
            mailer: Arc::new(ConsoleMailer),
            audit: Arc::new(ConsoleAuditStore),
            keys: relay_worker::components::key_strategy(config.variant),
            templates: relay_infra::EmailTemplates::new(config.email_signature.clone()),
        }
    } else {
        PipelineComponents::from_config(&config).await?
    };

    if let Some(root) = &args.local_root {
        components.publisher = Arc::new(LocalPublisher::new(root.clone()).await?);
    }

    let pipeline = Pipeline::new(config, components);
    let response = pipeline.handle(&envelope).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    shutdown_telemetry().await;
    Ok(())
}
