//! Adapter wiring for the pipeline.

use anyhow::Context;
use relay_core::{
    EmailTransport, InMemoryUploadCounter, KeyStrategy, PipelineVariant, RandomKeyStrategy,
    RelayConfig, SequentialKeyStrategy,
};
use relay_infra::aws::load_sdk_config;
use relay_infra::{AuditStore, DynamoAuditStore, EmailTemplates, Mailer, SesMailer, SmtpMailer};
use relay_processing::{ArchiveValidator, Fetcher};
use relay_storage::{create_publisher, Publisher};
use std::sync::Arc;

/// Everything the pipeline calls out to.
pub struct PipelineComponents {
    pub fetcher: Fetcher,
    pub validator: ArchiveValidator,
    pub publisher: Arc<dyn Publisher>,
    pub mailer: Arc<dyn Mailer>,
    pub audit: Arc<dyn AuditStore>,
    pub keys: Arc<dyn KeyStrategy>,
    pub templates: EmailTemplates,
}

impl PipelineComponents {
    /// Production wiring: configured publisher, SES or SMTP mail, DynamoDB audit.
    pub async fn from_config(config: &RelayConfig) -> Result<Self, anyhow::Error> {
        let sdk_config = load_sdk_config(config.aws_region.as_deref()).await;

        let mailer: Arc<dyn Mailer> = match config.email_transport {
            EmailTransport::Ses => {
                Arc::new(SesMailer::new(&sdk_config, config.email_sender.clone()))
            }
            EmailTransport::Smtp => Arc::new(
                SmtpMailer::from_settings(&config.smtp, &config.email_sender)
                    .context("Failed to initialize SMTP mailer")?,
            ),
        };

        let publisher = create_publisher(config)
            .await
            .context("Failed to initialize publisher")?;

        Ok(Self {
            fetcher: Fetcher::new().context("Failed to initialize fetcher")?,
            validator: ArchiveValidator::new(),
            publisher,
            mailer,
            audit: Arc::new(DynamoAuditStore::new(&sdk_config)),
            keys: key_strategy(config.variant),
            templates: EmailTemplates::new(config.email_signature.clone()),
        })
    }
}

/// Key strategy for a variant. The sequential counter is created here once per
/// process, so it lives as long as the warm environment.
pub fn key_strategy(variant: PipelineVariant) -> Arc<dyn KeyStrategy> {
    match variant {
        PipelineVariant::Simple => Arc::new(RandomKeyStrategy),
        PipelineVariant::Extended => Arc::new(SequentialKeyStrategy::new(Arc::new(
            InMemoryUploadCounter::new(),
        ))),
    }
}
