//! Invocation pipeline
//!
//! ```text
//! PARSE -> FETCH -> [VALIDATE ->] PUBLISH -> NOTIFY_SUCCESS -> RECORD_SUCCESS
//!            \-(stage failure)-> NOTIFY_FAILURE -> RECORD_FAILURE
//! ```
//!
//! Parse failures propagate without notification. Stage failures are turned
//! into exactly one failure email and one failure audit record, and the
//! invocation still returns the fixed success response. An audit write failure
//! propagates after the email has been attempted.

use relay_core::constants::SUCCESS_DETAIL;
use relay_core::{
    staging_path, AuditStatus, Envelope, FailureKind, InvocationResponse, PreflightError,
    PreparedSubmission, RelayConfig, StageError,
};
use relay_infra::{best_effort_notify, record_outcome, AuditError};
use relay_storage::PublishedObject;
use std::time::Instant;

use crate::components::PipelineComponents;

/// Errors that escape an invocation.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

pub struct Pipeline {
    config: RelayConfig,
    components: PipelineComponents,
}

impl Pipeline {
    pub fn new(config: RelayConfig, components: PipelineComponents) -> Self {
        Self { config, components }
    }

    /// Wire production adapters for `config`.
    pub async fn from_config(config: RelayConfig) -> Result<Self, anyhow::Error> {
        let components = PipelineComponents::from_config(&config).await?;
        Ok(Self::new(config, components))
    }

    /// Handle a raw trigger event.
    pub async fn handle_event(
        &self,
        event: serde_json::Value,
    ) -> Result<InvocationResponse, InvocationError> {
        let envelope = Envelope::from_value(event)?;
        self.handle(&envelope).await
    }

    #[tracing::instrument(skip_all, fields(variant = %self.config.variant))]
    pub async fn handle(&self, envelope: &Envelope) -> Result<InvocationResponse, InvocationError> {
        let prepared = PreparedSubmission::prepare(&self.config, envelope).map_err(|e| {
            tracing::error!(error = %e, "Pre-flight failed");
            e
        })?;

        let name = prepared.request.name();
        let recipient = prepared.request.recipient_email();
        let templates = &self.components.templates;
        let start = Instant::now();

        match self.process(&prepared).await {
            Ok(published) => {
                tracing::info!(
                    name = %name,
                    bucket = %published.bucket,
                    key = %published.key,
                    object_url = %published.url,
                    backend = %self.components.publisher.backend_type(),
                    size_bytes = published.size_bytes,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Submission published"
                );
                best_effort_notify(
                    self.components.mailer.as_ref(),
                    recipient,
                    &templates.success(name),
                )
                .await;
                record_outcome(
                    self.components.audit.as_ref(),
                    &prepared.audit_table,
                    name,
                    recipient,
                    AuditStatus::Success,
                    SUCCESS_DETAIL,
                )
                .await?;
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    stage = e.stage(),
                    name = %name,
                    url = %prepared.request.source_url(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Submission failed"
                );
                let message = match e.kind() {
                    FailureKind::EmptyArchive => templates.empty_archive(name),
                    FailureKind::Generic => templates.failure(name),
                };
                best_effort_notify(self.components.mailer.as_ref(), recipient, &message).await;
                record_outcome(
                    self.components.audit.as_ref(),
                    &prepared.audit_table,
                    name,
                    recipient,
                    AuditStatus::Failure,
                    &e.detail(),
                )
                .await?;
            }
        }

        Ok(InvocationResponse::success())
    }

    /// Fetch, optionally validate, and publish. The staged file is left for the
    /// environment to clean up.
    async fn process(&self, prepared: &PreparedSubmission) -> Result<PublishedObject, StageError> {
        let request = &prepared.request;
        let staged = staging_path(&self.config.scratch_dir, request.name());

        self.components
            .fetcher
            .fetch(request.source_url(), &staged)
            .await
            .map_err(|e| StageError::DownloadFailed {
                url: request.source_url().to_string(),
                message: e.to_string(),
            })?;

        if self.config.variant.validates_archive() {
            let summary = self
                .components
                .validator
                .inspect(&staged)
                .await
                .map_err(|e| StageError::ArchiveInvalid(e.to_string()))?;

            if summary.is_empty() {
                return Err(StageError::ArchiveEmpty);
            }
        }

        let key = self.components.keys.next_key(request.name());

        self.components
            .publisher
            .publish(&prepared.bucket, &staged, &key, &prepared.credentials)
            .await
            .map_err(|e| StageError::UploadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}
