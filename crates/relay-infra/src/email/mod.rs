//! Email notification
//!
//! A [`Mailer`] delivers one plain-text message from a fixed sender. Callers in
//! the pipeline go through [`best_effort_notify`], which never lets a delivery
//! failure change the outcome of the invocation.

#[cfg(feature = "email-ses")]
mod ses;
#[cfg(feature = "email-smtp")]
mod smtp;
mod templates;

use async_trait::async_trait;

#[cfg(feature = "email-ses")]
pub use ses::SesMailer;
#[cfg(feature = "email-smtp")]
pub use smtp::SmtpMailer;
pub use templates::EmailTemplates;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Invalid address {address}: {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Subject and plain-text body of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// Send `message` to `recipient`, logging and swallowing any failure.
///
/// Returns whether the transport accepted the message.
pub async fn best_effort_notify(
    mailer: &dyn Mailer,
    recipient: &str,
    message: &EmailMessage,
) -> bool {
    match mailer.send(recipient, &message.subject, &message.body).await {
        Ok(()) => {
            tracing::info!(recipient = %recipient, subject = %message.subject, "Notification sent");
            true
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                recipient = %recipient,
                subject = %message.subject,
                "Notification not delivered"
            );
            false
        }
    }
}
