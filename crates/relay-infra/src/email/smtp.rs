//! SMTP transport for notifications.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use relay_core::SmtpSettings;
use std::sync::Arc;

use super::{EmailError, Mailer};

/// Mailer delivering through an SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_settings(settings: &SmtpSettings, sender: &str) -> Result<Self, EmailError> {
        let host = settings
            .host
            .as_deref()
            .ok_or_else(|| EmailError::Build("SMTP_HOST not configured".to_string()))?;
        let from: Mailbox = sender.parse().map_err(|e: lettre::address::AddressError| {
            EmailError::InvalidAddress {
                address: sender.to_string(),
                message: e.to_string(),
            }
        })?;

        let builder = if settings.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| EmailError::Build(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        let builder = builder.port(settings.port);
        let builder = match (&settings.user, &settings.password) {
            (Some(u), Some(p)) => builder.credentials(Credentials::new(u.clone(), p.clone())),
            _ => builder,
        };

        tracing::info!(
            host = %host,
            port = settings.port,
            tls = settings.tls,
            "Email service initialized (SMTP)"
        );

        Ok(Self {
            mailer: Arc::new(builder.build()),
            from,
        })
    }

    fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, EmailError> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| EmailError::InvalidAddress {
                address: recipient.to_string(),
                message: e.to_string(),
            })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let email = self.build_message(recipient, subject, body)?;
        self.mailer
            .send(email)
            .await
            .map_err(|e| EmailError::Delivery(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: Some("localhost".to_string()),
            port: 2525,
            user: None,
            password: None,
            tls: false,
        }
    }

    #[test]
    fn test_invalid_sender_rejected() {
        let result = SmtpMailer::from_settings(&settings(), "not an address");
        assert!(matches!(result, Err(EmailError::InvalidAddress { .. })));
    }

    #[test]
    fn test_missing_host_rejected() {
        let settings = SmtpSettings {
            host: None,
            ..settings()
        };
        let result = SmtpMailer::from_settings(&settings, "Relay <no-reply@example.com>");
        assert!(matches!(result, Err(EmailError::Build(_))));
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_delivery() {
        let mailer =
            SmtpMailer::from_settings(&settings(), "Relay <no-reply@example.com>").unwrap();
        let result = mailer.send("nobody", "Subject", "Body").await;
        assert!(matches!(result, Err(EmailError::InvalidAddress { .. })));
    }

    #[test]
    fn test_build_plain_text_message() {
        let mailer =
            SmtpMailer::from_settings(&settings(), "Relay <no-reply@example.com>").unwrap();
        let message = mailer
            .build_message("alice@example.com", "Hello", "Body text")
            .unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("To: alice@example.com"));
        assert!(formatted.contains("Subject: Hello"));
        assert!(formatted.contains("text/plain"));
    }
}
