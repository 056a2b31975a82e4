//! Amazon SES transport for notifications.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;

use super::{EmailError, Mailer};

/// Mailer delivering through the SES v2 `SendEmail` API.
#[derive(Clone, Debug)]
pub struct SesMailer {
    client: SesClient,
    sender: String,
}

impl SesMailer {
    pub fn new(config: &SdkConfig, sender: impl Into<String>) -> Self {
        Self {
            client: SesClient::new(config),
            sender: sender.into(),
        }
    }

    fn content(data: &str) -> Result<Content, EmailError> {
        Content::builder()
            .data(data)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = Message::builder()
            .subject(Self::content(subject)?)
            .body(Body::builder().text(Self::content(body)?).build())
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(&self.sender)
            .destination(Destination::builder().to_addresses(recipient).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| EmailError::Delivery(e.to_string()))?;

        tracing::debug!(
            message_id = ?output.message_id(),
            recipient = %recipient,
            "SES accepted message"
        );
        Ok(())
    }
}
