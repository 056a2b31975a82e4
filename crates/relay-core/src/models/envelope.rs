use serde::{Deserialize, Serialize};

use crate::error::PreflightError;

/// Notification envelope delivered by the trigger source.
///
/// Only the first record is read; the payload is a JSON document embedded as a
/// string in `Records[0].Sns.Message`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<EnvelopeRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvelopeRecord {
    #[serde(rename = "Sns")]
    pub sns: NotificationMessage,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Body of the embedded notification message. Every field is optional at this
/// level; presence is enforced when the submission is prepared.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Envelope {
    pub fn from_value(value: serde_json::Value) -> Result<Self, PreflightError> {
        serde_json::from_value(value).map_err(|e| {
            PreflightError::MalformedEnvelope(format!("unexpected event shape: {}", e))
        })
    }

    /// Wrap a payload the way the trigger source does. Used by the replay tool and tests.
    pub fn wrap(payload: &SubmissionPayload) -> Result<Self, serde_json::Error> {
        Ok(Envelope {
            records: vec![EnvelopeRecord {
                sns: NotificationMessage {
                    message: serde_json::to_string(payload)?,
                },
            }],
        })
    }

    /// Decode the embedded message of the first record.
    pub fn payload(&self) -> Result<SubmissionPayload, PreflightError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| PreflightError::MalformedEnvelope("no records in event".to_string()))?;

        serde_json::from_str(&record.sns.message).map_err(|e| {
            PreflightError::MalformedEnvelope(format!("embedded message is not valid JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_from_first_record() {
        let event = json!({
            "Records": [
                {
                    "EventSource": "aws:sns",
                    "Sns": {
                        "Type": "Notification",
                        "Message": "{\"name\":\"alice\",\"url\":\"https://example.com/a.zip\",\"email\":\"alice@example.com\"}"
                    }
                },
                { "Sns": { "Message": "{\"name\":\"ignored\"}" } }
            ]
        });

        let payload = Envelope::from_value(event).unwrap().payload().unwrap();
        assert_eq!(payload.name.as_deref(), Some("alice"));
        assert_eq!(payload.url.as_deref(), Some("https://example.com/a.zip"));
        assert_eq!(payload.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let envelope = Envelope::from_value(json!({
            "Records": [{ "Sns": { "Message": "{\"name\":\"bob\"}" } }]
        }))
        .unwrap();
        let payload = envelope.payload().unwrap();
        assert_eq!(payload.name.as_deref(), Some("bob"));
        assert!(payload.url.is_none());
        assert!(payload.email.is_none());
    }

    #[test]
    fn test_empty_records_rejected() {
        let envelope = Envelope::from_value(json!({ "Records": [] })).unwrap();
        assert!(matches!(
            envelope.payload(),
            Err(PreflightError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_non_json_message_rejected() {
        let envelope = Envelope::from_value(json!({
            "Records": [{ "Sns": { "Message": "not json" } }]
        }))
        .unwrap();
        assert!(matches!(
            envelope.payload(),
            Err(PreflightError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_wrap_then_payload() {
        let payload = SubmissionPayload {
            name: Some("carol".to_string()),
            url: Some("https://example.com/c.zip".to_string()),
            email: Some("carol@example.com".to_string()),
        };
        let envelope = Envelope::wrap(&payload).unwrap();
        assert_eq!(envelope.payload().unwrap(), payload);
    }
}
