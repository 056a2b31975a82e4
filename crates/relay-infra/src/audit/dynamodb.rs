use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use relay_core::AuditRecord;
use std::collections::HashMap;

use super::{AuditError, AuditStore};

/// Audit store backed by a DynamoDB table keyed on `ID`.
#[derive(Clone, Debug)]
pub struct DynamoAuditStore {
    client: DynamoClient,
}

impl DynamoAuditStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: DynamoClient::new(config),
        }
    }

    /// Item layout: ID, Name, Email, Timestamp, Status, StatusDetails (all strings).
    pub(crate) fn item(record: &AuditRecord) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("ID".to_string(), AttributeValue::S(record.id.to_string())),
            ("Name".to_string(), AttributeValue::S(record.name.clone())),
            ("Email".to_string(), AttributeValue::S(record.email.clone())),
            ("Timestamp".to_string(), AttributeValue::S(record.timestamp_iso())),
            ("Status".to_string(), AttributeValue::S(record.status.to_string())),
            (
                "StatusDetails".to_string(),
                AttributeValue::S(record.details.clone()),
            ),
        ])
    }
}

#[async_trait]
impl AuditStore for DynamoAuditStore {
    async fn put(&self, table: &str, record: &AuditRecord) -> Result<(), AuditError> {
        let start = std::time::Instant::now();

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(Self::item(record)))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    table = %table,
                    audit_id = %record.id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "DynamoDB put failed"
                );
                AuditError::WriteFailed {
                    table: table.to_string(),
                    id: record.id.to_string(),
                    message: e.to_string(),
                }
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use relay_core::AuditStatus;

    #[test]
    fn test_item_layout() {
        let mut record = AuditRecord::new(
            "alice",
            "alice@example.com",
            AuditStatus::Success,
            "File downloaded and uploaded successfully",
        );
        record.id = uuid::Uuid::nil();
        record.timestamp = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let item = DynamoAuditStore::item(&record);
        let s = |k: &str| item.get(k).and_then(|v| v.as_s().ok()).cloned();

        assert_eq!(item.len(), 6);
        assert_eq!(s("ID").as_deref(), Some("00000000-0000-0000-0000-000000000000"));
        assert_eq!(s("Name").as_deref(), Some("alice"));
        assert_eq!(s("Email").as_deref(), Some("alice@example.com"));
        assert_eq!(s("Timestamp").as_deref(), Some("2024-01-02T03:04:05.000Z"));
        assert_eq!(s("Status").as_deref(), Some("Success"));
        assert_eq!(
            s("StatusDetails").as_deref(),
            Some("File downloaded and uploaded successfully")
        );
    }
}
