use serde::{Deserialize, Serialize};

/// Value returned to the invoking platform.
///
/// Every invocation that gets past pre-flight returns the same success value,
/// whatever the pipeline outcome. The audit record and the email are the only
/// outcome signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: "success".to_string(),
        }
    }
}
