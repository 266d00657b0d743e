//! Display values
//!
//! What ends up on the display surface after an action: the upstream body or an error record

use serde::{Deserialize, Serialize};

/// Normalized error shown in place of a response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// HTTP status code (remote errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// HTTP reason phrase (remote errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Short error label
    pub error: String,
    /// Whatever detail could be recovered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorRecord {
    /// Record with only a label
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: None,
            error: error.into(),
            details: None,
        }
    }
}

/// Outcome of one dispatched call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResult {
    /// Decoded upstream body, unchanged
    Success(serde_json::Value),
    /// Normalized error
    Error(ErrorRecord),
}

impl ApiResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ApiResult::Error(_))
    }

    /// Pretty JSON with two-space indentation, as shown on the display surface
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to render result: {}\"}}", e))
    }
}

impl From<ErrorRecord> for ApiResult {
    fn from(record: ErrorRecord) -> Self {
        ApiResult::Error(record)
    }
}
