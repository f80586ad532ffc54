//! Query response.

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Response produced by the terminal stage and forwarded untouched by decorators.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, rename = "errorType", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    /// A successful response carrying `data`.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data,
            error_type: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}
