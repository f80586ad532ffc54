//! Range query request.

use serde::{Deserialize, Serialize};

/// A range query as seen by every pipeline stage.
///
/// Timestamps and step are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct QueryRequest {
    pub path: String,
    pub start: i64,
    pub end: i64,
    pub step: i64,
    /// Per-query timeout requested by the client, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    pub query: String,
}

impl QueryRequest {
    /// Create a range query against `/api/v1/query_range`.
    pub fn new(query: impl Into<String>, start: i64, end: i64, step: i64) -> Self {
        Self {
            path: "/api/v1/query_range".to_string(),
            start,
            end,
            step,
            timeout_ms: None,
            query: query.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}
