//! Error taxonomy shared by every pipeline stage.
//!
//! # Design Decisions
//! - Errors either carry a status code (a prior HTTP/RPC-style failure) or
//!   they don't (transport failures, cancellation, anything else)
//! - Whether an error is coded is a capability query, see [`StatusCoded`]

use thiserror::Error;

/// Status code used for the synthesized exhaustion error.
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Error returned by a [`Handler`](crate::pipeline::Handler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// A response-carrying failure with a numeric status code.
    #[error("rpc error: code = {code} desc = {message}")]
    Status { code: u16, message: String },

    /// Connection-level failure talking to a downstream stage.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call context was cancelled.
    #[error("context canceled")]
    Cancelled,

    /// The call context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    #[error("{0}")]
    Other(String),
}

impl HandlerError {
    /// Build a coded error.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        HandlerError::Status {
            code,
            message: message.into(),
        }
    }

    /// The error returned when a retry budget ran out without a single attempt.
    pub fn retries_exhausted(max_retries: u32) -> Self {
        Self::status(
            INTERNAL_SERVER_ERROR,
            format!("Query failed after {} retries.", max_retries),
        )
    }

    /// True for coded errors in the 5xx class.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if code / 100 == 5)
    }
}

/// Extract a structured status code from an error, if it has one.
pub trait StatusCoded {
    fn status_code(&self) -> Option<u16>;
}

impl StatusCoded for HandlerError {
    fn status_code(&self) -> Option<u16> {
        match self {
            HandlerError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
