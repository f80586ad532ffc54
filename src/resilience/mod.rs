//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request from the stage above:
//!     → retries.rs (call next stage, classify failure, loop or return)
//!     → next stage (another middleware or the terminal executor)
//! ```
//!
//! # Design Decisions
//! - Retries are immediate; no backoff between attempts
//! - Uncoded errors and 5xx-class errors are retryable; everything else is terminal
//! - Decorators hold only immutable configuration, so one instance serves
//!   any number of concurrent calls

pub mod retries;

pub use retries::{is_retryable, Retry, RetryMiddleware};
