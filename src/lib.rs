//! Query frontend pipeline library.
//!
//! Stages implement one `Handler` capability and wrap each other as
//! middleware. The retry stage re-issues failed queries to the rest of the
//! chain, retrying transport failures and 5xx errors and returning 4xx errors
//! at once.
//!
//! ```text
//!   caller ──▶ instrument ──▶ retry ──▶ ... ──▶ terminal handler
//!          ◀──────────────── result ◀──────────
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod query;
pub mod resilience;

pub use config::FrontendConfig;
pub use error::{HandlerError, StatusCoded};
pub use pipeline::{Handler, Middleware, PipelineBuilder, SharedHandler};
pub use query::{Context, QueryRequest, QueryResponse};
pub use resilience::RetryMiddleware;
