//! Query values flowing through the pipeline.
//!
//! # Data Flow
//! ```text
//! client request
//!     → request.rs (QueryRequest, immutable once built)
//!     → context.rs (request ID, deadline, cancellation)
//!     → [pipeline stages]
//!     → response.rs (QueryResponse)
//! ```
//!
//! # Design Decisions
//! - Stages receive requests by reference and never mutate them
//! - Context is cheap to clone and shared by every attempt of a call

pub mod context;
pub mod request;
pub mod response;

pub use context::Context;
pub use request::QueryRequest;
pub use response::QueryResponse;
