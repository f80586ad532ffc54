//! Handler pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → middleware stage (e.g. instrument)
//!     → middleware stage (e.g. retry)
//!     → terminal handler (executes the query)
//!     ← result flows back up through each stage
//! ```
//!
//! # Design Decisions
//! - Every stage implements the same `Handler` capability, so stages wrap
//!   each other without knowing concrete types
//! - A pipeline is assembled once at startup by folding middleware over a
//!   terminal handler; nothing is registered at runtime
//! - tower interop lives in service.rs for callers already built on tower

pub mod builder;
pub mod handler;
pub mod middleware;
pub mod service;

pub use builder::PipelineBuilder;
pub use handler::{handler_fn, Handler, HandlerFn, SharedHandler};
pub use middleware::{merge, middleware_fn, Middleware, MiddlewareFn, SharedMiddleware};
pub use service::{HandlerService, ServiceHandler};
