//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline stages produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (retry attempt histogram, stage latency histogram)
//!     → instrument.rs (per-stage spans and durations)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Collectors are created once at pipeline assembly and injected into stages
//! - Recording never influences control flow and never fails a call
//! - Request ID is attached to every stage span

pub mod instrument;
pub mod logging;
pub mod metrics;

pub use instrument::InstrumentMiddleware;
pub use logging::init_logging;
pub use metrics::{init_metrics, AttemptObserver, NoopObserver, RetryMetrics, SharedObserver};
