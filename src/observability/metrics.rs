//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cortex_query_frontend_retries` (histogram): zero-based attempt index,
//!   one observation per attempt, buckets {0,1,2,3,4,5}
//! - `cortex_frontend_query_range_duration_seconds` (histogram): stage latency
//!   by `method` (stage name) and `status_code`
//!
//! # Design Decisions
//! - The `metrics` facade does the synchronization; handles are cheap to clone
//!   and safe to record from many calls at once
//! - Stages take an `AttemptObserver` so tests can inject a fake collector

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use metrics::{describe_histogram, histogram, Histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

pub const RETRIES_HISTOGRAM: &str = "cortex_query_frontend_retries";
pub const RETRY_BUCKETS: &[f64] = &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

pub const QUERY_DURATION_HISTOGRAM: &str = "cortex_frontend_query_range_duration_seconds";
pub const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Sink for retry attempt observations.
pub trait AttemptObserver: Send + Sync {
    /// Record that attempt `attempt` (0 = first try) is about to run.
    fn observe_attempt(&self, attempt: u32);
}

pub type SharedObserver = Arc<dyn AttemptObserver>;

/// Attempt observer backed by the retries histogram.
#[derive(Clone)]
pub struct RetryMetrics {
    retries: Histogram,
}

impl RetryMetrics {
    /// Register the retries histogram with the installed recorder.
    pub fn new() -> Self {
        describe_histogram!(RETRIES_HISTOGRAM, "Number of times a request is retried.");
        Self {
            retries: histogram!(RETRIES_HISTOGRAM),
        }
    }

    pub fn shared() -> SharedObserver {
        Arc::new(Self::new())
    }
}

impl Default for RetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AttemptObserver for RetryMetrics {
    fn observe_attempt(&self, attempt: u32) {
        self.retries.record(f64::from(attempt));
    }
}

/// Discards every observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AttemptObserver for NoopObserver {
    fn observe_attempt(&self, _attempt: u32) {}
}

/// Record how long a pipeline stage took.
pub fn record_query_duration(stage: &str, status_code: u16, start: Instant) {
    histogram!(
        QUERY_DURATION_HISTOGRAM,
        "method" => stage.to_string(),
        "status_code" => status_code.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(RETRIES_HISTOGRAM.to_string()), RETRY_BUCKETS)?
        .set_buckets_for_metric(
            Matcher::Full(QUERY_DURATION_HISTOGRAM.to_string()),
            DURATION_BUCKETS,
        )
}

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime, once per process.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    builder()?.with_http_listener(addr).install()?;
    describe_histogram!(
        QUERY_DURATION_HISTOGRAM,
        metrics::Unit::Seconds,
        "Total time spent in seconds doing query range requests."
    );
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}
