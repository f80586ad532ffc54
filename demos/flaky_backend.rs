//! Runs a few queries through instrument → retry → a backend that fails
//! intermittently, logging each retry and exposing metrics on the configured
//! address.
//!
//! ```text
//! cargo run --example flaky_backend [config.toml]
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use query_frontend::config::{load_config, FrontendConfig};
use query_frontend::observability::{init_logging, init_metrics, InstrumentMiddleware, RetryMetrics};
use query_frontend::pipeline::handler_fn;
use query_frontend::{Context, HandlerError, PipelineBuilder, QueryRequest, QueryResponse, RetryMiddleware};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => FrontendConfig::default(),
    };

    init_logging(&config.observability)?;

    if config.observability.metrics_enabled {
        init_metrics(config.observability.metrics_address.parse()?)?;
    }

    // Every third call succeeds; the rest alternate between a dropped
    // connection and an overloaded backend.
    let calls = Arc::new(AtomicU32::new(0));
    let backend = handler_fn(move |ctx: Context, req: QueryRequest| {
        let n = calls.fetch_add(1, Ordering::Relaxed);
        async move {
            ctx.check()?;
            tokio::time::sleep(Duration::from_millis(20)).await;
            match n % 3 {
                0 => Err(HandlerError::Transport("connection reset by peer".into())),
                1 => Err(HandlerError::status(503, "too many outstanding requests")),
                _ => Ok(QueryResponse::success(serde_json::json!({
                    "resultType": "matrix",
                    "query": req.query,
                }))),
            }
        }
    });

    let retry = RetryMiddleware::new(config.retry.max_retries, RetryMetrics::shared())
        .with_span(tracing::info_span!("retry"));
    let pipeline = PipelineBuilder::new()
        .with(InstrumentMiddleware::new("retry"))
        .with(retry)
        .build(backend);

    for query in ["up", "rate(http_requests_total[5m])", "sum by (job) (up)"] {
        let ctx = Context::new().with_timeout(Duration::from_secs(5));
        let req = QueryRequest::new(query, 0, 3_600_000, 60_000);
        match pipeline.call(&ctx, &req).await {
            Ok(resp) => tracing::info!(request_id = %ctx.request_id(), query, data = %resp.data, "Query succeeded"),
            Err(err) => tracing::warn!(request_id = %ctx.request_id(), query, error = %err, "Query failed"),
        }
    }

    Ok(())
}
