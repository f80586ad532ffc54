//! Per-stage instrumentation middleware.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::Instrument;

use crate::error::{HandlerError, StatusCoded, INTERNAL_SERVER_ERROR};
use crate::observability::metrics::record_query_duration;
use crate::pipeline::{Handler, Middleware, SharedHandler};
use crate::query::{Context, QueryRequest, QueryResponse};

/// Times the wrapped stage and runs it inside a span named after the stage.
#[derive(Debug, Clone)]
pub struct InstrumentMiddleware {
    stage: Arc<str>,
}

impl InstrumentMiddleware {
    pub fn new(stage: impl Into<Arc<str>>) -> Self {
        Self {
            stage: stage.into(),
        }
    }
}

impl Middleware for InstrumentMiddleware {
    fn wrap(&self, next: SharedHandler) -> SharedHandler {
        Arc::new(Instrumented {
            stage: self.stage.clone(),
            next,
        })
    }
}

struct Instrumented {
    stage: Arc<str>,
    next: SharedHandler,
}

/// Status code label for a stage outcome.
fn status_label(result: &Result<QueryResponse, HandlerError>) -> u16 {
    match result {
        Ok(_) => 200,
        Err(e) => e.status_code().unwrap_or(INTERNAL_SERVER_ERROR),
    }
}

#[async_trait]
impl Handler for Instrumented {
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        let span = tracing::info_span!(
            "query_stage",
            stage = %self.stage,
            request_id = %ctx.request_id(),
        );
        let start = Instant::now();

        let result = self.next.call(ctx, req).instrument(span).await;

        let status = status_label(&result);
        record_query_duration(&self.stage, status, start);
        tracing::debug!(
            stage = %self.stage,
            status,
            elapsed = ?start.elapsed(),
            "Stage finished"
        );
        result
    }
}
