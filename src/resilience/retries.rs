//! Retry logic.
//!
//! # Responsibilities
//! - Re-issue a failed request to the next stage, up to `max_retries` attempts
//! - Classify failures as retryable or terminal
//! - Record one attempt observation per try and log each retryable failure
//!
//! # Design Decisions
//! - Uncoded errors (transport, cancellation, ...) are always retryable
//! - Coded errors are retryable only in the 5xx class; 4xx returns at once
//! - After exhausting the budget the last error is returned, never the first
//! - A zero budget never calls the next stage and yields a 500 error

use std::sync::Arc;

use async_trait::async_trait;
use tracing::Span;

use crate::error::{HandlerError, StatusCoded};
use crate::observability::metrics::{NoopObserver, SharedObserver};
use crate::pipeline::{Handler, Middleware, SharedHandler};
use crate::query::{Context, QueryRequest, QueryResponse};

/// Whether a failed attempt should be tried again.
pub fn is_retryable<E: StatusCoded + ?Sized>(err: &E) -> bool {
    match err.status_code() {
        None => true,
        Some(code) => code / 100 == 5,
    }
}

/// Middleware that wraps the next stage in a [`Retry`] handler.
#[derive(Clone)]
pub struct RetryMiddleware {
    max_retries: u32,
    observer: SharedObserver,
    span: Option<Span>,
}

impl RetryMiddleware {
    pub fn new(max_retries: u32, observer: SharedObserver) -> Self {
        Self {
            max_retries,
            observer,
            span: None,
        }
    }

    /// Retry middleware with no attempt metrics.
    pub fn without_metrics(max_retries: u32) -> Self {
        Self::new(max_retries, Arc::new(NoopObserver))
    }

    /// Emit failure logs as children of `span` instead of the caller's span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Middleware for RetryMiddleware {
    fn wrap(&self, next: SharedHandler) -> SharedHandler {
        Arc::new(Retry {
            next,
            max_retries: self.max_retries,
            observer: self.observer.clone(),
            span: self.span.clone(),
        })
    }
}

/// Handler that retries the next stage on retryable failures.
pub struct Retry {
    next: SharedHandler,
    max_retries: u32,
    observer: SharedObserver,
    span: Option<Span>,
}

impl Retry {
    fn log_failure(&self, ctx: &Context, attempt: u32, err: &HandlerError) {
        match &self.span {
            Some(span) => tracing::error!(
                parent: span,
                request_id = %ctx.request_id(),
                "try" = attempt,
                err = %err,
                "error processing request"
            ),
            None => tracing::error!(
                request_id = %ctx.request_id(),
                "try" = attempt,
                err = %err,
                "error processing request"
            ),
        }
    }
}

#[async_trait]
impl Handler for Retry {
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        let mut last_err = None;

        for attempt in 0..self.max_retries {
            self.observer.observe_attempt(attempt);

            let err = match self.next.call(ctx, req).await {
                Ok(resp) => return Ok(resp),
                Err(err) => err,
            };

            if !is_retryable(&err) {
                return Err(err);
            }

            self.log_failure(ctx, attempt, &err);
            last_err = Some(err);
        }

        Err(last_err.unwrap_or_else(|| HandlerError::retries_exhausted(self.max_retries)))
    }
}
