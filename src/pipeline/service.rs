//! tower interop.
//!
//! # Responsibilities
//! - Use any tower `Service` as a terminal handler (e.g. a downstream client)
//! - Expose an assembled pipeline as a tower `Service`
//!
//! # Design Decisions
//! - The service request is `(Context, QueryRequest)` so cancellation travels with it
//! - `ServiceHandler` clones the inner service per call, as tower services
//!   require `&mut self` and handlers are shared

use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use async_trait::async_trait;
use tower::{Service, ServiceExt};

use crate::error::HandlerError;
use crate::pipeline::handler::{Handler, SharedHandler};
use crate::query::{Context, QueryRequest, QueryResponse};

pub type ServiceRequest = (Context, QueryRequest);

/// A tower service used as a pipeline handler.
#[derive(Debug, Clone)]
pub struct ServiceHandler<S> {
    inner: S,
}

impl<S> ServiceHandler<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S> Handler for ServiceHandler<S>
where
    S: Service<ServiceRequest, Response = QueryResponse, Error = HandlerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        self.inner
            .clone()
            .oneshot((ctx.clone(), req.clone()))
            .await
    }
}

/// A pipeline exposed as a tower service.
#[derive(Clone)]
pub struct HandlerService {
    handler: SharedHandler,
}

impl HandlerService {
    pub fn new(handler: SharedHandler) -> Self {
        Self { handler }
    }
}

impl Service<ServiceRequest> for HandlerService {
    type Response = QueryResponse;
    type Error = HandlerError;
    type Future = Pin<Box<dyn Future<Output = Result<QueryResponse, HandlerError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, (ctx, req): ServiceRequest) -> Self::Future {
        let handler = self.handler.clone();
        Box::pin(async move { handler.call(&ctx, &req).await })
    }
}
