//! The handler capability every pipeline stage implements.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::query::{Context, QueryRequest, QueryResponse};

/// Executes a query and returns a response or an error.
///
/// Implementations must tolerate being called repeatedly with the same
/// request, since decorators such as retry re-issue it unchanged.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError>;
}

/// A handler shared between the stages that wrap it.
pub type SharedHandler = Arc<dyn Handler>;

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        (**self).call(ctx, req).await
    }
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Box<H> {
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        (**self).call(ctx, req).await
    }
}

/// Adapts an async closure into a [`Handler`].
///
/// The closure receives owned clones of the context and request.
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

/// Shorthand for [`HandlerFn::new`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Context, QueryRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<QueryResponse, HandlerError>> + Send + 'static,
{
    HandlerFn::new(f)
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Context, QueryRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<QueryResponse, HandlerError>> + Send + 'static,
{
    async fn call(&self, ctx: &Context, req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        (self.f)(ctx.clone(), req.clone()).await
    }
}
