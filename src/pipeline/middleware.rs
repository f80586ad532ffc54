//! Middleware: factories that wrap a handler into a decorated handler.

use std::sync::Arc;

use crate::pipeline::handler::SharedHandler;

/// Produces a new handler that decorates `next`.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: SharedHandler) -> SharedHandler;
}

pub type SharedMiddleware = Arc<dyn Middleware>;

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn wrap(&self, next: SharedHandler) -> SharedHandler {
        (**self).wrap(next)
    }
}

/// Adapts a plain function into a [`Middleware`].
#[derive(Clone)]
pub struct MiddlewareFn<F> {
    f: F,
}

pub fn middleware_fn<F>(f: F) -> MiddlewareFn<F>
where
    F: Fn(SharedHandler) -> SharedHandler + Send + Sync,
{
    MiddlewareFn { f }
}

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(SharedHandler) -> SharedHandler + Send + Sync,
{
    fn wrap(&self, next: SharedHandler) -> SharedHandler {
        (self.f)(next)
    }
}

/// A sequence of middleware applied as one.
struct Merged {
    stages: Vec<SharedMiddleware>,
}

impl Middleware for Merged {
    fn wrap(&self, next: SharedHandler) -> SharedHandler {
        // Innermost first, so stages[0] ends up as the outermost wrapper.
        self.stages
            .iter()
            .rev()
            .fold(next, |handler, stage| stage.wrap(handler))
    }
}

/// Merge middleware into one; the first element becomes the outermost stage.
pub fn merge(stages: Vec<SharedMiddleware>) -> SharedMiddleware {
    Arc::new(Merged { stages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::handler::{handler_fn, Handler};
    use crate::query::{Context, QueryRequest, QueryResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Tag {
        name: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
        next: SharedHandler,
    }

    #[async_trait]
    impl Handler for Tag {
        async fn call(
            &self,
            ctx: &Context,
            req: &QueryRequest,
        ) -> Result<QueryResponse, crate::error::HandlerError> {
            self.seen.lock().unwrap().push(self.name);
            self.next.call(ctx, req).await
        }
    }

    fn tag(name: &'static str, seen: Arc<Mutex<Vec<&'static str>>>) -> SharedMiddleware {
        Arc::new(middleware_fn(move |next| {
            Arc::new(Tag {
                name,
                seen: seen.clone(),
                next,
            }) as SharedHandler
        }))
    }

    #[tokio::test]
    async fn test_merge_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let terminal: SharedHandler = Arc::new(handler_fn(|_, _| async {
            Ok(QueryResponse::success(serde_json::Value::Null))
        }));

        let chain = merge(vec![tag("outer", seen.clone()), tag("inner", seen.clone())]).wrap(terminal);
        chain.call(&Context::new(), &QueryRequest::default()).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["outer", "inner"]);
    }

    #[tokio::test]
    async fn test_merge_empty_is_identity() {
        let terminal: SharedHandler = Arc::new(handler_fn(|_, _| async {
            Ok(QueryResponse::success(serde_json::json!(1)))
        }));
        let chain = merge(Vec::new()).wrap(terminal.clone());
        assert!(Arc::ptr_eq(&chain, &terminal));
    }
}
