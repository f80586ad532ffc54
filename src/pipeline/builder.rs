//! Pipeline assembly.

use std::sync::Arc;

use crate::pipeline::handler::{Handler, SharedHandler};
use crate::pipeline::middleware::{merge, Middleware, SharedMiddleware};

/// Collects middleware in outside-in order and folds it over a terminal handler.
#[derive(Default, Clone)]
pub struct PipelineBuilder {
    stages: Vec<SharedMiddleware>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage. Stages added first run first.
    pub fn with<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    pub fn with_shared(mut self, middleware: SharedMiddleware) -> Self {
        self.stages.push(middleware);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Wrap `terminal` in every collected stage.
    pub fn build<H: Handler + 'static>(self, terminal: H) -> SharedHandler {
        tracing::debug!(stages = self.stages.len(), "Assembling query pipeline");
        merge(self.stages).wrap(Arc::new(terminal))
    }
}
