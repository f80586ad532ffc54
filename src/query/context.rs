//! Per-call context: request ID, deadline and cancellation.
//!
//! # Responsibilities
//! - Carry a request ID for log correlation
//! - Carry an optional deadline and a cancellation signal to every stage
//!
//! # Design Decisions
//! - Clones share the same cancellation signal
//! - Stages that do I/O are expected to honor the signal; decorators just forward it

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::HandlerError;

#[derive(Debug, Clone)]
pub struct Context {
    request_id: Uuid,
    deadline: Option<Instant>,
    cancel: Arc<watch::Sender<bool>>,
}

impl Context {
    /// Create a context with a fresh request ID, no deadline and not cancelled.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
            cancel: Arc::new(tx),
        }
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Set the deadline to `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Signal cancellation to every clone of this context.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    pub fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Ok` while the call may proceed, otherwise the error describing why not.
    pub fn check(&self) -> Result<(), HandlerError> {
        if self.is_cancelled() {
            return Err(HandlerError::Cancelled);
        }
        if self.deadline_exceeded() {
            return Err(HandlerError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Resolve once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> HandlerError {
        let mut rx = self.cancel.subscribe();
        let cancelled = async move {
            // The sender lives as long as `self`, so the channel cannot close here.
            let _ = rx.wait_for(|cancelled| *cancelled).await;
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = cancelled => HandlerError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => HandlerError::DeadlineExceeded,
            },
            None => {
                cancelled.await;
                HandlerError::Cancelled
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
