//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::Layer;

use query_frontend::observability::AttemptObserver;
use query_frontend::{Context, Handler, HandlerError, QueryRequest, QueryResponse};

/// A terminal handler that replays a scripted sequence of outcomes.
///
/// Once the script runs out the last outcome repeats.
pub struct ScriptedHandler {
    script: Vec<Result<QueryResponse, HandlerError>>,
    calls: AtomicU32,
}

impl ScriptedHandler {
    pub fn new(script: Vec<Result<QueryResponse, HandlerError>>) -> Arc<Self> {
        assert!(!script.is_empty(), "script needs at least one outcome");
        Arc::new(Self {
            script,
            calls: AtomicU32::new(0),
        })
    }

    /// Always fail with `err`.
    pub fn failing(err: HandlerError) -> Arc<Self> {
        Self::new(vec![Err(err)])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for ScriptedHandler {
    async fn call(&self, _ctx: &Context, _req: &QueryRequest) -> Result<QueryResponse, HandlerError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        let idx = n.min(self.script.len() - 1);
        self.script[idx].clone()
    }
}

pub fn ok(body: &str) -> Result<QueryResponse, HandlerError> {
    Ok(QueryResponse::success(serde_json::json!(body)))
}

/// Attempt observer that remembers every observation.
#[derive(Default)]
pub struct RecordingObserver {
    attempts: Mutex<Vec<u32>>,
}

impl RecordingObserver {
    pub fn attempts(&self) -> Vec<u32> {
        self.attempts.lock().unwrap().clone()
    }
}

impl AttemptObserver for RecordingObserver {
    fn observe_attempt(&self, attempt: u32) {
        self.attempts.lock().unwrap().push(attempt);
    }
}

/// A captured "error processing request" log line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryLog {
    pub level: String,
    pub attempt: Option<u64>,
    pub err: Option<String>,
}

#[derive(Default)]
struct RetryLogVisitor {
    message: Option<String>,
    log: RetryLog,
}

impl Visit for RetryLogVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "try" {
            self.log.attempt = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{:?}", value)),
            "err" => self.log.err = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}

/// Layer collecting retry failure log lines.
#[derive(Clone, Default)]
pub struct RetryLogCapture {
    logs: Arc<Mutex<Vec<RetryLog>>>,
}

impl RetryLogCapture {
    pub fn logs(&self) -> Vec<RetryLog> {
        self.logs.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<u64> {
        self.logs().iter().filter_map(|l| l.attempt).collect()
    }

    /// Install as the thread-local default subscriber until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }
}

impl<S: Subscriber> Layer<S> for RetryLogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let mut visitor = RetryLogVisitor::default();
        event.record(&mut visitor);
        if visitor.message.as_deref() == Some("error processing request") {
            let mut log = visitor.log;
            log.level = event.metadata().level().to_string();
            self.logs.lock().unwrap().push(log);
        }
    }
}
