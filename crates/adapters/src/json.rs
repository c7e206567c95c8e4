//! JSON-lines stream backend.

use crate::log_sink::report_write_failure;
use ctxlog_ports::{Event, LogSink, Output};
use ctxlog_shared::{BufferPool, ContextMap};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const FALLBACK_LINE: &[u8] =
    br#"{"level":"ERROR","component":"ctxlog","msg":"log serialization failed"}"#;

#[derive(Serialize)]
struct JsonRecord<'a> {
    level: &'static str,
    component: &'a str,
    caller: String,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a ContextMap>,
}

/// JSON backend: one compact object per event and line.
#[derive(Clone)]
pub struct JsonOutput {
    error_sink: Arc<dyn LogSink>,
    debug_sink: Arc<dyn LogSink>,
    pool: Arc<BufferPool>,
}

impl fmt::Debug for JsonOutput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonOutput")
            .field("pool", &self.pool.stats())
            .finish_non_exhaustive()
    }
}

impl JsonOutput {
    /// JSON backend over the given sinks, using the shared buffer pool.
    #[must_use]
    pub fn new(error_sink: Arc<dyn LogSink>, debug_sink: Arc<dyn LogSink>) -> Self {
        Self {
            error_sink,
            debug_sink,
            pool: crate::shared_pool(),
        }
    }

    /// Use a dedicated buffer pool.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.pool = pool;
        self
    }

    fn print(&self, sink: &dyn LogSink, event: &Event<'_>) {
        let record = JsonRecord {
            level: event.severity.as_str(),
            component: event.prefix,
            caller: event.caller.to_string(),
            msg: event.arg.lines().join("\n"),
            context: (!event.context.is_empty()).then_some(event.context),
        };

        let mut buffer = self.pool.get();
        if serde_json::to_writer(&mut *buffer, &record).is_err() {
            buffer.clear();
            buffer.extend_from_slice(FALLBACK_LINE);
        }
        buffer.push(b'\n');

        if let Err(error) = sink.write(&buffer) {
            report_write_failure(&error);
        }
    }
}

impl Output for JsonOutput {
    fn debug(&self, event: &Event<'_>) {
        self.print(self.debug_sink.as_ref(), event);
    }

    fn error(&self, event: &Event<'_>) {
        self.print(self.error_sink.as_ref(), event);
    }

    fn flush(&self) {
        for sink in [&self.error_sink, &self.debug_sink] {
            if let Err(error) = sink.flush() {
                report_write_failure(&error);
            }
        }
    }
}
