//! Plain-text stream backend.
//!
//! Line shape: `<SEVERITY> <prefix>: <file>:<line> <message> [k=v ...]`.

use crate::log_sink::report_write_failure;
use crate::stack;
use ctxlog_ports::{Event, LogSink, Output};
use ctxlog_shared::{BufferPool, render_value};
use std::fmt;
use std::sync::Arc;

/// Writes a prefix (a timestamp, say) at the start of every event buffer.
pub type Prepender = Arc<dyn Fn(&mut Vec<u8>) + Send + Sync>;

/// Text backend. ERROR and FATAL go to the error sink, everything else to
/// the debug sink.
#[derive(Clone)]
pub struct TextOutput {
    error_sink: Arc<dyn LogSink>,
    debug_sink: Arc<dyn LogSink>,
    prepender: Option<Prepender>,
    pool: Arc<BufferPool>,
}

impl fmt::Debug for TextOutput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TextOutput")
            .field("prepender", &self.prepender.is_some())
            .field("pool", &self.pool.stats())
            .finish_non_exhaustive()
    }
}

impl TextOutput {
    /// Text backend over the given sinks, using the shared buffer pool.
    #[must_use]
    pub fn new(error_sink: Arc<dyn LogSink>, debug_sink: Arc<dyn LogSink>) -> Self {
        Self {
            error_sink,
            debug_sink,
            prepender: None,
            pool: crate::shared_pool(),
        }
    }

    /// Set the per-event prepender.
    #[must_use]
    pub fn with_prepender(mut self, prepender: Prepender) -> Self {
        self.prepender = Some(prepender);
        self
    }

    /// Use a dedicated buffer pool.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.pool = pool;
        self
    }

    fn print(&self, sink: &dyn LogSink, event: &Event<'_>) {
        let mut buffer = self.pool.get();
        if let Some(prepender) = &self.prepender {
            prepender(&mut *buffer);
        }

        let mut lines = event.arg.lines();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let header = format!("{} {}: {} ", event.severity, event.prefix, event.caller);
        for (index, line) in lines.iter().enumerate() {
            buffer.extend_from_slice(header.as_bytes());
            buffer.extend_from_slice(line.as_bytes());
            if index == 0 {
                write_context(&mut buffer, event);
            }
            buffer.push(b'\n');
        }

        if let Err(error) = sink.write(&buffer) {
            report_write_failure(&error);
        }

        if event.print_stack {
            let trace = stack::format_frames(&stack::capture());
            if !trace.is_empty()
                && let Err(error) = sink.write(trace.as_bytes())
            {
                report_write_failure(&error);
            }
        }
    }
}

fn write_context(buffer: &mut Vec<u8>, event: &Event<'_>) {
    if event.context.is_empty() {
        return;
    }
    buffer.extend_from_slice(b" [");
    for (index, (key, value)) in event.context.iter().enumerate() {
        if index > 0 {
            buffer.push(b' ');
        }
        buffer.extend_from_slice(key.as_bytes());
        buffer.push(b'=');
        buffer.extend_from_slice(render_value(value).as_bytes());
    }
    buffer.push(b']');
}

impl Output for TextOutput {
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
