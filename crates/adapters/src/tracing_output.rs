//! Adapter emitting events into the `tracing` ecosystem.
//!
//! Whatever subscriber the process installed decides formatting and
//! filtering; the adapter only maps severities and fields.

use ctxlog_ports::{Event, Output, Severity};
use std::sync::Arc;

/// `tracing` target of every event emitted by the adapter.
pub const TARGET: &str = "ctxlog";

macro_rules! emit_at {
    ($level:expr, $component:expr, $event:expr, $context:expr) => {
        tracing::event!(
            target: TARGET,
            $level,
            component = %$component,
            caller = %$event.caller,
            severity = $event.severity.as_str(),
            context = $context,
            "{}",
            $event.arg.lines().join("\n")
        )
    };
}

/// Backend forwarding events to `tracing`. One instance per logger name.
#[derive(Debug, Clone)]
pub struct TracingOutput {
    component: Arc<str>,
}

impl TracingOutput {
    /// Adapter for the logger named `component`.
    #[must_use]
    pub fn new(component: &str) -> Self {
        Self {
            component: Arc::from(component),
        }
    }

    /// Logger name reported in the `component` field.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    fn forward(&self, event: &Event<'_>) {
        let context = if event.context.is_empty() {
            None
        } else {
            serde_json::to_string(event.context).ok()
        };
        let context = context.as_deref();
        let component = self.component.as_ref();
        match event.severity {
            Severity::Trace => emit_at!(tracing::Level::TRACE, component, event, context),
            Severity::Debug => emit_at!(tracing::Level::DEBUG, component, event, context),
            Severity::Info => emit_at!(tracing::Level::INFO, component, event, context),
            Severity::Error | Severity::Fatal => {
                emit_at!(tracing::Level::ERROR, component, event, context);
            },
        }
    }
}

impl Output for TracingOutput {
    fn debug(&self, event: &Event<'_>) {
        self.forward(event);
    }

    fn error(&self, event: &Event<'_>) {
        self.forward(event);
    }
}
