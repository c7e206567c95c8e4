//! Fatal handler and reporter registration.

use ctxlog_ports::{FatalHandler, Reporter, Severity};
use ctxlog_shared::{ContextMap, Error};
use std::fmt;
use std::sync::Arc;

/// Exit status used by the default fatal handler.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Default fatal handler: terminate the process with [`FATAL_EXIT_CODE`].
#[must_use]
pub fn exit_on_fatal() -> FatalHandler {
    Arc::new(exit_process)
}

fn exit_process(_error: &Error) {
    std::process::exit(FATAL_EXIT_CODE);
}

/// Callbacks consulted by the base logger.
#[derive(Clone)]
pub struct Hooks {
    on_fatal: FatalHandler,
    reporter: Option<Reporter>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            on_fatal: exit_on_fatal(),
            reporter: None,
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Hooks")
            .field("reporter", &self.reporter.is_some())
            .finish_non_exhaustive()
    }
}

impl Hooks {
    /// Replace the fatal handler.
    #[must_use]
    pub fn with_on_fatal(mut self, handler: FatalHandler) -> Self {
        self.on_fatal = handler;
        self
    }

    /// Replace the reporter. `None` removes it.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Option<Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Whether a reporter is registered.
    pub const fn has_reporter(&self) -> bool {
        self.reporter.is_some()
    }

    pub(crate) fn report(&self, error: &Error, severity: Severity, context: &ContextMap) {
        if let Some(reporter) = &self.reporter {
            reporter(error, severity, context);
        }
    }

    pub(crate) fn fatal(&self, error: &Error) {
        (self.on_fatal)(error);
    }
}
