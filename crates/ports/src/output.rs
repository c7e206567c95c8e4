//! Backend (output) boundary contract.

use crate::arg::Arg;
use crate::caller::Caller;
use crate::severity::Severity;
use ctxlog_shared::ContextMap;

/// One log event, borrowed for the duration of a single emit call.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Logger name.
    pub prefix: &'a str,
    /// Application call site.
    pub caller: Caller,
    /// Whether a stack trace follows the message.
    pub print_stack: bool,
    /// Severity.
    pub severity: Severity,
    /// Primary argument.
    pub arg: &'a Arg,
    /// Merged, redacted context values.
    pub context: &'a ContextMap,
}

/// Boundary contract for log backends.
///
/// ERROR and FATAL events arrive through [`Output::error`]; every other
/// severity arrives through [`Output::debug`].
pub trait Output: Send + Sync {
    /// Emit a non-error event.
    fn debug(&self, event: &Event<'_>);

    /// Emit an error event.
    fn error(&self, event: &Event<'_>);

    /// Flush buffered output. Called before the fatal handler runs.
    fn flush(&self) {}

    /// Route an event by severity.
    fn emit(&self, event: &Event<'_>) {
        if event.severity.is_error() {
            self.error(event);
        } else {
            self.debug(event);
        }
    }
}
