//! Base logger: turns one log call into one backend event.
//!
//! The caller location arrives already resolved. Everything below the public
//! facade only forwards it, so no internal frame is ever reported.

use crate::hooks::Hooks;
use crate::merge::{event_context, report_context};
use ctxlog_ports::{Arg, Caller, Event, Output, Severity, format_template};
use ctxlog_shared::{ContextMap, ContextValue, Error};

/// Per-logger switches resolved when the logger was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggerFlags {
    /// TRACE events are emitted.
    pub trace: bool,
    /// A stack trace follows every event.
    pub print_stack: bool,
}

/// Borrowed view of everything one log call needs.
#[derive(Clone, Copy)]
pub struct BaseLogger<'a> {
    prefix: &'a str,
    flags: LoggerFlags,
    output: &'a dyn Output,
    hooks: &'a Hooks,
}

impl std::fmt::Debug for BaseLogger<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BaseLogger")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl<'a> BaseLogger<'a> {
    /// Assemble a logger view.
    pub const fn new(
        prefix: &'a str,
        flags: LoggerFlags,
        output: &'a dyn Output,
        hooks: &'a Hooks,
    ) -> Self {
        Self {
            prefix,
            flags,
            output,
            hooks,
        }
    }

    /// Whether events at `severity` are emitted at all.
    pub const fn enabled(&self, severity: Severity) -> bool {
        !matches!(severity, Severity::Trace) || self.flags.trace
    }

    /// Log a value at a non-error severity.
    pub fn log(&self, severity: Severity, caller: Caller, arg: &Arg) {
        if !self.enabled(severity) {
            return;
        }
        let context = event_context(arg.as_error(), &[]);
        self.write(severity, caller, arg, &context);
    }

    /// Log a formatted message at a non-error severity.
    pub fn logf(&self, severity: Severity, caller: Caller, template: &str, args: &[Arg]) {
        if !self.enabled(severity) {
            return;
        }
        let arg = Arg::from(format_template(template, args));
        let context = event_context(None, &[]);
        self.write(severity, caller, &arg, &context);
    }

    /// Log a message with explicit key/value pairs at a non-error severity.
    pub fn logw(
        &self,
        severity: Severity,
        caller: Caller,
        message: &str,
        fields: &[(&str, ContextValue)],
    ) {
        if !self.enabled(severity) {
            return;
        }
        let context = event_context(None, fields);
        self.write(severity, caller, &Arg::from(message), &context);
    }

    /// Log at ERROR or FATAL and return the error: the argument itself when
    /// it is one, otherwise a plain error holding the rendered text.
    pub fn error(&self, severity: Severity, caller: Caller, arg: Arg) -> Error {
        let error = match &arg {
            Arg::Error(error) => error.clone(),
            Arg::Value(_) | Arg::MultiLine(_) => Error::msg(arg.text()),
        };
        let context = event_context(Some(&error), &[]);
        self.write_error(severity, caller, &arg, &error, &context);
        error
    }

    /// Log a formatted message at ERROR or FATAL. The first error argument is
    /// returned unchanged; without one, a structured error carrying the
    /// template and the call site is created.
    pub fn errorf(&self, severity: Severity, caller: Caller, template: &str, args: &[Arg]) -> Error {
        let text = format_template(template, args);
        let error = args.iter().find_map(Arg::as_error).cloned().unwrap_or_else(|| {
            Error::located(text.clone(), Some(template.to_string()), caller.location())
        });
        let context = event_context(Some(&error), &[]);
        self.write_error(severity, caller, &Arg::from(text), &error, &context);
        error
    }

    /// Log a message with explicit pairs at ERROR or FATAL.
    pub fn errorw(
        &self,
        severity: Severity,
        caller: Caller,
        message: &str,
        fields: &[(&str, ContextValue)],
    ) -> Error {
        let error = Error::msg(message);
        let context = event_context(None, fields);
        self.write_error(severity, caller, &Arg::from(message), &error, &context);
        error
    }

    /// Log a line at ERROR without notifying the reporter. Used by the
    /// print-style adapter.
    pub fn error_line(&self, caller: Caller, line: &str) {
        let context = event_context(None, &[]);
        self.write(Severity::Error, caller, &Arg::from(line), &context);
    }

    /// Flush the backend, then hand `error` to the fatal handler.
    pub fn fatal_exit(&self, error: &Error) {
        self.output.flush();
        self.hooks.fatal(error);
    }

    fn write_error(
        &self,
        severity: Severity,
        caller: Caller,
        arg: &Arg,
        error: &Error,
        context: &ContextMap,
    ) {
        self.write(severity, caller, arg, context);
        if self.hooks.has_reporter() {
            self.hooks.report(error, severity, &report_context(context));
        }
    }

    fn write(&self, severity: Severity, caller: Caller, arg: &Arg, context: &ContextMap) {
        self.output.emit(&Event {
            prefix: self.prefix,
            caller,
            print_stack: self.flags.print_stack,
            severity,
            arg,
            context,
        });
    }
}
