//! Named logger handles.

use crate::registry;
use crate::std_logger::StdLogger;
use crate::trace_writer::TraceWriter;
use ctxlog_app::{BaseLogger, LoggerFlags};
use ctxlog_config::LogEnv;
use ctxlog_ports::{Arg, Caller, Severity};
use ctxlog_shared::{ContextValue, Error};
use std::sync::Arc;

/// Create a logger named `prefix`, reading `TRACE` and `PRINT_STACK` from
/// the process environment.
#[must_use]
pub fn logger_for(prefix: &str) -> Logger {
    Logger::with_env(prefix, &LogEnv::from_std_env())
}

/// A named logger.
///
/// Handles are cheap to clone and never cache a backend: each call goes
/// through the currently configured output.
#[derive(Debug, Clone)]
pub struct Logger {
    prefix: Arc<str>,
    flags: LoggerFlags,
}

impl Logger {
    /// Create a logger whose flags come from an already resolved environment.
    #[must_use]
    pub fn with_env(prefix: &str, env: &LogEnv) -> Self {
        Self {
            prefix: Arc::from(prefix),
            flags: LoggerFlags {
                trace: env.trace_enabled_for(prefix),
                print_stack: env.print_stack,
            },
        }
    }

    /// Logger name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether TRACE events are emitted by this logger.
    pub const fn is_trace_enabled(&self) -> bool {
        self.flags.trace
    }

    /// Whether a stack trace follows every event.
    pub const fn is_print_stack_enabled(&self) -> bool {
        self.flags.print_stack
    }

    pub(crate) fn with_base<R>(&self, run: impl FnOnce(&BaseLogger<'_>) -> R) -> R {
        let settings = registry::current();
        let output = settings.builder.output_for(&self.prefix);
        let base = BaseLogger::new(&self.prefix, self.flags, output.as_ref(), &settings.hooks);
        run(&base)
    }

    /// Log at DEBUG.
    #[track_caller]
    pub fn debug(&self, arg: impl Into<Arg>) {
        let caller = Caller::here();
        let arg = arg.into();
        self.with_base(|base| base.log(Severity::Debug, caller, &arg));
    }

    /// Log a formatted message at DEBUG. See [`debugf!`](crate::debugf).
    #[track_caller]
    pub fn debugf(&self, template: &str, args: &[Arg]) {
        let caller = Caller::here();
        self.with_base(|base| base.logf(Severity::Debug, caller, template, args));
    }

    /// Log a message with key/value pairs at DEBUG.
    #[track_caller]
    pub fn debugw(&self, message: &str, fields: &[(&str, ContextValue)]) {
        let caller = Caller::here();
        self.with_base(|base| base.logw(Severity::Debug, caller, message, fields));
    }

    /// Log at INFO.
    #[track_caller]
    pub fn info(&self, arg: impl Into<Arg>) {
        let caller = Caller::here();
        let arg = arg.into();
        self.with_base(|base| base.log(Severity::Info, caller, &arg));
    }

    /// Log a formatted message at INFO. See [`infof!`](crate::infof).
    #[track_caller]
    pub fn infof(&self, template: &str, args: &[Arg]) {
        let caller = Caller::here();
        self.with_base(|base| base.logf(Severity::Info, caller, template, args));
    }

    /// Log a message with key/value pairs at INFO.
    #[track_caller]
    pub fn infow(&self, message: &str, fields: &[(&str, ContextValue)]) {
        let caller = Caller::here();
        self.with_base(|base| base.logw(Severity::Info, caller, message, fields));
    }

    /// Log at TRACE. Does nothing, not even converting `arg`, unless trace
    /// is enabled for this logger.
    #[track_caller]
    pub fn trace(&self, arg: impl Into<Arg>) {
        if !self.flags.trace {
            return;
        }
        let caller = Caller::here();
        let arg = arg.into();
        self.with_base(|base| base.log(Severity::Trace, caller, &arg));
    }

    /// Log a formatted message at TRACE. See [`tracef!`](crate::tracef).
    #[track_caller]
    pub fn tracef(&self, template: &str, args: &[Arg]) {
        if !self.flags.trace {
            return;
        }
        let caller = Caller::here();
        self.with_base(|base| base.logf(Severity::Trace, caller, template, args));
    }

    /// Log a message with key/value pairs at TRACE.
    #[track_caller]
    pub fn tracew(&self, message: &str, fields: &[(&str, ContextValue)]) {
        if !self.flags.trace {
            return;
        }
        let caller = Caller::here();
        self.with_base(|base| base.logw(Severity::Trace, caller, message, fields));
    }

    /// Log at ERROR and return the error: `arg` itself when it is an
    /// [`Error`], otherwise a new error holding its text.
    #[track_caller]
    pub fn error(&self, arg: impl Into<Arg>) -> Error {
        let caller = Caller::here();
        let arg = arg.into();
        self.with_base(|base| base.error(Severity::Error, caller, arg))
    }

    /// Log a formatted message at ERROR and return the first error argument,
    /// or a new error when there is none. See [`errorf!`](crate::errorf).
    #[track_caller]
    pub fn errorf(&self, template: &str, args: &[Arg]) -> Error {
        let caller = Caller::here();
        self.with_base(|base| base.errorf(Severity::Error, caller, template, args))
    }

    /// Log a message with key/value pairs at ERROR.
    #[track_caller]
    pub fn errorw(&self, message: &str, fields: &[(&str, ContextValue)]) -> Error {
        let caller = Caller::here();
        self.with_base(|base| base.errorw(Severity::Error, caller, message, fields))
    }

    /// Log at FATAL, flush, then run the fatal handler (by default the
    /// process exits with status 1).
    #[track_caller]
    pub fn fatal(&self, arg: impl Into<Arg>) {
        let caller = Caller::here();
        let arg = arg.into();
        self.with_base(|base| {
            let error = base.error(Severity::Fatal, caller, arg);
            base.fatal_exit(&error);
        });
    }

    /// Formatted [`Logger::fatal`]. See [`fatalf!`](crate::fatalf).
    #[track_caller]
    pub fn fatalf(&self, template: &str, args: &[Arg]) {
        let caller = Caller::here();
        self.with_base(|base| {
            let error = base.errorf(Severity::Fatal, caller, template, args);
            base.fatal_exit(&error);
        });
    }

    /// [`Logger::fatal`] with key/value pairs.
    #[track_caller]
    pub fn fatalw(&self, message: &str, fields: &[(&str, ContextValue)]) {
        let caller = Caller::here();
        self.with_base(|base| {
            let error = base.errorw(Severity::Fatal, caller, message, fields);
            base.fatal_exit(&error);
        });
    }

    /// Print-style adapter writing at ERROR through this logger.
    #[must_use]
    pub fn as_std_logger(&self) -> StdLogger {
        StdLogger::new(self.clone())
    }

    /// Writer logging every line written to it at TRACE. Discards
    /// everything when trace is disabled.
    #[track_caller]
    #[must_use]
    pub fn trace_out(&self) -> TraceWriter {
        TraceWriter::spawn(self.clone(), Caller::here())
    }
}
