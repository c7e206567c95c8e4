//! Formatting macros.
//!
//! Each macro converts its arguments with [`Arg::from`](crate::Arg) and
//! expands at the call site, so the reported location is the macro
//! invocation. Templates use `{}` placeholders; `{{` and `}}` are literal
//! braces.

/// Log a formatted message at DEBUG.
///
/// ```no_run
/// let log = ctxlog::logger_for("db");
/// ctxlog::debugf!(log, "opened {} in {}ms", "users", 12);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.debugf($template, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log a formatted message at INFO.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.infof($template, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log a formatted message at TRACE. Arguments are not evaluated unless
/// trace is enabled for the logger.
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let logger = &$logger;
        if logger.is_trace_enabled() {
            logger.tracef($template, &[$($crate::Arg::from($arg)),*]);
        }
    }};
}

/// Log a formatted message at ERROR. Evaluates to the first [`Error`]
/// argument, or to a new error carrying the template and call site.
///
/// [`Error`]: crate::Error
///
/// ```no_run
/// let log = ctxlog::logger_for("db");
/// let cause = ctxlog::Error::new("connection reset");
/// let returned = ctxlog::errorf!(log, "query failed: {}", &cause);
/// assert!(returned.same_as(&cause));
/// ```
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.errorf($template, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log a formatted message at FATAL, then run the fatal handler.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatalf($template, &[$($crate::Arg::from($arg)),*])
    };
}
