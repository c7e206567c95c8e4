//! # ctxlog
//!
//! Structured logging with named loggers, contextual key/value data and
//! backends that can be swapped at runtime.
//!
//! ```no_run
//! use serde_json::json;
//!
//! let log = ctxlog::logger_for("billing");
//! log.info("starting");
//! log.infow("charged", &[("amount", json!(12)), ("currency", json!("EUR"))]);
//!
//! let op = ctxlog::ops::begin("invoice");
//! op.set("customer", "c-42");
//! let error = ctxlog::errorf!(log, "invoice {} failed", 7);
//! assert_eq!(error.text(), "invoice 7 failed");
//! ```
//!
//! Output goes to stderr (ERROR, FATAL) and stdout (everything else) as text
//! until reconfigured with [`set_outputs`], [`use_json_output`],
//! [`use_tracing_output`] or [`set_output`]. `TRACE` and `PRINT_STACK` are
//! read from the environment when a logger is created.
//! This crate depends on `adapters`, `app`, `config`, `ports` and `shared`.

mod logger;
mod macros;
mod registry;
mod std_logger;
mod trace_writer;

pub use logger::{Logger, logger_for};
pub use registry::{
    clear_reporter, default_on_fatal, on_fatal, register_reporter, reset_outputs, set_output,
    set_outputs, set_writers, swap_output, use_json_output, use_tracing_output,
};
pub use std_logger::StdLogger;
pub use trace_writer::{CLOSED_LINE, TraceWriter};

pub use ctxlog_adapters::{
    DiscardSink, JsonOutput, Prepender, StderrSink, StdoutSink, TextOutput, TracingOutput,
    WriterSink,
};
pub use ctxlog_app::{FATAL_EXIT_CODE, OutputBuilder, PerPrefixOutput, SharedOutput};
pub use ctxlog_config::{EnvParseError, LogEnv, TraceSetting};
pub use ctxlog_ports::{Arg, Caller, Event, LogSink, MultiLine, Output, Severity};
pub use ctxlog_shared::{
    BufferPool, ContextMap, ContextValue, Error, REDACTED, Result, ResultExt, ops,
};

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
