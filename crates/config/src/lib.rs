//! # ctxlog-config
//!
//! Environment-driven logger flags: which loggers emit TRACE events and
//! whether stack traces follow each message.
//! This crate has no workspace dependencies.

/// Environment variable parsing.
pub mod env;

pub use env::{ENV_PRINT_STACK, ENV_TRACE, EnvParseError, LogEnv, TraceSetting, parse_bool_flag};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
