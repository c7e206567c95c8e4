//! # ctxlog-app
//!
//! The logging core: the base logger that resolves errors and context for a
//! call, the output builders that map logger names to backends, and the
//! fatal/reporter hooks.
//! This crate depends on `ports` and `shared`.

pub mod base;
pub mod builder;
pub mod hooks;
pub mod merge;

pub use base::{BaseLogger, LoggerFlags};
pub use builder::{OutputBuilder, PerPrefixOutput, SharedOutput};
pub use hooks::{FATAL_EXIT_CODE, Hooks, exit_on_fatal};
pub use merge::{error_context, event_context, report_context};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
