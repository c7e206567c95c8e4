//! # ctxlog-ports
//!
//! Contracts between the logging core and its backends.
//!
//! This crate defines the interfaces the base logger talks to (outputs,
//! sinks, observer hooks) and the argument model shared by every call path.
//! It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod arg;
pub mod caller;
pub mod hooks;
pub mod output;
pub mod severity;
pub mod sink;

pub use arg::*;
pub use caller::*;
pub use hooks::*;
pub use output::*;
pub use severity::*;
pub use sink::*;

// Re-export the shared types used in port signatures, so adapter crates can
// implement ports without directly depending on `ctxlog-shared`.
pub use ctxlog_shared::{ContextMap, ContextValue, Error};
