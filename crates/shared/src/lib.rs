//! # ctxlog-shared
//!
//! Shared building blocks for the ctxlog workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Structured errors with location, context values and a cause chain
//! - The thread-local operation context consulted by every log event
//! - Secret redaction helpers
//! - The byte-buffer pool used by the stream backends
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Cheap clones** - Errors and context values are `Arc`-backed where shared
//! 3. **Deterministic output** - Context maps are ordered by key

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod context;
pub mod errors;
pub mod ops;
pub mod pool;
pub mod redaction;
pub mod result;

pub use context::{ContextMap, ContextValue, fill_missing, render_value};
pub use errors::{
    Chain, Error, KEY_ERROR, KEY_ERROR_LOCATION, KEY_ERROR_TEXT, KEY_ERROR_TYPE,
    STRUCTURED_ERROR_TYPE,
};
pub use pool::{BufferPool, PoolStats, PooledBuffer};
pub use redaction::{REDACTED, is_secret_key, redact_context, redact_if_secret, redact_value};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::errors::Error;
    use super::result::{Result, ResultExt};

    #[test]
    fn shared_error_types_are_available() {
        let error = Error::new("invalid");
        assert_eq!(error.to_string(), "invalid");
        assert!(error.location().is_some());
    }

    #[test]
    fn shared_result_type_is_available() {
        let value: Result<i32> = Ok(5);
        let mapped = value.map_ok(|value| value + 1);
        assert!(matches!(mapped, Ok(6)));
    }

    #[test]
    fn crate_version_is_set() {
        assert!(!super::shared_crate_version().is_empty());
    }
}
