//! # ctxlog-adapters
//!
//! Backend implementations for the output port (text, JSON, tracing), the
//! byte sinks they write to, and the stack resolver.
//! This crate depends on `ports` and `shared`.

pub mod json;
pub mod log_sink;
pub mod stack;
pub mod text;
pub mod tracing_output;

pub use json::JsonOutput;
pub use log_sink::{DiscardSink, StderrSink, StdoutSink, WriterSink, report_write_failure};
pub use text::{Prepender, TextOutput};
pub use tracing_output::TracingOutput;

use ctxlog_shared::BufferPool;
use std::sync::{Arc, LazyLock};

static SHARED_POOL: LazyLock<Arc<BufferPool>> = LazyLock::new(|| Arc::new(BufferPool::default()));

/// Buffer pool shared by every stream backend that was not given its own.
#[must_use]
pub fn shared_pool() -> Arc<BufferPool> {
    Arc::clone(&SHARED_POOL)
}

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("ctxlog") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_app_or_facade() {
        let deps = workspace_deps();
        let forbidden = ["ctxlog-app", "ctxlog"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "forbidden dependency found: {dep}"
            );
        }
    }

    #[test]
    fn shared_pool_is_a_single_instance() {
        assert!(Arc::ptr_eq(&shared_pool(), &shared_pool()));
        assert!(!adapters_crate_version().is_empty());
    }
}
