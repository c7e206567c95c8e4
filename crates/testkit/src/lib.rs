//! # ctxlog-testkit
//!
//! Helpers for tests of code that logs through `ctxlog`: output capture,
//! an in-memory sink, a recording fatal handler and a lock serializing tests
//! that touch the process-wide configuration.
//! This crate depends on `ctxlog`.

pub mod capture;
pub mod fatal;
pub mod memory;

pub use capture::{Capture, TestLogSink, capture};
pub use fatal::FatalRecorder;
pub use memory::{MemoryCapture, MemorySink};

use parking_lot::{Mutex, MutexGuard};

static GLOBAL_CONFIG: Mutex<()> = parking_lot::const_mutex(());

/// Serialize tests that reconfigure outputs or hooks. Hold the guard for the
/// whole test.
pub fn global_lock() -> MutexGuard<'static, ()> {
    GLOBAL_CONFIG.lock()
}

/// Replace every run of ASCII digits with `N`, so lines with line numbers
/// or timings compare stably.
pub fn normalize_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_number = false;
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            if !in_number {
                out.push('N');
            }
            in_number = true;
        } else {
            out.push(ch);
            in_number = false;
        }
    }
    out
}

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog::LogEnv;

    #[test]
    fn testkit_crate_compiles() {
        let version = testkit_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn normalizes_digit_runs() {
        assert_eq!(normalize_numbers("main.rs:123 took 45ms"), "main.rs:N took Nms");
        assert_eq!(normalize_numbers("no digits"), "no digits");
    }

    #[test]
    fn memory_capture_restores_previous_output() {
        let _lock = global_lock();
        let logger = ctxlog::Logger::with_env("kit", &LogEnv::default());

        let outer = MemoryCapture::text();
        {
            let inner = MemoryCapture::text();
            logger.info("inner");
            assert_eq!(inner.debug.lines().len(), 1);
        }
        logger.info("outer");

        let lines = outer.debug.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" outer"));
    }

    #[test]
    fn fatal_recorder_collects_errors() {
        let _lock = global_lock();
        let _capture = MemoryCapture::text();
        let recorder = FatalRecorder::install();
        let logger = ctxlog::Logger::with_env("kit", &LogEnv::default());

        logger.fatal("stop");

        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.errors()[0].text(), "stop");
    }

    #[test]
    fn capture_sink_rejects_writes_after_stop() {
        let _lock = global_lock();
        let capture = capture();
        let sink = capture.sink();
        ctxlog::Logger::with_env("kit", &LogEnv::default()).info("visible in test output");
        drop(capture);

        assert!(ctxlog::LogSink::write(sink.as_ref(), b"late\n").is_err());
    }
}
