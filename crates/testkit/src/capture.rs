//! Route log output into the test harness.
//!
//! ```no_run
//! #[test]
//! fn handles_request() {
//!     let _capture = ctxlog_testkit::capture();
//!     // log lines now show up with the test's captured output
//! }
//! ```

use ctxlog::{LogSink, OutputBuilder, SharedOutput, TextOutput};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Sink printing through `print!`, which the test harness captures per test.
#[derive(Debug, Default)]
pub struct TestLogSink {
    stopped: Mutex<bool>,
}

impl TestLogSink {
    fn stop(&self) {
        *self.stopped.lock() = true;
    }
}

impl LogSink for TestLogSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if *self.stopped.lock() {
            return Err(io::Error::other("writing to stopped test log sink"));
        }
        print!("{}", String::from_utf8_lossy(bytes));
        Ok(())
    }
}

/// Active capture. Dropping it restores the previous output and stops the
/// sink.
pub struct Capture {
    sink: Arc<TestLogSink>,
    previous: Option<Arc<dyn OutputBuilder>>,
}

impl std::fmt::Debug for Capture {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Capture")
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

/// Send every logger's text output to the test harness until the returned
/// guard drops.
#[must_use = "output is restored as soon as the guard drops"]
pub fn capture() -> Capture {
    let sink = Arc::new(TestLogSink::default());
    let output = Arc::new(TextOutput::new(sink.clone(), sink.clone()));
    let previous = ctxlog::swap_output(Arc::new(SharedOutput::new(output)));
    Capture {
        sink,
        previous: Some(previous),
    }
}

impl Capture {
    /// Sink receiving the captured output.
    pub fn sink(&self) -> Arc<TestLogSink> {
        Arc::clone(&self.sink)
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            ctxlog::set_output(previous);
        }
        self.sink.stop();
    }
}
