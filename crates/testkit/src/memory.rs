//! In-memory sink and output capture.

use ctxlog::{JsonOutput, LogSink, Output, OutputBuilder, SharedOutput, TextOutput};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Sink recording every write as one entry.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<Vec<u8>>>,
}

impl MemorySink {
    /// Everything written so far, concatenated.
    pub fn contents(&self) -> String {
        let writes = self.writes.lock();
        writes
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    /// Written text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Individual writes, in order.
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    /// Drain and return the individual writes.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.writes.lock())
            .into_iter()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.writes.lock().push(bytes.to_vec());
        Ok(())
    }
}

/// Routes all loggers to two memory sinks until dropped, then restores the
/// previous output.
pub struct MemoryCapture {
    /// Receives ERROR and FATAL events.
    pub errors: Arc<MemorySink>,
    /// Receives all other events.
    pub debug: Arc<MemorySink>,
    previous: Option<Arc<dyn OutputBuilder>>,
}

impl MemoryCapture {
    /// Capture through the text backend.
    pub fn text() -> Self {
        Self::install(|errors, debug| Arc::new(TextOutput::new(errors, debug)))
    }

    /// Capture through the JSON backend.
    pub fn json() -> Self {
        Self::install(|errors, debug| Arc::new(JsonOutput::new(errors, debug)))
    }

    fn install(
        build: impl FnOnce(Arc<dyn LogSink>, Arc<dyn LogSink>) -> Arc<dyn Output>,
    ) -> Self {
        let errors = Arc::new(MemorySink::default());
        let debug = Arc::new(MemorySink::default());
        let output = build(errors.clone(), debug.clone());
        let previous = ctxlog::swap_output(Arc::new(SharedOutput::new(output)));
        Self {
            errors,
            debug,
            previous: Some(previous),
        }
    }
}

impl std::fmt::Debug for MemoryCapture {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MemoryCapture")
            .field("errors", &self.errors)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Drop for MemoryCapture {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            ctxlog::set_output(previous);
        }
    }
}
