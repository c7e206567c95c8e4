//! Fatal handler that records instead of exiting.

use ctxlog::Error;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every error handed to the fatal handler. Dropping the recorder
/// restores the default handler.
#[derive(Debug)]
pub struct FatalRecorder {
    seen: Arc<Mutex<Vec<Error>>>,
}

impl FatalRecorder {
    /// Install the recorder as the process-wide fatal handler.
    pub fn install() -> Self {
        let seen: Arc<Mutex<Vec<Error>>> = Arc::default();
        let record = Arc::clone(&seen);
        ctxlog::on_fatal(move |error: &Error| record.lock().push(error.clone()));
        Self { seen }
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> Vec<Error> {
        self.seen.lock().clone()
    }

    /// Number of fatal events recorded.
    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }
}

impl Drop for FatalRecorder {
    fn drop(&mut self) {
        ctxlog::default_on_fatal();
    }
}
