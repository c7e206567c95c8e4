//! Line-oriented writer that logs at TRACE from a background thread.

use crate::logger::Logger;
use ctxlog_adapters::report_write_failure;
use ctxlog_ports::{Arg, Caller, Severity};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Line logged once after the writer is closed.
pub const CLOSED_LINE: &str = "trace writer closed: EOF";

/// Writer returned by [`Logger::trace_out`].
///
/// Bytes are queued to a worker thread that splits them on `\n` and logs
/// each line at TRACE. [`TraceWriter::close`] (or dropping the writer) logs
/// any unterminated tail, then [`CLOSED_LINE`], and joins the worker.
#[derive(Debug)]
pub struct TraceWriter {
    state: State,
}

#[derive(Debug)]
enum State {
    Discard,
    Open {
        sender: Sender<Vec<u8>>,
        worker: JoinHandle<()>,
    },
    Closed,
}

impl TraceWriter {
    pub(crate) fn spawn(logger: Logger, caller: Caller) -> Self {
        if !logger.is_trace_enabled() {
            return Self {
                state: State::Discard,
            };
        }
        let (sender, receiver) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name(format!("ctxlog-trace-{}", logger.prefix()))
            .spawn(move || drain(&logger, caller, &receiver));
        match spawned {
            Ok(worker) => Self {
                state: State::Open { sender, worker },
            },
            Err(error) => {
                report_write_failure(&error);
                Self {
                    state: State::Discard,
                }
            },
        }
    }

    /// Whether bytes written are discarded because trace is disabled.
    pub const fn is_discarding(&self) -> bool {
        matches!(self.state, State::Discard)
    }

    /// Stop the worker after it has logged everything queued so far.
    /// Calling it again has no effect.
    pub fn close(&mut self) {
        if !matches!(self.state, State::Open { .. }) {
            return;
        }
        if let State::Open { sender, worker } = std::mem::replace(&mut self.state, State::Closed) {
            drop(sender);
            if worker.join().is_err() {
                report_write_failure(&io::Error::other("trace writer worker panicked"));
            }
        }
    }
}

impl io::Write for TraceWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.state {
            State::Discard => Ok(buf.len()),
            State::Open { sender, .. } => sender
                .send(buf.to_vec())
                .map(|()| buf.len())
                .map_err(|_| closed_error()),
            State::Closed => Err(closed_error()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        self.close();
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "trace writer closed")
}

fn drain(logger: &Logger, caller: Caller, receiver: &Receiver<Vec<u8>>) {
    let mut pending: Vec<u8> = Vec::new();
    for chunk in receiver {
        pending.extend_from_slice(&chunk);
        while let Some(end) = pending.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = pending.drain(..=end).collect();
            log_line(logger, caller, line.strip_suffix(b"\n").unwrap_or(&line));
        }
    }
    if !pending.is_empty() {
        log_line(logger, caller, &pending);
    }
    log_line(logger, caller, CLOSED_LINE.as_bytes());
}

fn log_line(logger: &Logger, caller: Caller, bytes: &[u8]) {
    let arg = Arg::from(String::from_utf8_lossy(bytes).into_owned());
    logger.with_base(|base| base.log(Severity::Trace, caller, &arg));
}
