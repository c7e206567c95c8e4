//! Print-style adapter.
//!
//! `print`, `println` and `printf` report their own caller. The
//! [`io::Write`] impl buffers bytes and logs one event per completed line,
//! so `writeln!` with several arguments still yields a single entry. Each
//! line reports the immediate caller of the `write` that completed it:
//! through `write!` or `write_all` that is a frame inside the standard
//! library. An unterminated tail is logged on `flush` or drop.

use crate::logger::Logger;
use ctxlog_ports::{Arg, Caller, format_template};
use std::fmt;
use std::io;

/// Writes every message at ERROR through its logger. Reporters are not
/// notified.
#[derive(Debug)]
pub struct StdLogger {
    logger: Logger,
    pending: Vec<u8>,
    pending_caller: Option<Caller>,
}

impl StdLogger {
    pub(crate) const fn new(logger: Logger) -> Self {
        Self {
            logger,
            pending: Vec::new(),
            pending_caller: None,
        }
    }

    /// Logger this adapter writes through.
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log `message`, minus one trailing newline.
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.emit(Caller::here(), &message.to_string());
    }

    /// Same as [`StdLogger::print`]; the line break is implied.
    #[track_caller]
    pub fn println(&self, message: impl fmt::Display) {
        self.emit(Caller::here(), &message.to_string());
    }

    /// Log a formatted message.
    #[track_caller]
    pub fn printf(&self, template: &str, args: &[Arg]) {
        self.emit(Caller::here(), &format_template(template, args));
    }

    fn emit(&self, caller: Caller, text: &str) {
        let line = text.strip_suffix('\n').unwrap_or(text);
        self.logger.with_base(|base| base.error_line(caller, line));
    }

    fn emit_pending(&mut self, fallback: Caller) {
        if self.pending.is_empty() {
            return;
        }
        let caller = self.pending_caller.take().unwrap_or(fallback);
        let tail = std::mem::take(&mut self.pending);
        self.emit(caller, &String::from_utf8_lossy(&tail));
    }
}

/// Clones share the logger but start with an empty line buffer.
impl Clone for StdLogger {
    fn clone(&self) -> Self {
        Self::new(self.logger.clone())
    }
}

impl io::Write for StdLogger {
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let caller = Caller::here();
        self.pending.extend_from_slice(buf);
        while let Some(end) = self.pending.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            self.emit(caller, &String::from_utf8_lossy(&line));
        }
        self.pending_caller = (!self.pending.is_empty()).then_some(caller);
        Ok(buf.len())
    }

    #[track_caller]
    fn flush(&mut self) -> io::Result<()> {
        self.emit_pending(Caller::here());
        Ok(())
    }
}

impl Drop for StdLogger {
    fn drop(&mut self) {
        if let Some(caller) = self.pending_caller {
            self.emit_pending(caller);
        }
    }
}
