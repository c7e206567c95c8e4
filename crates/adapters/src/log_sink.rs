//! Byte sinks for stream backends.

use ctxlog_ports::LogSink;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Report a failed log write on the process's own stderr.
///
/// Logging never fails its caller; this is the only trace a lost event leaves.
pub fn report_write_failure(error: &io::Error) {
    eprintln!("Unable to log: {error}");
}

/// Log sink that writes to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        io::stderr().lock().flush()
    }
}

/// Log sink that writes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Log sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn write(&self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }
}

/// Log sink over any writer. Writes are serialized by a mutex, so one event
/// never interleaves with another.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.writer.lock().write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_collects_whole_writes() -> io::Result<()> {
        let sink = WriterSink::new(Vec::new());
        sink.write(b"hello\n")?;
        sink.write(b"world\n")?;
        sink.flush()?;

        assert_eq!(sink.into_inner(), b"hello\nworld\n".to_vec());
        Ok(())
    }

    #[test]
    fn writer_sink_surfaces_write_errors() {
        let sink = WriterSink::new(FailingWriter);
        let result = sink.write(b"lost\n");
        assert!(result.is_err());
    }

    #[test]
    fn discard_sink_accepts_everything() {
        assert!(DiscardSink.write(b"anything").is_ok());
        assert!(DiscardSink.flush().is_ok());
    }
}
