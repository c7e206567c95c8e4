//! Byte sink boundary contract for stream backends.

use std::io;

/// Destination for fully formatted log output.
///
/// Each call receives every byte of one event, so a sink that serializes its
/// writes never interleaves two events.
pub trait LogSink: Send + Sync {
    /// Write one event's bytes.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Flush buffered bytes.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
