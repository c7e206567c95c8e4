//! Source location of the emitting call site.
//!
//! Every public logging entry point is `#[track_caller]` and captures its
//! location exactly once, at the entry. The captured [`Caller`] is then
//! passed down unchanged, so internal frames never show up as the reported
//! location regardless of how many layers sit between the entry point and the
//! backend.

use std::fmt;
use std::panic::Location;

/// Location of the application call site that emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(&'static Location<'static>);

impl Caller {
    /// Capture the location of the caller of the enclosing
    /// `#[track_caller]` function.
    #[track_caller]
    #[must_use]
    pub fn here() -> Self {
        Self(Location::caller())
    }

    /// Wrap an explicit location.
    #[must_use]
    pub const fn from_location(location: &'static Location<'static>) -> Self {
        Self(location)
    }

    /// The underlying location.
    #[must_use]
    pub const fn location(self) -> &'static Location<'static> {
        self.0
    }

    /// Source file as recorded by the compiler.
    #[must_use]
    pub fn file(self) -> &'static str {
        self.0.file()
    }

    /// Line number.
    #[must_use]
    pub fn line(self) -> u32 {
        self.0.line()
    }

    /// Final path component of the source file.
    #[must_use]
    pub fn basename(self) -> &'static str {
        let file = self.0.file();
        file.rsplit(['/', '\\']).next().unwrap_or(file)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.basename(), self.line())
    }
}
