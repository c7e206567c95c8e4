//! Result helpers for shared error handling.

use crate::errors::Error;

/// Shared result type used across the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Extension helpers mirroring common `Result` combinators.
pub trait ResultExt<T, E> {
    /// Map the success value, preserving the error.
    fn map_ok<U, F>(self, op: F) -> Result<U, E>
    where
        F: FnOnce(T) -> U;

    /// Wrap the error with additional text, keeping it as the cause.
    fn context(self, text: &str) -> Result<T>
    where
        E: Into<Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_ok<U, F>(self, op: F) -> Result<U, E>
    where
        F: FnOnce(T) -> U,
    {
        self.map(op)
    }

    #[track_caller]
    fn context(self, text: &str) -> Result<T>
    where
        E: Into<Error>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(Error::wrap(error, text)),
        }
    }
}
