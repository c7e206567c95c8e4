//! Structured error values.
//!
//! [`Error`] is the error type returned by every `error*` logging call. It is
//! cheap to clone and keeps its identity across clones, so a caller can hand
//! an error to the logger and get the very same error back.
//!
//! Two shapes exist:
//!
//! - **plain** errors carry only text (`Error::msg`, `From<&str>`)
//! - **structured** errors also carry the creation site, a context map (the
//!   operation context at creation plus the `error*` keys), an optional
//!   template and an optional cause

use crate::context::{ContextMap, ContextValue};
use crate::ops;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Context key holding the error template (or text when no template exists).
pub const KEY_ERROR: &str = "error";
/// Context key holding the rendered error text.
pub const KEY_ERROR_TEXT: &str = "error_text";
/// Context key holding the error type label.
pub const KEY_ERROR_TYPE: &str = "error_type";
/// Context key holding the `file:line` the error was created at.
pub const KEY_ERROR_LOCATION: &str = "error_location";
/// Type label used for errors created by this crate.
pub const STRUCTURED_ERROR_TYPE: &str = "ctxlog.Error";

/// Error value with optional location, context and cause.
#[derive(Clone)]
pub struct Error {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Plain(Arc<str>),
    Structured(Arc<Structured>),
}

#[derive(Clone)]
struct Structured {
    text: String,
    template: Option<String>,
    location: &'static Location<'static>,
    context: ContextMap,
    cause: Option<Error>,
    foreign: Option<Arc<dyn StdError + Send + Sync>>,
}

impl Error {
    /// Create a structured error located at the caller.
    #[track_caller]
    pub fn new(text: impl Into<String>) -> Self {
        Self::located(text, None, Location::caller())
    }

    /// Create a structured error that remembers the template it was
    /// rendered from.
    #[track_caller]
    pub fn with_template(template: impl Into<String>, text: impl Into<String>) -> Self {
        Self::located(text, Some(template.into()), Location::caller())
    }

    /// Create a structured error at an explicit location.
    pub fn located(
        text: impl Into<String>,
        template: Option<String>,
        location: &'static Location<'static>,
    ) -> Self {
        Self::build(text.into(), template, location, None, None, STRUCTURED_ERROR_TYPE)
    }

    /// Create a structured error caused by `cause`.
    #[track_caller]
    pub fn wrap(cause: impl Into<Self>, text: impl Into<String>) -> Self {
        Self::build(
            text.into(),
            None,
            Location::caller(),
            Some(cause.into()),
            None,
            STRUCTURED_ERROR_TYPE,
        )
    }

    /// Adopt an error from another library, located at the caller.
    #[track_caller]
    pub fn foreign<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::build(
            error.to_string(),
            None,
            Location::caller(),
            None,
            Some(Arc::new(error)),
            std::any::type_name::<E>(),
        )
    }

    /// Create a plain error carrying only text.
    pub fn msg(text: impl fmt::Display) -> Self {
        Self {
            repr: Repr::Plain(Arc::from(text.to_string())),
        }
    }

    fn build(
        text: String,
        template: Option<String>,
        location: &'static Location<'static>,
        cause: Option<Self>,
        foreign: Option<Arc<dyn StdError + Send + Sync>>,
        type_label: &str,
    ) -> Self {
        Self {
            repr: Repr::Structured(Arc::new(Structured::new(
                text, template, location, cause, foreign, type_label,
            ))),
        }
    }

    /// Attach a context value. Plain errors become structured errors located
    /// at the caller.
    #[must_use]
    #[track_caller]
    pub fn with(self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        let mut structured = match self.repr {
            Repr::Structured(inner) => inner,
            Repr::Plain(text) => Arc::new(Structured::new(
                text.to_string(),
                None,
                Location::caller(),
                None,
                None,
                STRUCTURED_ERROR_TYPE,
            )),
        };
        Arc::make_mut(&mut structured)
            .context
            .insert(key.into(), value.into());
        Self {
            repr: Repr::Structured(structured),
        }
    }

    /// Rendered error text.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.repr {
            Repr::Plain(text) => text,
            Repr::Structured(inner) => &inner.text,
        }
    }

    /// Template the text was rendered from, if any.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        match &self.repr {
            Repr::Plain(_) => None,
            Repr::Structured(inner) => inner.template.as_deref(),
        }
    }

    /// Creation site of a structured error.
    #[must_use]
    pub fn location(&self) -> Option<&'static Location<'static>> {
        match &self.repr {
            Repr::Plain(_) => None,
            Repr::Structured(inner) => Some(inner.location),
        }
    }

    /// Context values of a structured error.
    #[must_use]
    pub fn context(&self) -> Option<&ContextMap> {
        match &self.repr {
            Repr::Plain(_) => None,
            Repr::Structured(inner) => Some(&inner.context),
        }
    }

    /// Direct cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Self> {
        match &self.repr {
            Repr::Plain(_) => None,
            Repr::Structured(inner) => inner.cause.as_ref(),
        }
    }

    /// Whether this error carries location and context.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self.repr, Repr::Structured(_))
    }

    /// Iterate over this error and its causes, outermost first.
    #[must_use]
    pub const fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Innermost error of the cause chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Whether both values are clones of the same error.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Plain(left), Repr::Plain(right)) => Arc::ptr_eq(left, right),
            (Repr::Structured(left), Repr::Structured(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Multi-line rendering: the text, the creation site, then each cause.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (depth, error) in self.chain().enumerate() {
            if depth == 0 {
                lines.push(error.text().to_string());
            } else {
                lines.push(format!("Caused by: {}", error.text()));
            }
            if let Some(location) = error.location() {
                lines.push(format!("  at {}", format_location(location)));
            }
            if let Repr::Structured(inner) = &error.repr
                && let Some(foreign) = &inner.foreign
            {
                let mut source = foreign.source();
                while let Some(current) = source {
                    lines.push(format!("Caused by: {current}"));
                    source = current.source();
                }
            }
        }
        lines
    }
}

impl Structured {
    fn new(
        text: String,
        template: Option<String>,
        location: &'static Location<'static>,
        cause: Option<Error>,
        foreign: Option<Arc<dyn StdError + Send + Sync>>,
        type_label: &str,
    ) -> Self {
        let mut context = ops::snapshot();
        context.insert(
            KEY_ERROR.to_string(),
            ContextValue::from(template.clone().unwrap_or_else(|| text.clone())),
        );
        context.insert(KEY_ERROR_TEXT.to_string(), ContextValue::from(text.clone()));
        context.insert(KEY_ERROR_TYPE.to_string(), ContextValue::from(type_label));
        context.insert(
            KEY_ERROR_LOCATION.to_string(),
            ContextValue::from(format_location(location)),
        );
        Self {
            text,
            template,
            location,
            context,
            cause,
            foreign,
        }
    }
}

/// Iterator over an error's cause chain.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

fn format_location(location: &Location<'_>) -> String {
    format!("{}:{}", location.file(), location.line())
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.text())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("Error");
        debug.field("text", &self.text());
        if let Some(location) = self.location() {
            debug.field("location", &format_location(location));
        }
        if let Some(cause) = self.cause() {
            debug.field("cause", cause);
        }
        debug.finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.repr {
            Repr::Plain(_) => None,
            Repr::Structured(inner) => {
                if let Some(cause) = &inner.cause {
                    return Some(cause);
                }
                inner.foreign.as_ref().and_then(|foreign| foreign.source())
            },
        }
    }
}

impl From<&str> for Error {
    fn from(text: &str) -> Self {
        Self::msg(text)
    }
}

impl From<String> for Error {
    fn from(text: String) -> Self {
        Self {
            repr: Repr::Plain(Arc::from(text)),
        }
    }
}

impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        Self::foreign(error)
    }
}

impl From<std::fmt::Error> for Error {
    #[track_caller]
    fn from(error: std::fmt::Error) -> Self {
        Self::foreign(error)
    }
}
