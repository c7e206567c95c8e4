//! Log call arguments.
//!
//! A log call carries exactly one primary argument, one of three kinds:
//!
//! - a plain displayable value
//! - an [`Error`], which `error*` calls hand back to the caller unchanged
//! - a [`MultiLine`] producer, rendered as one log line per produced line
//!
//! Backends dispatch on the variant, never on the dynamic type of a value.

use ctxlog_shared::{ContextValue, Error};
use std::fmt;
use std::sync::Arc;

/// A value able to render itself as several log lines.
pub trait MultiLine: Send + Sync {
    /// Produce the lines of this value, in order. The sequence must be finite.
    fn lines(&self) -> Box<dyn Iterator<Item = String> + '_>;
}

impl MultiLine for Error {
    fn lines(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(Error::lines(self).into_iter())
    }
}

impl MultiLine for Vec<String> {
    fn lines(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.iter().cloned())
    }
}

/// Primary argument of a log call.
#[derive(Clone)]
pub enum Arg {
    /// Any displayable value.
    Value(Arc<dyn fmt::Display + Send + Sync>),
    /// An error value; its context joins the event context.
    Error(Error),
    /// A multi-line producer.
    MultiLine(Arc<dyn MultiLine>),
}

impl Arg {
    /// Wrap any displayable value.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Value(Arc::new(value))
    }

    /// Wrap a multi-line producer.
    pub fn multi_line<T>(value: T) -> Self
    where
        T: MultiLine + 'static,
    {
        Self::MultiLine(Arc::new(value))
    }

    /// The error carried by this argument, if any.
    #[must_use]
    pub const fn as_error(&self) -> Option<&Error> {
        match self {
            Self::Error(error) => Some(error),
            Self::Value(_) | Self::MultiLine(_) => None,
        }
    }

    /// Single-line text of this argument: the value itself, the error text,
    /// or the produced lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Value(value) => value.to_string(),
            Self::Error(error) => error.text().to_string(),
            Self::MultiLine(lines) => lines.lines().collect::<Vec<_>>().join("\n"),
        }
    }

    /// Lines this argument renders as. Errors render with their location and
    /// cause lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Value(value) => vec![value.to_string()],
            Self::Error(error) => error.lines(),
            Self::MultiLine(lines) => lines.lines().collect(),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => formatter.debug_tuple("Value").field(&value.to_string()).finish(),
            Self::Error(error) => formatter.debug_tuple("Error").field(error).finish(),
            Self::MultiLine(_) => formatter.write_str("MultiLine(..)"),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Display::fmt(value, formatter),
            Self::Error(error) => formatter.write_str(error.text()),
            Self::MultiLine(_) => formatter.write_str(&self.text()),
        }
    }
}

impl From<Error> for Arg {
    fn from(error: Error) -> Self {
        Self::Error(error)
    }
}

impl From<&Error> for Arg {
    fn from(error: &Error) -> Self {
        Self::Error(error.clone())
    }
}

impl From<std::io::Error> for Arg {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        Self::Error(Error::foreign(error))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::display(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::display(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::display(value.clone())
    }
}

impl From<ContextValue> for Arg {
    fn from(value: ContextValue) -> Self {
        match value {
            ContextValue::String(text) => Self::display(text),
            other => Self::display(other),
        }
    }
}

macro_rules! display_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::display(value)
                }
            }
        )*
    };
}

display_args!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Render a runtime template.
///
/// Each `{}` is replaced by the next argument's text; `{{` and `}}` produce
/// literal braces. A placeholder without an argument renders as `(MISSING)`;
/// surplus arguments are appended as ` (EXTRA a, b)`.
///
/// # Examples
///
/// ```
/// use ctxlog_ports::{Arg, format_template};
///
/// let args = [Arg::from("X"), Arg::from(3)];
/// assert_eq!(format_template("{} failed {} times", &args), "X failed 3 times");
/// assert_eq!(format_template("{{literal}} {}", &[]), "{literal} (MISSING)");
/// ```
#[must_use]
pub fn format_template(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(current) = chars.next() {
        match (current, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                out.push(current);
                chars.next();
            },
            ('{', Some('}')) => {
                chars.next();
                match remaining.next() {
                    Some(arg) => out.push_str(&arg.text()),
                    None => out.push_str("(MISSING)"),
                }
            },
            _ => out.push(current),
        }
    }
    let extra: Vec<String> = remaining.map(Arg::text).collect();
    if !extra.is_empty() {
        out.push_str(" (EXTRA ");
        out.push_str(&extra.join(", "));
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn substitutes_placeholders_in_order() {
        let args = [Arg::from("a"), Arg::from(2), Arg::from(true)];
        assert_eq!(format_template("{}-{}-{}", &args), "a-2-true");
    }

    #[test]
    fn reports_missing_and_extra_arguments() {
        assert_eq!(format_template("{} and {}", &[Arg::from(1)]), "1 and (MISSING)");
        assert_eq!(
            format_template("only {}", &[Arg::from(1), Arg::from("x"), Arg::from(2.5)]),
            "only 1 (EXTRA x, 2.5)"
        );
    }

    #[test]
    fn escaped_braces_are_literal() {
        assert_eq!(format_template("{{}} {}", &[Arg::from("v")]), "{} v");
        assert_eq!(format_template("{name}", &[]), "{name}");
    }

    #[test]
    fn error_args_render_their_text() {
        let error = Error::new("db down");
        assert_eq!(
            format_template("save failed: {}", &[Arg::from(&error)]),
            "save failed: db down"
        );
    }

    #[test]
    fn multi_line_args_produce_each_line() {
        let arg = Arg::multi_line(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(arg.lines(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(arg.text(), "one\ntwo");
        assert!(arg.as_error().is_none());
    }

    #[test]
    fn json_string_values_render_raw() {
        assert_eq!(Arg::from(serde_json::json!("raw")).text(), "raw");
        assert_eq!(Arg::from(serde_json::json!({"a": 1})).text(), "{\"a\":1}");
    }

    proptest! {
        #[test]
        fn templates_without_braces_are_unchanged(text in "[a-z0-9 ,.:;-]{0,40}") {
            prop_assert_eq!(format_template(&text, &[]), text);
        }

        #[test]
        fn every_placeholder_consumes_one_argument(values in proptest::collection::vec(0u32..1000, 0..8)) {
            let template = vec!["{}"; values.len()].join(" ");
            let args: Vec<Arg> = values.iter().copied().map(Arg::from).collect();
            let expected = values.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(format_template(&template, &args), expected);
        }
    }
}
