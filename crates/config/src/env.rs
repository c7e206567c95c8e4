//! Environment variable parsing for logger flags.
//!
//! Flags are read when a logger is constructed, never per call. Two parsers
//! are provided:
//! - lenient (`LogEnv::from_map`): what loggers use; bad values degrade to
//!   "disabled" instead of failing
//! - strict (`LogEnv::parse`): reports malformed values, for tooling that
//!   wants to validate an environment up front

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Env var: enable TRACE output. A boolean, or a comma-separated list of
/// logger names.
pub const ENV_TRACE: &str = "TRACE";
/// Env var: print a stack trace after every message (boolean).
pub const ENV_PRINT_STACK: &str = "PRINT_STACK";

/// Which loggers emit TRACE events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TraceSetting {
    /// No logger traces.
    #[default]
    Disabled,
    /// Every logger traces.
    All,
    /// Only the listed logger names trace.
    Prefixes(BTreeSet<String>),
}

impl TraceSetting {
    /// Whether a logger with this name emits TRACE events.
    #[must_use]
    pub fn enabled_for(&self, prefix: &str) -> bool {
        match self {
            Self::Disabled => false,
            Self::All => true,
            Self::Prefixes(prefixes) => prefixes.contains(prefix),
        }
    }
}

/// Logger flags resolved from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEnv {
    /// TRACE selection.
    pub trace: TraceSetting,
    /// Whether stack traces follow each message.
    pub print_stack: bool,
}

/// Validation failures when parsing env variables strictly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    #[error("{var} must be a boolean, got {value:?}")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// A logger-name list contained an empty entry.
    #[error("{var} contains an empty logger name in {value:?}")]
    EmptyPrefixEntry {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl LogEnv {
    /// Resolve flags leniently from an env map.
    ///
    /// `TRACE` that is not a boolean is read as a logger-name list; an
    /// invalid `PRINT_STACK` means no stack traces.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let trace = map
            .get(ENV_TRACE)
            .map(String::as_str)
            .map_or(TraceSetting::Disabled, lenient_trace);
        let print_stack = map
            .get(ENV_PRINT_STACK)
            .and_then(|raw| parse_bool_flag(raw))
            .unwrap_or(false);
        Self { trace, print_stack }
    }

    /// Resolve flags strictly from an env map.
    pub fn parse(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let trace = match map.get(ENV_TRACE) {
            None => TraceSetting::Disabled,
            Some(raw) => strict_trace(raw)?,
        };
        let print_stack = match map.get(ENV_PRINT_STACK) {
            None => false,
            Some(raw) => parse_bool_flag(raw).ok_or_else(|| EnvParseError::InvalidBool {
                var: ENV_PRINT_STACK,
                value: raw.clone(),
            })?,
        };
        Ok(Self { trace, print_stack })
    }

    /// Resolve flags leniently from the process environment.
    #[must_use]
    pub fn from_std_env() -> Self {
        Self::from_map(&std_env_map())
    }

    /// Resolve flags strictly from the process environment.
    pub fn parse_std_env() -> Result<Self, EnvParseError> {
        Self::parse(&std_env_map())
    }

    /// Whether a logger with this name emits TRACE events.
    #[must_use]
    pub fn trace_enabled_for(&self, prefix: &str) -> bool {
        self.trace.enabled_for(prefix)
    }
}

fn std_env_map() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for name in [ENV_TRACE, ENV_PRINT_STACK] {
        if let Ok(value) = std::env::var(name) {
            map.insert(name.to_string(), value);
        }
    }
    map
}

/// Parse a boolean flag. Accepted spellings:
/// `1 t T TRUE true True` and `0 f F FALSE false False`.
#[must_use]
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn lenient_trace(raw: &str) -> TraceSetting {
    match parse_bool_flag(raw) {
        Some(true) => TraceSetting::All,
        Some(false) => TraceSetting::Disabled,
        None => {
            let prefixes: BTreeSet<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
            if prefixes.is_empty() {
                TraceSetting::Disabled
            } else {
                TraceSetting::Prefixes(prefixes)
            }
        },
    }
}

fn strict_trace(raw: &str) -> Result<TraceSetting, EnvParseError> {
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var: ENV_TRACE });
    }
    match parse_bool_flag(raw) {
        Some(true) => Ok(TraceSetting::All),
        Some(false) => Ok(TraceSetting::Disabled),
        None => {
            let mut prefixes = BTreeSet::new();
            for entry in raw.split(',') {
                let entry = entry.trim();
                if entry.is_empty() {
                    return Err(EnvParseError::EmptyPrefixEntry {
                        var: ENV_TRACE,
                        value: raw.to_string(),
                    });
                }
                prefixes.insert(entry.to_string());
            }
            Ok(TraceSetting::Prefixes(prefixes))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::error::Error;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn missing_vars_disable_everything() {
        let parsed = LogEnv::from_map(&BTreeMap::new());
        assert_eq!(parsed, LogEnv::default());
    }

    #[test]
    fn boolean_trace_enables_every_logger() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            let parsed = LogEnv::from_map(&env(&[(ENV_TRACE, raw)]));
            assert_eq!(parsed.trace, TraceSetting::All, "{raw}");
            assert!(parsed.trace_enabled_for("anything"));
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            let parsed = LogEnv::from_map(&env(&[(ENV_TRACE, raw)]));
            assert_eq!(parsed.trace, TraceSetting::Disabled, "{raw}");
        }
    }

    #[test]
    fn prefix_lists_are_trimmed() {
        let parsed = LogEnv::from_map(&env(&[(ENV_TRACE, " db , http,,cache ")]));
        assert!(parsed.trace_enabled_for("db"));
        assert!(parsed.trace_enabled_for("http"));
        assert!(parsed.trace_enabled_for("cache"));
        assert!(!parsed.trace_enabled_for("auth"));
    }

    #[test]
    fn lenient_print_stack_defaults_to_false() {
        assert!(!LogEnv::from_map(&env(&[(ENV_PRINT_STACK, "yes")])).print_stack);
        assert!(LogEnv::from_map(&env(&[(ENV_PRINT_STACK, "true")])).print_stack);
    }

    #[test]
    fn strict_parsing_reports_bad_values() -> Result<(), Box<dyn Error>> {
        assert_eq!(
            LogEnv::parse(&env(&[(ENV_PRINT_STACK, "yes")])),
            Err(EnvParseError::InvalidBool {
                var: ENV_PRINT_STACK,
                value: "yes".to_string(),
            })
        );
        assert_eq!(
            LogEnv::parse(&env(&[(ENV_TRACE, "  ")])),
            Err(EnvParseError::EmptyValue { var: ENV_TRACE })
        );
        assert!(matches!(
            LogEnv::parse(&env(&[(ENV_TRACE, "db,,http")])),
            Err(EnvParseError::EmptyPrefixEntry { .. })
        ));

        let parsed = LogEnv::parse(&env(&[(ENV_TRACE, "db"), (ENV_PRINT_STACK, "1")]))?;
        assert!(parsed.trace_enabled_for("db"));
        assert!(parsed.print_stack);
        Ok(())
    }

    #[test]
    fn errors_name_the_variable() {
        let error = EnvParseError::InvalidBool {
            var: ENV_PRINT_STACK,
            value: "maybe".to_string(),
        };
        assert_eq!(error.to_string(), "PRINT_STACK must be a boolean, got \"maybe\"");
    }

    proptest! {
        #[test]
        fn listed_names_are_enabled(names in proptest::collection::btree_set("svc_[a-z]{1,6}", 1..6)) {
            let raw = names.iter().cloned().collect::<Vec<_>>().join(",");
            let parsed = LogEnv::from_map(&env(&[(ENV_TRACE, raw.as_str())]));
            for name in &names {
                prop_assert!(parsed.trace_enabled_for(name));
            }
            prop_assert!(!parsed.trace_enabled_for("UPPER"));
        }
    }
}
