//! Context maps attached to errors and log events.

use serde_json::Value;
use std::collections::BTreeMap;

/// A single context value.
pub type ContextValue = Value;

/// Key-ordered context values.
///
/// Ordering by key keeps text output diffable and JSON output stable.
pub type ContextMap = BTreeMap<String, ContextValue>;

/// Render a context value the way it appears inside a text log line.
///
/// Strings are written raw (no quotes); every other value uses its JSON
/// notation.
///
/// # Examples
///
/// ```
/// use ctxlog_shared::render_value;
/// use serde_json::json;
///
/// assert_eq!(render_value(&json!("abc")), "abc");
/// assert_eq!(render_value(&json!(42)), "42");
/// assert_eq!(render_value(&json!([1, 2])), "[1,2]");
/// ```
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Insert every entry of `from` whose key is not already present in `into`.
pub fn fill_missing(into: &mut ContextMap, from: &ContextMap) {
    for (key, value) in from {
        if !into.contains_key(key) {
            into.insert(key.clone(), value.clone());
        }
    }
}
