//! Secret detection and redaction utilities.
//!
//! Provides consistent logic for detecting sensitive keys and redacting their
//! values before context maps reach a log backend.

use crate::context::ContextMap;
use serde_json::Value;

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Whole key segments that mark a value as secret.
const SECRET_SEGMENTS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "apikey",
    "credential",
    "credentials",
    "authorization",
];

/// Checks if a key/variable name likely refers to a secret.
///
/// The key is split into segments on `_`, `-` and `.` and compared
/// case-insensitively against known secret words. `api` followed by `key`
/// also counts, so `API_KEY` matches while `cache_key` or `author` do not.
///
/// # Examples
///
/// ```
/// use ctxlog_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("password"));
/// assert!(!is_secret_key("LOG_LEVEL"));
/// assert!(!is_secret_key("cache_key"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    let segments: Vec<&str> = key
        .split(['_', '-', '.'])
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.iter().any(|segment| SECRET_SEGMENTS.contains(segment))
        || segments
            .windows(2)
            .any(|pair| matches!(pair, ["api", "key"]))
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use ctxlog_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("API_KEY", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("LOG_LEVEL", "debug"), "debug");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// Redact secret-looking keys of a context map, recursing into nested values.
pub fn redact_context(context: &mut ContextMap) {
    for (key, value) in context.iter_mut() {
        if is_secret_key(key) {
            *value = Value::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
}

/// Redact secret-looking keys nested inside a JSON value.
pub fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = Value::String(REDACTED.to_string());
                } else {
                    redact_value(nested);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_common_secret_patterns() {
        assert!(is_secret_key("API_KEY"));
        assert!(is_secret_key("refresh_token"));
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("credentials"));
        assert!(is_secret_key("Authorization"));
        assert!(is_secret_key("x-api-key"));
        assert!(is_secret_key("smtp.password"));
    }

    #[test]
    fn rejects_non_secret_patterns() {
        assert!(!is_secret_key("LOG_LEVEL"));
        assert!(!is_secret_key("op"));
        assert!(!is_secret_key("root_op"));
        assert!(!is_secret_key("error_location"));
    }

    #[test]
    fn words_containing_secret_fragments_are_kept() {
        for key in ["cache_key", "primary_key", "monkey", "author", "tokenizer", "keyspace"] {
            assert!(!is_secret_key(key), "{key} should not be redacted");
        }

        let mut context = ContextMap::new();
        context.insert("cache_key".to_string(), json!("users:42"));
        context.insert("author".to_string(), json!("ada"));
        context.insert("monkey".to_string(), json!({ "name": "bubbles" }));
        let before = context.clone();

        redact_context(&mut context);

        assert_eq!(context, before);
    }

    #[test]
    fn redacts_nested_context_values() {
        let mut context = ContextMap::new();
        context.insert("api_key".to_string(), json!("sk-1"));
        context.insert("safe".to_string(), json!("ok"));
        context.insert(
            "request".to_string(),
            json!({ "token": "t", "items": [{ "password": "p", "n": 1 }] }), // pragma: allowlist secret
        );

        redact_context(&mut context);

        assert_eq!(context.get("api_key"), Some(&json!(REDACTED)));
        assert_eq!(context.get("safe"), Some(&json!("ok")));
        assert_eq!(
            context.get("request"),
            Some(&json!({ "token": REDACTED, "items": [{ "password": REDACTED, "n": 1 }] }))
        );
    }

    #[test]
    fn redact_if_secret_preserves_plain_values() {
        assert_eq!(redact_if_secret("password", "hunter2"), REDACTED);
        assert_eq!(redact_if_secret("PORT", "8080"), "8080");
    }

    proptest::proptest! {
        #[test]
        fn lowercase_digit_keys_are_never_redacted(key in "[a-j0-9_]{1,12}", value in ".*") {
            let mut context = ContextMap::new();
            context.insert(key.clone(), json!(value.clone()));
            redact_context(&mut context);
            proptest::prop_assert_eq!(context.get(&key), Some(&json!(value)));
        }

        #[test]
        fn secret_suffix_always_redacts(
            prefix in "[a-z]{0,8}",
            suffix in "(_api_key|_token|-secret|\\.PASSWORD|_Credentials)",
        ) {
            let key = format!("{prefix}{suffix}");
            proptest::prop_assert!(is_secret_key(&key));
        }
    }
}
