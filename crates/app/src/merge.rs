//! Event context resolution.
//!
//! Precedence, lowest first:
//!
//! 1. the caller thread's operation context
//! 2. the error's context (its cause chain flattened outer-first, outer
//!    values kept) for structured errors
//! 3. explicit key/value pairs passed to a `*w` call
//!
//! Secret-looking keys are redacted last, so no backend ever sees them.

use ctxlog_shared::{ContextMap, ContextValue, Error, fill_missing, ops, redact_context};

/// Flatten the context of every structured error in the chain. Outer errors
/// win; inner errors only fill keys the outer ones did not set.
#[must_use]
pub fn error_context(error: &Error) -> ContextMap {
    let mut context = ContextMap::new();
    for link in error.chain() {
        if let Some(values) = link.context() {
            fill_missing(&mut context, values);
        }
    }
    context
}

/// Resolve the context of one log event.
#[must_use]
pub fn event_context(error: Option<&Error>, fields: &[(&str, ContextValue)]) -> ContextMap {
    let mut context = match error {
        Some(error) if error.is_structured() => {
            let mut context = error_context(error);
            fill_missing(&mut context, &ops::snapshot());
            context
        },
        Some(_) | None => ops::snapshot(),
    };
    for (key, value) in fields {
        context.insert((*key).to_string(), value.clone());
    }
    redact_context(&mut context);
    context
}

/// Context handed to reporters: the event context plus process globals.
#[must_use]
pub fn report_context(event: &ContextMap) -> ContextMap {
    let mut context = event.clone();
    fill_missing(&mut context, &ops::globals());
    redact_context(&mut context);
    context
}
