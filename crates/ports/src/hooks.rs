//! Observer and fatal-handler callback types.

use crate::severity::Severity;
use ctxlog_shared::{ContextMap, Error};
use std::sync::Arc;

/// Invoked after a FATAL event has been written and flushed.
///
/// The default handler terminates the process with status 1. Test handlers
/// typically record the error and return.
pub type FatalHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// Invoked synchronously for every ERROR and FATAL event with the error, its
/// severity and the event's context.
pub type Reporter = Arc<dyn Fn(&Error, Severity, &ContextMap) + Send + Sync>;
