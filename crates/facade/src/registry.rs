//! Process-wide backend and hook configuration.
//!
//! Loggers hold no backend. Every call loads the current settings, so a
//! reconfiguration is observed by all existing loggers on their next call.

use arc_swap::ArcSwap;
use ctxlog_adapters::{
    JsonOutput, StderrSink, StdoutSink, TextOutput, TracingOutput, WriterSink,
};
use ctxlog_app::{Hooks, OutputBuilder, PerPrefixOutput, SharedOutput, exit_on_fatal};
use ctxlog_ports::{LogSink, Output, Severity};
use ctxlog_shared::{ContextMap, Error};
use std::io::Write;
use std::sync::{Arc, LazyLock};

#[derive(Clone)]
pub(crate) struct Settings {
    pub(crate) builder: Arc<dyn OutputBuilder>,
    pub(crate) hooks: Hooks,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            builder: text_builder(Arc::new(StderrSink), Arc::new(StdoutSink)),
            hooks: Hooks::default(),
        }
    }
}

static SETTINGS: LazyLock<ArcSwap<Settings>> =
    LazyLock::new(|| ArcSwap::from_pointee(Settings::default()));

pub(crate) fn current() -> Arc<Settings> {
    SETTINGS.load_full()
}

fn text_builder(error_sink: Arc<dyn LogSink>, debug_sink: Arc<dyn LogSink>) -> Arc<dyn OutputBuilder> {
    let output: Arc<dyn Output> = Arc::new(TextOutput::new(error_sink, debug_sink));
    Arc::new(SharedOutput::new(output))
}

fn update_hooks(change: impl Fn(Hooks) -> Hooks) {
    SETTINGS.rcu(|current| Settings {
        builder: Arc::clone(&current.builder),
        hooks: change(current.hooks.clone()),
    });
}

/// Use the text backend over the given sinks. ERROR and FATAL go to
/// `error_sink`, everything else to `debug_sink`.
pub fn set_outputs(error_sink: Arc<dyn LogSink>, debug_sink: Arc<dyn LogSink>) {
    set_output(text_builder(error_sink, debug_sink));
}

/// Use the text backend over two writers. Each writer is guarded by its own
/// mutex.
pub fn set_writers<E, D>(error: E, debug: D)
where
    E: Write + Send + 'static,
    D: Write + Send + 'static,
{
    set_outputs(
        Arc::new(WriterSink::new(error)),
        Arc::new(WriterSink::new(debug)),
    );
}

/// Restore the text backend over stderr (errors) and stdout (everything else).
pub fn reset_outputs() {
    set_outputs(Arc::new(StderrSink), Arc::new(StdoutSink));
}

/// Use the JSON-lines backend over the given sinks.
pub fn use_json_output(error_sink: Arc<dyn LogSink>, debug_sink: Arc<dyn LogSink>) {
    let output: Arc<dyn Output> = Arc::new(JsonOutput::new(error_sink, debug_sink));
    set_output(Arc::new(SharedOutput::new(output)));
}

/// Forward events to `tracing`, one adapter per logger name.
pub fn use_tracing_output() {
    set_output(Arc::new(PerPrefixOutput::new(|prefix| {
        Arc::new(TracingOutput::new(prefix)) as Arc<dyn Output>
    })));
}

/// Install a custom output builder.
pub fn set_output(builder: Arc<dyn OutputBuilder>) {
    let _previous = swap_output(builder);
}

/// Install a custom output builder and return the one it replaces.
pub fn swap_output(builder: Arc<dyn OutputBuilder>) -> Arc<dyn OutputBuilder> {
    let previous = SETTINGS.rcu(|current| Settings {
        builder: Arc::clone(&builder),
        hooks: current.hooks.clone(),
    });
    Arc::clone(&previous.builder)
}

/// Call `handler` after every FATAL event instead of exiting.
pub fn on_fatal<F>(handler: F)
where
    F: Fn(&Error) + Send + Sync + 'static,
{
    let handler: Arc<dyn Fn(&Error) + Send + Sync> = Arc::new(handler);
    update_hooks(|hooks| hooks.with_on_fatal(Arc::clone(&handler)));
}

/// Restore the default fatal handler, which exits with status 1.
pub fn default_on_fatal() {
    update_hooks(|hooks| hooks.with_on_fatal(exit_on_fatal()));
}

/// Call `reporter` synchronously for every ERROR and FATAL event. Replaces
/// any previously registered reporter.
pub fn register_reporter<F>(reporter: F)
where
    F: Fn(&Error, Severity, &ContextMap) + Send + Sync + 'static,
{
    let reporter: Arc<dyn Fn(&Error, Severity, &ContextMap) + Send + Sync> = Arc::new(reporter);
    update_hooks(|hooks| hooks.with_reporter(Some(Arc::clone(&reporter))));
}

/// Remove the registered reporter.
pub fn clear_reporter() {
    update_hooks(|hooks| hooks.with_reporter(None));
}
