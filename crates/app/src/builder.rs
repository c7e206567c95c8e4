//! Output builders: how a logger name maps to a backend instance.

use ctxlog_ports::Output;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Resolves the backend for a logger name.
pub trait OutputBuilder: Send + Sync {
    /// Backend serving the logger named `prefix`.
    fn output_for(&self, prefix: &str) -> Arc<dyn Output>;
}

/// One backend shared by every logger.
#[derive(Clone)]
pub struct SharedOutput {
    output: Arc<dyn Output>,
}

impl SharedOutput {
    /// Share `output` across all logger names.
    pub fn new(output: Arc<dyn Output>) -> Self {
        Self { output }
    }
}

impl fmt::Debug for SharedOutput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SharedOutput").finish_non_exhaustive()
    }
}

impl OutputBuilder for SharedOutput {
    fn output_for(&self, _prefix: &str) -> Arc<dyn Output> {
        Arc::clone(&self.output)
    }
}

type OutputFactory = Box<dyn Fn(&str) -> Arc<dyn Output> + Send + Sync>;

/// One backend per logger name, created on first use and cached for the
/// lifetime of the builder.
pub struct PerPrefixOutput {
    cache: DashMap<String, Arc<dyn Output>>,
    factory: OutputFactory,
}

impl PerPrefixOutput {
    /// Build backends with `factory`.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Output> + Send + Sync + 'static,
    {
        Self {
            cache: DashMap::new(),
            factory: Box::new(factory),
        }
    }

    /// Number of cached backends.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no backend was created yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl fmt::Debug for PerPrefixOutput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PerPrefixOutput")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl OutputBuilder for PerPrefixOutput {
    fn output_for(&self, prefix: &str) -> Arc<dyn Output> {
        if let Some(output) = self.cache.get(prefix) {
            return Arc::clone(output.value());
        }
        let output = self
            .cache
            .entry(prefix.to_string())
            .or_insert_with(|| (self.factory)(prefix));
        Arc::clone(output.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog_adapters::{DiscardSink, TextOutput};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn discard() -> Arc<dyn Output> {
        Arc::new(TextOutput::new(Arc::new(DiscardSink), Arc::new(DiscardSink)))
    }

    #[test]
    fn shared_output_returns_the_same_instance() {
        let builder = SharedOutput::new(discard());
        assert!(Arc::ptr_eq(&builder.output_for("a"), &builder.output_for("b")));
    }

    #[test]
    fn per_prefix_output_caches_by_name() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let builder = PerPrefixOutput::new(move |_prefix| {
            counter.fetch_add(1, Ordering::SeqCst);
            discard()
        });

        let first = builder.output_for("api");
        let again = builder.output_for("api");
        let other = builder.output_for("db");

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(created.load(Ordering::SeqCst), 2);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn concurrent_lookups_create_one_backend_per_name() -> Result<(), Box<dyn std::error::Error>> {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let builder = Arc::new(PerPrefixOutput::new(move |_prefix| {
            counter.fetch_add(1, Ordering::SeqCst);
            discard()
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let builder = Arc::clone(&builder);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let _ = builder.output_for("shared");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().map_err(|_| "lookup thread panicked")?;
        }

        assert_eq!(created.load(Ordering::SeqCst), 1);
        Ok(())
    }
}
