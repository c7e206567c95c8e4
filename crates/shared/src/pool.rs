//! Bounded pool of reusable byte buffers.
//!
//! Stream backends format each event into a pooled buffer and hand the whole
//! buffer to the sink in one write. A buffer is exclusively owned by its
//! [`PooledBuffer`] guard until the guard drops; buffers that grew beyond
//! the retention cap are discarded instead of being returned.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of idle buffers kept by a pool.
pub const DEFAULT_POOL_CAPACITY: usize = 200;
/// Default capacity of a freshly allocated buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;
/// Default largest buffer capacity that is returned to the pool.
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 1024;

/// Pool of byte buffers safe for concurrent borrow and return.
#[derive(Debug)]
pub struct BufferPool {
    idle: Mutex<Vec<Vec<u8>>>,
    max_idle: usize,
    initial_capacity: usize,
    max_retained_capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    discarded: AtomicU64,
}

/// Counters describing pool behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Borrows served by an idle buffer.
    pub hits: u64,
    /// Borrows that allocated a fresh buffer.
    pub misses: u64,
    /// Releases that dropped the buffer instead of pooling it.
    pub discarded: u64,
    /// Idle buffers currently held.
    pub idle: usize,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(
            DEFAULT_POOL_CAPACITY,
            DEFAULT_BUFFER_CAPACITY,
            DEFAULT_MAX_RETAINED_CAPACITY,
        )
    }
}

impl BufferPool {
    /// Create a pool keeping at most `max_idle` buffers, each allocated with
    /// `initial_capacity` and retained only while its capacity stays within
    /// `max_retained_capacity`.
    #[must_use]
    pub fn new(max_idle: usize, initial_capacity: usize, max_retained_capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            initial_capacity,
            max_retained_capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Borrow a cleared buffer.
    pub fn get(&self) -> PooledBuffer<'_> {
        let reused = self.idle.lock().pop();
        let buffer = if let Some(buffer) = reused {
            self.hits.fetch_add(1, Ordering::Relaxed);
            buffer
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Vec::with_capacity(self.initial_capacity)
        };
        PooledBuffer {
            pool: self,
            buffer: Some(buffer),
        }
    }

    /// Return a buffer to the pool. Returns `false` when the buffer was
    /// discarded because it outgrew the retention cap or the pool is full.
    pub fn put(&self, mut buffer: Vec<u8>) -> bool {
        if buffer.capacity() > self.max_retained_capacity {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        buffer.clear();
        let mut idle = self.idle.lock();
        if idle.len() >= self.max_idle {
            drop(idle);
            self.discarded.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        idle.push(buffer);
        true
    }

    /// Snapshot the pool counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            idle: self.idle.lock().len(),
        }
    }

    /// Largest capacity that is returned to the pool.
    pub const fn max_retained_capacity(&self) -> usize {
        self.max_retained_capacity
    }
}

/// Exclusively borrowed buffer; returns itself to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer<'pool> {
    pool: &'pool BufferPool,
    buffer: Option<Vec<u8>>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        self.buffer.as_ref().map_or(&EMPTY, |buffer| buffer)
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buffer.get_or_insert_with(Vec::new)
    }
}

static EMPTY: Vec<u8> = Vec::new();

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.put(buffer);
        }
    }
}
