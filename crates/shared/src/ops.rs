//! Operation context: hierarchical, named scopes carrying key/value data.
//!
//! Every thread owns a stack of operations. [`begin`] pushes a named frame and
//! returns a guard; dropping the guard pops the frame. Log events and errors
//! created while frames are active pick up a [`snapshot`] of the stack:
//!
//! - `op` is the innermost operation name
//! - `root_op` is the outermost operation name
//! - values set on inner frames shadow values from outer frames
//!
//! Process-wide values registered with [`set_global`] are kept apart and only
//! appear through [`globals`].

use crate::context::{ContextMap, ContextValue};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Context key holding the innermost operation name.
pub const KEY_OP: &str = "op";
/// Context key holding the outermost operation name.
pub const KEY_ROOT_OP: &str = "root_op";

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);
static GLOBALS: LazyLock<RwLock<ContextMap>> = LazyLock::new(|| RwLock::new(ContextMap::new()));

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug)]
struct Frame {
    id: u64,
    name: String,
    values: ContextMap,
}

/// Guard for an active operation. The frame is popped when the guard drops.
///
/// Guards are bound to the thread that created them.
#[derive(Debug)]
#[must_use = "the operation ends as soon as the guard is dropped"]
pub struct Op {
    id: u64,
    _thread_bound: PhantomData<*const ()>,
}

/// Begin a named operation on the current thread.
pub fn begin(name: impl Into<String>) -> Op {
    let id = NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed);
    FRAMES.with(|frames| {
        frames.borrow_mut().push(Frame {
            id,
            name: name.into(),
            values: ContextMap::new(),
        });
    });
    Op {
        id,
        _thread_bound: PhantomData,
    }
}

impl Op {
    /// Attach a value to this operation.
    pub fn set(&self, key: impl Into<String>, value: impl Into<ContextValue>) -> &Self {
        let key = key.into();
        let value = value.into();
        FRAMES.with(|frames| {
            if let Some(frame) = frames
                .borrow_mut()
                .iter_mut()
                .rev()
                .find(|frame| frame.id == self.id)
            {
                frame.values.insert(key, value);
            }
        });
        self
    }

    /// Name of this operation, if its frame is still active.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        FRAMES.with(|frames| {
            frames
                .borrow()
                .iter()
                .find(|frame| frame.id == self.id)
                .map(|frame| frame.name.clone())
        })
    }
}

impl Drop for Op {
    fn drop(&mut self) {
        let id = self.id;
        // try_with: the thread-local may already be gone during thread teardown.
        let _ = FRAMES.try_with(|frames| {
            let mut frames = frames.borrow_mut();
            if let Some(index) = frames.iter().rposition(|frame| frame.id == id) {
                frames.remove(index);
            }
        });
    }
}

/// Snapshot the current thread's operation context.
///
/// Returns an empty map when no operation is active.
#[must_use]
pub fn snapshot() -> ContextMap {
    FRAMES.with(|frames| {
        let frames = frames.borrow();
        let mut values = ContextMap::new();
        for frame in frames.iter() {
            for (key, value) in &frame.values {
                values.insert(key.clone(), value.clone());
            }
        }
        if let Some(innermost) = frames.last() {
            values.insert(KEY_OP.to_string(), ContextValue::from(innermost.name.clone()));
        }
        if let Some(outermost) = frames.first() {
            values.insert(
                KEY_ROOT_OP.to_string(),
                ContextValue::from(outermost.name.clone()),
            );
        }
        values
    })
}

/// Register a process-wide value.
pub fn set_global(key: impl Into<String>, value: impl Into<ContextValue>) {
    GLOBALS.write().insert(key.into(), value.into());
}

/// Remove a process-wide value.
pub fn clear_global(key: &str) {
    GLOBALS.write().remove(key);
}

/// Copy of the process-wide values.
#[must_use]
pub fn globals() -> ContextMap {
    GLOBALS.read().clone()
}
