//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::Key;

// Keys currently being resolved on this thread. Resolution is a synchronous
// depth-first chain, so the stack is empty between top-level calls.
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<Key>> = const { RefCell::new(Vec::new()) };
}

/// Marks a key as in-flight for the lifetime of the guard.
pub(crate) struct ResolutionGuard {
    key: Key,
}

impl ResolutionGuard {
    /// Pushes `key`, failing with [`DiError::Circular`] if it is already in flight.
    pub(crate) fn enter(key: &Key) -> DiResult<Self> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            if let Some(start) = stack.iter().position(|k| k == key) {
                let mut path: Vec<&'static str> =
                    stack[start..].iter().map(Key::type_name).collect();
                path.push(key.type_name());
                tracing::warn!(cycle = %path.join(" -> "), "circular dependency detected");
                return Err(DiError::Circular(path));
            }

            stack.push(*key);
            Ok(Self { key: *key })
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let popped = stack.borrow_mut().pop();
            debug_assert_eq!(popped, Some(self.key));
        });
    }
}
