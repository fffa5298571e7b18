//! Diagnostic observers for resolution traceability.
//!
//! Observers are attached to a [`ContainerBuilder`](crate::ContainerBuilder)
//! and shared by the built container and every child derived from it.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;

/// Observer trait for resolution events.
///
/// Called synchronously around every registration lookup that reaches a
/// registration (instances included). Keep implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_wire::{ContainerBuilder, DiError, DiObserver, Key, Resolver};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     seen: Mutex<Vec<&'static str>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, key: &Key) {
///         self.seen.lock().unwrap().push(key.type_name());
///     }
///     fn resolved(&self, _key: &Key, _duration: Duration) {}
///     fn resolution_failed(&self, _key: &Key, _error: &DiError) {}
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut builder = ContainerBuilder::new();
/// builder.add_observer(recorder.clone());
/// builder.register_instance(5u32).unwrap();
///
/// let container = builder.build();
/// assert_eq!(container.get::<u32>().unwrap(), 5);
/// assert_eq!(*recorder.seen.lock().unwrap(), vec!["u32"]);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a registration is resolved.
    fn resolving(&self, key: &Key);

    /// Called after a registration resolved successfully.
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when resolving a registration failed.
    fn resolution_failed(&self, key: &Key, error: &DiError);
}

/// Container for registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(key, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolutions are emitted at `TRACE`/`DEBUG`, failures at `WARN`, all under
/// the `ferrous_wire` target.
///
/// ```
/// use ferrous_wire::{ContainerBuilder, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut builder = ContainerBuilder::new();
/// builder.add_observer(Arc::new(LoggingObserver::new()));
/// let container = builder.build();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl LoggingObserver {
    /// Creates a new logging observer.
    pub fn new() -> Self {
        Self
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        tracing::trace!(target: "ferrous_wire", service = key.type_name(), "resolving");
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::debug!(
            target: "ferrous_wire",
            service = key.type_name(),
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn resolution_failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(
            target: "ferrous_wire",
            service = key.type_name(),
            error = %error,
            "resolution failed"
        );
    }
}
