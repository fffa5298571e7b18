//! Service lifetime definitions.

/// Lifetimes controlling how factory results are cached
///
/// Instance registrations ignore the lifetime: they always hand back the
/// value they were given.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{ContainerBuilder, Lifetime, Resolver};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct RequestId(usize);
///
/// let next = Arc::new(AtomicUsize::new(0));
/// let mut builder = ContainerBuilder::new();
/// builder
///     .register_factory(
///         move || Arc::new(RequestId(next.fetch_add(1, Ordering::SeqCst))),
///         Lifetime::Scoped,
///     )
///     .unwrap();
///
/// let root = builder.build();
/// let request_a = root.new_child();
/// let request_b = root.new_child();
///
/// // Same within a scope, different across scopes
/// let a1 = request_a.get::<Arc<RequestId>>().unwrap();
/// let a2 = request_a.get::<Arc<RequestId>>().unwrap();
/// let b = request_b.get::<Arc<RequestId>>().unwrap();
/// assert!(Arc::ptr_eq(&a1, &a2));
/// assert!(!Arc::ptr_eq(&a1, &b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// New instance per resolution, never cached
    Transient,
    /// Constructed once in the container that owns the registration
    ///
    /// The cached value is visible to every descendant container that looks
    /// the type up through that owner.
    Singleton,
    /// Constructed once per container scope
    ///
    /// The owning container caches its own instance like a singleton. Every
    /// child created with [`Container::new_child`](crate::Container::new_child)
    /// receives a private copy of the registration, re-tagged as
    /// [`Lifetime::Singleton`] with an empty cache.
    Scoped,
}

impl Lifetime {
    /// True for lifetimes that populate the cache cell.
    pub fn is_cached(self) -> bool {
        !matches!(self, Lifetime::Transient)
    }
}
