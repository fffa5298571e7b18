//! Child containers and parent-chain traversal.
//!
//! A child container receives a private copy of each Scoped factory
//! registered directly in its parent. The copy is cached once per child, so
//! services resolved through the child (and its own children) share it while
//! sibling children stay isolated. Everything else is reached by delegating to
//! the parent.

use super::Container;

impl Container {
    /// Creates a child container linked to this one.
    ///
    /// # Lifetime Behavior
    ///
    /// - **Singleton**: resolved and cached in the container that registered it
    /// - **Scoped**: resolved and cached once per child
    /// - **Transient**: constructed on every resolution
    ///
    /// Constructors always resolve their dependencies against the container
    /// the request started from, wherever the registration itself lives.
    ///
    /// ```
    /// use ferrous_wire::{Container, ContainerBuilder, Lifetime, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Session;
    ///
    /// let mut builder = ContainerBuilder::new();
    /// builder.register_factory(|| Arc::new(Session), Lifetime::Scoped).unwrap();
    /// let root = builder.build();
    ///
    /// let child = root.new_child();
    /// let parent = child.parent().unwrap();
    /// assert!(Container::ptr_eq(&parent, &root));
    ///
    /// let first = child.get::<Arc<Session>>().unwrap();
    /// let second = child.get::<Arc<Session>>().unwrap();
    /// assert!(Arc::ptr_eq(&first, &second));
    /// ```
    pub fn new_child(&self) -> Container {
        let registry = self.inner.registry.scoped_copies();
        tracing::debug!(scoped = registry.len(), "creating child container");
        Container::from_parts(
            registry,
            Some(self.inner.clone()),
            self.inner.observers.clone(),
        )
    }

    /// The parent container, if any.
    ///
    /// A child keeps its ancestors alive, so a chain built with repeated
    /// `container = container.new_child()` still reaches the root.
    pub fn parent(&self) -> Option<Container> {
        self.inner.parent.clone().map(|inner| Container { inner })
    }

    /// This container followed by each ancestor, nearest first.
    pub(crate) fn lineage(&self) -> impl Iterator<Item = Container> {
        std::iter::successors(Some(self.clone()), Container::parent)
    }
}
