//! Service registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::traits::ResolverCore;

/// Type-erased shared value as stored by the registry.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased constructor; receives the requesting container as its resolver.
pub(crate) type Ctor = Arc<dyn Fn(&dyn ResolverCore) -> DiResult<AnyArc> + Send + Sync>;

/// A single resolvable unit.
pub(crate) enum Registration {
    /// Already-constructed value, handed back on every resolution
    Instance(AnyArc),
    /// Constructor plus lifetime policy and cache cell
    Factory(FactoryRegistration),
}

impl Registration {
    pub(crate) fn instance(value: AnyArc) -> Self {
        Registration::Instance(value)
    }

    pub(crate) fn factory(lifetime: Lifetime, ctor: Ctor) -> Self {
        Registration::Factory(FactoryRegistration::new(lifetime, ctor))
    }

    /// Produces the registered value, constructing it against `resolver` when needed.
    pub(crate) fn resolve(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        match self {
            Registration::Instance(value) => Ok(value.clone()),
            Registration::Factory(factory) => factory.resolve(resolver),
        }
    }

    pub(crate) fn lifetime(&self) -> Option<Lifetime> {
        match self {
            Registration::Instance(_) => None,
            Registration::Factory(factory) => Some(factory.lifetime),
        }
    }
}

pub(crate) struct FactoryRegistration {
    lifetime: Lifetime,
    ctor: Ctor,
    /// Empty until the first successful construction of a cached lifetime.
    cache: OnceCell<AnyArc>,
}

impl FactoryRegistration {
    fn new(lifetime: Lifetime, ctor: Ctor) -> Self {
        Self {
            lifetime,
            ctor,
            cache: OnceCell::new(),
        }
    }

    fn resolve(&self, resolver: &dyn ResolverCore) -> DiResult<AnyArc> {
        if !self.lifetime.is_cached() {
            return (self.ctor)(resolver);
        }

        // Fast path once populated; otherwise the cell's lock is held across
        // construction so concurrent first resolutions build exactly once.
        if let Some(value) = self.cache.get() {
            return Ok(value.clone());
        }
        self.cache.get_or_try_init(|| (self.ctor)(resolver)).cloned()
    }

    /// Private copy for a child scope: same constructor, Singleton, empty cache.
    fn scoped_copy(&self) -> Self {
        Self::new(Lifetime::Singleton, self.ctor.clone())
    }
}

/// Ordered registration set with a key index.
///
/// Registration order is preserved so predicate scans are deterministic.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<(Key, Registration)>,
    index: HashMap<Key, usize>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a registration; callers check for conflicts first.
    pub(crate) fn insert(&mut self, key: Key, registration: Registration) {
        debug_assert!(!self.index.contains_key(&key), "duplicate key {}", key);
        self.index.insert(key, self.entries.len());
        self.entries.push((key, registration));
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&Registration> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    #[inline(always)]
    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &Registration)> {
        self.entries.iter().map(|(key, registration)| (key, registration))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registry for a child container: copies of the Scoped factories only.
    pub(crate) fn scoped_copies(&self) -> Registry {
        let mut child = Registry::new();
        for (key, registration) in &self.entries {
            if let Registration::Factory(factory) = registration {
                if factory.lifetime == Lifetime::Scoped {
                    child.insert(*key, Registration::Factory(factory.scoped_copy()));
                }
            }
        }
        child
    }
}
