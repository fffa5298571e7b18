//! The container: resolver of record.
//!
//! A [`Container`] holds a frozen registration set and an optional link to a
//! parent container. Lookups consult the container itself, then its own
//! registrations, then the parent chain.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::AggregateError;
use crate::internal::ResolutionGuard;
use crate::invocation::signature::decode_scope_output;
use crate::invocation::{fallible_signature_of, is_fallible_output, signature_of, Injectable};
use crate::observer::Observers;
use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::ResolverCore;
use crate::{DiError, DiResult, Key};

pub mod scope;

/// Resolver of record for a frozen set of registrations.
///
/// `Container` is a cheap handle (`Arc` inside); clones refer to the same
/// container. Requesting the `Container` type itself as a dependency yields
/// the container performing the resolution.
///
/// # Thread Safety
///
/// Containers are `Send + Sync`. Singleton and scoped caches are single
/// assignment cells: concurrent first resolutions construct the value once and
/// every caller observes the same result.
///
/// # Examples
///
/// ```
/// use ferrous_wire::{Container, ContainerBuilder, DiResult, Lifetime};
/// use std::sync::Arc;
///
/// struct Greeter { greeting: String }
///
/// let mut builder = ContainerBuilder::new();
/// builder.register_instance(Arc::new(Greeter { greeting: "hello".into() })).unwrap();
/// let container = builder.build();
///
/// container
///     .resolve(|greeter: Arc<Greeter>, current: Container| -> DiResult<()> {
///         assert_eq!(greeter.greeting, "hello");
///         assert_eq!(current.registered_keys().len(), 1);
///         Ok(())
///     })
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    registry: Registry,
    parent: Option<Arc<ContainerInner>>,
    observers: Arc<Observers>,
}

impl Container {
    pub(crate) fn from_parts(
        registry: Registry,
        parent: Option<Arc<ContainerInner>>,
        observers: Arc<Observers>,
    ) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registry,
                parent,
                observers,
            }),
        }
    }

    /// True when both handles refer to the same container.
    pub fn ptr_eq(a: &Container, b: &Container) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Target types registered directly in this container, in registration order.
    pub fn registered_keys(&self) -> Vec<Key> {
        self.inner.registry.keys().copied().collect()
    }

    // ----- Invocation -----

    /// Invokes `func` with its parameters resolved from this container.
    ///
    /// `func` must return `()` or `DiResult<()>`; any other output is rejected
    /// with [`DiError::InvalidInvocationSignature`] before anything is resolved.
    /// An error returned by `func` is handed back unchanged.
    ///
    /// ```
    /// use ferrous_wire::{ContainerBuilder, DiError, DiResult};
    ///
    /// let container = ContainerBuilder::new().build();
    /// let err = container
    ///     .resolve(|| -> DiResult<()> { Err(DiError::custom("stop")) })
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "stop");
    ///
    /// let invalid = container.resolve(|| 42u8).unwrap_err();
    /// assert!(matches!(invalid, DiError::InvalidInvocationSignature(_)));
    /// ```
    pub fn resolve<Args, F>(&self, func: F) -> DiResult<()>
    where
        F: Injectable<Args>,
    {
        signature_of::<Args, F>().validate_scope()?;
        let output = <F as Injectable<Args>>::invoke(&func, self)?;
        decode_scope_output(output)
    }

    /// Invokes `func` and returns its value, the `(T)` shape.
    ///
    /// `func` must return a value that is neither `()` nor an error. A `func`
    /// returning `DiResult<T>` is rejected without being called; use
    /// [`try_resolve_with_result`](Self::try_resolve_with_result) for it.
    pub fn resolve_with_result<Args, F>(&self, func: F) -> DiResult<F::Output>
    where
        F: Injectable<Args>,
    {
        if is_fallible_output::<F::Output>() {
            return Err(DiError::InvalidInvocationSignature(
                "func returns a DiResult, call it with try_resolve_with_result",
            ));
        }
        signature_of::<Args, F>().validate_with_result()?;
        <F as Injectable<Args>>::invoke(&func, self)
    }

    /// Invokes `func` returning `DiResult<T>`, the `(T, error)` shape.
    ///
    /// Whatever `func` returns, value or error, reaches the caller unchanged.
    ///
    /// ```
    /// use ferrous_wire::{ContainerBuilder, DiResult};
    ///
    /// let mut builder = ContainerBuilder::new();
    /// builder.register_instance(20u32).unwrap();
    /// let container = builder.build();
    ///
    /// let doubled = container
    ///     .try_resolve_with_result(|n: u32| -> DiResult<u32> { Ok(n * 2) })
    ///     .unwrap();
    /// assert_eq!(doubled, 40);
    /// ```
    pub fn try_resolve_with_result<Args, F, T>(&self, func: F) -> DiResult<T>
    where
        F: Injectable<Args, Output = DiResult<T>>,
        T: 'static,
    {
        fallible_signature_of::<Args, F, T>().validate_with_result()?;
        <F as Injectable<Args>>::invoke(&func, self)?
    }

    // ----- Predicate resolution -----

    /// Resolves the first registration whose key satisfies `predicate`.
    ///
    /// Own registrations are scanned in registration order before the parent
    /// chain is consulted.
    ///
    /// ```
    /// use ferrous_wire::ContainerBuilder;
    /// use std::sync::Arc;
    ///
    /// struct PostgresRepository;
    ///
    /// let mut builder = ContainerBuilder::new();
    /// builder.register_instance(Arc::new(PostgresRepository)).unwrap();
    /// let container = builder.build();
    ///
    /// let found = container
    ///     .resolve_matching_type(|key| key.type_name().ends_with("Repository>"))
    ///     .unwrap();
    /// assert!(found.downcast::<Arc<PostgresRepository>>().is_some());
    /// ```
    pub fn resolve_matching_type<P>(&self, predicate: P) -> DiResult<Resolved>
    where
        P: Fn(&Key) -> bool,
    {
        for node in self.lineage() {
            let matched = node.inner.registry.iter().find(|(key, _)| predicate(*key));
            if let Some((key, registration)) = matched {
                let value = self.resolve_registration(key, registration)?;
                return Ok(Resolved::new(*key, value));
            }
        }
        Err(DiError::Unresolved("type matching predicate"))
    }

    /// Resolves every registration in this container and its ancestors whose
    /// key satisfies `predicate`.
    ///
    /// A key registered closer to this container shadows the same key further
    /// up the chain. Per-match failures do not stop the scan; if any occur they
    /// are returned together as [`DiError::Aggregate`]. Fails with
    /// [`DiError::Unresolved`] when nothing matches.
    pub fn resolve_matching_types<P>(&self, predicate: P) -> DiResult<Vec<Resolved>>
    where
        P: Fn(&Key) -> bool,
    {
        let mut seen = HashSet::new();
        let mut services = Vec::new();
        let mut failures = AggregateError::default();

        for node in self.lineage() {
            for (key, registration) in node.inner.registry.iter() {
                if !predicate(key) || !seen.insert(*key) {
                    continue;
                }
                match self.resolve_registration(key, registration) {
                    Ok(value) => services.push(Resolved::new(*key, value)),
                    Err(err) => failures.push(err),
                }
            }
        }

        if !failures.is_empty() {
            return Err(DiError::Aggregate(failures));
        }
        if services.is_empty() {
            return Err(DiError::Unresolved("type matching predicate"));
        }
        Ok(services)
    }

    // ----- Internals -----

    /// Resolves a registration found anywhere in the chain, using this
    /// container as the resolver for its constructor.
    fn resolve_registration(&self, key: &Key, registration: &Registration) -> DiResult<AnyArc> {
        let _guard = ResolutionGuard::enter(key)?;
        tracing::trace!(
            service = key.type_name(),
            lifetime = ?registration.lifetime(),
            "resolving registration"
        );

        let observers = &self.inner.observers;
        if !observers.has_observers() {
            return registration.resolve(self);
        }

        observers.resolving(key);
        let started = Instant::now();
        let result = registration.resolve(self);
        match &result {
            Ok(_) => observers.resolved(key, started.elapsed()),
            Err(err) => observers.resolution_failed(key, err),
        }
        result
    }
}

impl ResolverCore for Container {
    fn resolve_type(&self, key: &Key) -> DiResult<AnyArc> {
        if key.is::<Container>() {
            return Ok(Arc::new(self.clone()));
        }

        for node in self.lineage() {
            if let Some(registration) = node.inner.registry.get(key) {
                return self.resolve_registration(key, registration);
            }
        }
        Err(DiError::Unresolved(key.type_name()))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.inner.registry.len())
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}

/// A value produced by predicate-based resolution, with the key it matched.
#[derive(Clone)]
pub struct Resolved {
    key: Key,
    value: AnyArc,
}

impl Resolved {
    fn new(key: Key, value: AnyArc) -> Self {
        Self { key, value }
    }

    /// The matched target-type key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The type-erased value.
    pub fn value(&self) -> &AnyArc {
        &self.value
    }

    /// Clones the value out as `T`, or `None` if it is not a `T`.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved").field("key", &self.key).finish_non_exhaustive()
    }
}
