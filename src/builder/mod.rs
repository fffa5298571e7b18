//! Container builder: the registration side of the registry.
//!
//! A [`ContainerBuilder`] accumulates registrations, enforcing one registration
//! per target type, and freezes them into a root [`Container`].

use std::fmt;
use std::sync::Arc;

use crate::invocation::{
    fallible_signature_of, is_fallible_output, signature_of, Injectable, Signature,
};
use crate::observer::Observers;
use crate::registration::{AnyArc, Ctor, Registration, Registry};
use crate::traits::ResolverCore;
use crate::{key_of_type, Container, DiError, DiObserver, DiResult, Key, Lifetime};

pub mod module_system;
pub use module_system::*;

/// Append-only collection of registrations.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{ContainerBuilder, DiError, Lifetime, Resolver};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
/// struct Server { config: Arc<Config> }
///
/// let mut builder = ContainerBuilder::new();
/// builder.register_instance(Arc::new(Config { port: 8080 })).unwrap();
/// builder
///     .register_factory(|config: Arc<Config>| Arc::new(Server { config }), Lifetime::Singleton)
///     .unwrap();
///
/// // One registration per target type
/// let conflict = builder.register_instance(Arc::new(Config { port: 9090 }));
/// assert!(matches!(conflict, Err(DiError::RegistrationConflict(_))));
///
/// let container = builder.build();
/// assert_eq!(container.get::<Arc<Server>>().unwrap().config.port, 8080);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    registry: Registry,
    observers: Observers,
}

impl ContainerBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
        }
    }

    // ----- Registrations -----

    /// Registers an already-constructed value under its own type.
    ///
    /// Every resolution of `T` yields a clone of `value`; register an `Arc`
    /// to share one object.
    pub fn register_instance<T>(&mut self, value: T) -> DiResult<&mut Self>
    where
        T: Clone + Send + Sync + 'static,
    {
        let key = key_of_type::<T>();
        self.ensure_vacant(&key)?;
        self.registry.insert(key, Registration::instance(Arc::new(value) as AnyArc));
        Ok(self)
    }

    /// Registers a constructor returning `T`, the `(T)` shape.
    ///
    /// The constructor's parameters are resolved from the container that
    /// requests `T`. The target type is the constructor's return type.
    ///
    /// ```rust
    /// use ferrous_wire::{ContainerBuilder, DiError, Lifetime};
    ///
    /// let mut builder = ContainerBuilder::new();
    ///
    /// // A constructor that produces nothing is rejected up front
    /// let err = builder.register_factory(|| (), Lifetime::Transient).unwrap_err();
    /// assert!(matches!(err, DiError::InvalidFactorySignature(_)));
    /// ```
    ///
    /// A constructor returning `DiResult<T>` belongs to
    /// [`register_fallible_factory`](Self::register_fallible_factory) and is
    /// rejected here.
    pub fn register_factory<Args, F>(
        &mut self,
        factory: F,
        lifetime: Lifetime,
    ) -> DiResult<&mut Self>
    where
        F: Injectable<Args> + Send + Sync + 'static,
        F::Output: Send + Sync,
        Args: 'static,
    {
        if is_fallible_output::<F::Output>() {
            return Err(DiError::InvalidFactorySignature(
                "factory returns a DiResult, register it with register_fallible_factory",
            ));
        }
        let signature = signature_of::<Args, F>();
        let ctor: Ctor = Arc::new(move |resolver: &dyn ResolverCore| -> DiResult<AnyArc> {
            let value = <F as Injectable<Args>>::invoke(&factory, resolver)?;
            Ok(Arc::new(value) as AnyArc)
        });
        self.insert_factory(signature, lifetime, ctor)
    }

    /// Registers a constructor returning `DiResult<T>`, the `(T, error)` shape.
    ///
    /// Errors returned by the constructor reach the caller unchanged, and a
    /// failed construction never populates the cache.
    ///
    /// ```rust
    /// use ferrous_wire::{ContainerBuilder, DiError, DiResult, Lifetime, Resolver};
    /// use std::sync::Arc;
    ///
    /// #[derive(Debug)]
    /// struct Connection;
    ///
    /// let mut builder = ContainerBuilder::new();
    /// builder
    ///     .register_fallible_factory(
    ///         || -> DiResult<Arc<Connection>> { Err(DiError::custom("database offline")) },
    ///         Lifetime::Singleton,
    ///     )
    ///     .unwrap();
    ///
    /// let container = builder.build();
    /// let err = container.get::<Arc<Connection>>().unwrap_err();
    /// assert_eq!(err.to_string(), "database offline");
    /// ```
    pub fn register_fallible_factory<Args, F, T>(
        &mut self,
        factory: F,
        lifetime: Lifetime,
    ) -> DiResult<&mut Self>
    where
        F: Injectable<Args, Output = DiResult<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
        Args: 'static,
    {
        let signature = fallible_signature_of::<Args, F, T>();
        let ctor: Ctor = Arc::new(move |resolver: &dyn ResolverCore| -> DiResult<AnyArc> {
            let value = <F as Injectable<Args>>::invoke(&factory, resolver)??;
            Ok(Arc::new(value) as AnyArc)
        });
        self.insert_factory(signature, lifetime, ctor)
    }

    fn insert_factory(
        &mut self,
        signature: Signature,
        lifetime: Lifetime,
        ctor: Ctor,
    ) -> DiResult<&mut Self> {
        signature.validate_constructor()?;
        let key = signature
            .target()
            .ok_or(DiError::InvalidFactorySignature("factory does not return anything"))?;
        self.ensure_vacant(&key)?;
        self.registry.insert(key, Registration::factory(lifetime, ctor));
        Ok(self)
    }

    fn ensure_vacant(&self, key: &Key) -> DiResult<()> {
        // The container handle always resolves to the resolving container itself.
        if key.is::<Container>() || self.registry.contains_key(key) {
            return Err(DiError::RegistrationConflict(key.type_name()));
        }
        Ok(())
    }

    // ----- Queries -----

    /// Returns true if a registration exists for `key`.
    pub fn registration_exists(&self, key: &Key) -> bool {
        self.registry.contains_key(key)
    }

    /// Returns true if a registration exists for `T`.
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registration_exists(&key_of_type::<T>())
    }

    /// Number of registrations accumulated so far.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    // ----- Modules -----

    /// Invokes `module` once against this builder.
    ///
    /// An error aborts the module immediately; registrations it already
    /// applied are not rolled back.
    pub fn register_module<M: Module>(&mut self, module: M) -> DiResult<&mut Self> {
        module.register(self)?;
        Ok(self)
    }

    // ----- Observability -----

    /// Adds an observer notified around every resolution in the built
    /// container and its children.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Freezes the accumulated registrations into a root container.
    pub fn build(self) -> Container {
        tracing::debug!(registrations = self.registry.len(), "building root container");
        Container::from_parts(self.registry, None, Arc::new(self.observers))
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("registrations", &self.registry.len())
            .finish()
    }
}
