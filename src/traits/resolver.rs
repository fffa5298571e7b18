//! Resolver traits for service resolution.

use crate::error::{DiError, DiResult};
use crate::key::{key_of_type, Key};
use crate::registration::AnyArc;

/// Core resolver trait for object-safe service resolution.
///
/// This is the seam the invocation protocol binds parameters through: every
/// constructor and invoked function receives the requesting container as a
/// `&dyn ResolverCore`.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed helpers built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves the value registered for `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The resolved value wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Resolution error (unresolved, circular, propagated, ...)
    fn resolve_type(&self, key: &Key) -> DiResult<AnyArc>;
}

/// Typed resolution helpers.
///
/// Implemented for every [`ResolverCore`], including
/// [`Container`](crate::Container) and `dyn ResolverCore`.
///
/// # Examples
///
/// ```
/// use ferrous_wire::{ContainerBuilder, Resolver};
/// use std::sync::Arc;
///
/// let mut builder = ContainerBuilder::new();
/// builder.register_instance(Arc::new("configuration".to_string())).unwrap();
///
/// let container = builder.build();
/// let config = container.get::<Arc<String>>().unwrap();
/// assert_eq!(config.as_str(), "configuration");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a service type, returning a clone of the registered value.
    fn get<T>(&self) -> DiResult<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let any = self.resolve_type(&key_of_type::<T>())?;
        downcast_value::<T>(&any)
    }

    /// Resolves a service type, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the service cannot be resolved.
    fn get_required<T>(&self) -> T
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.get::<T>() {
            Ok(value) => value,
            Err(err) => panic!("failed to resolve {}: {}", std::any::type_name::<T>(), err),
        }
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

/// Clones the `T` stored behind a type-erased value.
pub(crate) fn downcast_value<T>(any: &AnyArc) -> DiResult<T>
where
    T: Clone + 'static,
{
    any.downcast_ref::<T>()
        .cloned()
        .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))
}
