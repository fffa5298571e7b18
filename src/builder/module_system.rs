//! Module system for grouped registration.
//!
//! A module performs a batch of registrations against the builder it is
//! handed. Registrations a module applied before returning an error are kept:
//! module registration is not atomic.

use crate::{ContainerBuilder, DiResult};

/// A module that can register services with a [`ContainerBuilder`].
///
/// Closures taking `&mut ContainerBuilder` are modules too.
///
/// # Example
///
/// ```rust
/// use ferrous_wire::{ContainerBuilder, DiResult, Lifetime, Module, Resolver};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct UserConfig;
///
/// struct UserService {
///     config: Arc<UserConfig>,
/// }
///
/// struct UserModule;
///
/// impl Module for UserModule {
///     fn register(self, registrar: &mut ContainerBuilder) -> DiResult<()> {
///         registrar.register_instance(Arc::new(UserConfig::default()))?;
///         registrar.register_factory(
///             |config: Arc<UserConfig>| Arc::new(UserService { config }),
///             Lifetime::Scoped,
///         )?;
///         Ok(())
///     }
/// }
///
/// # fn main() -> DiResult<()> {
/// let mut builder = ContainerBuilder::new();
/// builder.register_module(UserModule)?;
/// let container = builder.build();
/// let _service = container.new_child().get::<Arc<UserService>>()?;
/// # Ok(())
/// # }
/// ```
pub trait Module {
    /// Register this module's services with the builder.
    fn register(self, registrar: &mut ContainerBuilder) -> DiResult<()>;
}

impl<F> Module for F
where
    F: FnOnce(&mut ContainerBuilder) -> DiResult<()>,
{
    fn register(self, registrar: &mut ContainerBuilder) -> DiResult<()> {
        self(registrar)
    }
}

/// Extension trait providing consuming, chainable module registration.
pub trait ContainerBuilderExt {
    /// Add a module using extension method syntax.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ferrous_wire::{ContainerBuilder, ContainerBuilderExt, DiResult, Module};
    ///
    /// struct DatabaseModule;
    /// impl Module for DatabaseModule {
    ///     fn register(self, _: &mut ContainerBuilder) -> DiResult<()> { Ok(()) }
    /// }
    ///
    /// # fn main() -> DiResult<()> {
    /// let container = ContainerBuilder::new()
    ///     .with_module(DatabaseModule)?
    ///     .with_module(|r: &mut ContainerBuilder| -> DiResult<()> {
    ///         r.register_instance(8080u16)?;
    ///         Ok(())
    ///     })?
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    fn with_module<M: Module>(self, module: M) -> DiResult<Self>
    where
        Self: Sized;
}

impl ContainerBuilderExt for ContainerBuilder {
    fn with_module<M: Module>(mut self, module: M) -> DiResult<Self> {
        self.register_module(module)?;
        Ok(self)
    }
}
