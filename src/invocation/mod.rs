//! Generic invocation protocol.
//!
//! Any `Fn(A1, .., An) -> R` with up to eight parameters is [`Injectable`]:
//! its parameter types are resolved one by one from a [`ResolverCore`], the
//! function is called once with the resolved arguments, and the caller decodes
//! the output against the shape its [`Signature`] declares.
//!
//! ```
//! use ferrous_wire::{ContainerBuilder, Lifetime};
//! use std::sync::Arc;
//!
//! struct Database { url: String }
//! struct Repository { db: Arc<Database> }
//!
//! let mut builder = ContainerBuilder::new();
//! builder.register_instance(Arc::new(Database { url: "postgres://localhost".into() })).unwrap();
//! builder
//!     .register_factory(|db: Arc<Database>| Arc::new(Repository { db }), Lifetime::Transient)
//!     .unwrap();
//!
//! let container = builder.build();
//! let url = container
//!     .resolve_with_result(|repo: Arc<Repository>| repo.db.url.clone())
//!     .unwrap();
//! assert_eq!(url, "postgres://localhost");
//! ```

pub mod signature;

pub use signature::{
    declared_fallible_returns, declared_returns, error_key, is_fallible_output, Signature,
};

use crate::error::DiResult;
use crate::key::{key_of_type, Key};
use crate::traits::resolver::downcast_value;
use crate::traits::ResolverCore;

/// A callable whose parameters can be supplied by a resolver.
///
/// `Args` is the tuple of parameter types; it only exists to keep the
/// per-arity implementations apart and is inferred at the call site.
pub trait Injectable<Args> {
    /// The callable's declared output.
    type Output: 'static;

    /// Keys of the declared parameters, in order.
    fn parameters() -> Vec<Key>;

    /// Resolves every parameter, then calls the function once.
    ///
    /// The first parameter that fails to resolve aborts the invocation before
    /// the function runs.
    fn invoke(&self, resolver: &dyn ResolverCore) -> DiResult<Self::Output>;
}

/// Signature of a plain callable: outputs decode as `()`, `(error)` or `(T)`.
pub fn signature_of<Args, F>() -> Signature
where
    F: Injectable<Args>,
{
    Signature::new(F::parameters(), declared_returns::<F::Output>())
}

/// Signature of a callable returning `DiResult<T>`: decodes as `(T, error)`.
pub fn fallible_signature_of<Args, F, T>() -> Signature
where
    F: Injectable<Args, Output = DiResult<T>>,
    T: 'static,
{
    Signature::new(F::parameters(), declared_fallible_returns::<T>())
}

/// Resolves one argument of type `T`.
#[inline]
pub(crate) fn resolve_argument<T>(resolver: &dyn ResolverCore) -> DiResult<T>
where
    T: Clone + Send + Sync + 'static,
{
    let any = resolver.resolve_type(&key_of_type::<T>())?;
    downcast_value::<T>(&any)
}

macro_rules! impl_injectable {
    ($($param:ident),*) => {
        impl<Func, Out, $($param,)*> Injectable<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out,
            Out: 'static,
            $($param: Clone + Send + Sync + 'static,)*
        {
            type Output = Out;

            fn parameters() -> Vec<Key> {
                vec![$(key_of_type::<$param>()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn invoke(&self, resolver: &dyn ResolverCore) -> DiResult<Out> {
                $(let $param = resolve_argument::<$param>(resolver)?;)*
                Ok((self)($($param),*))
            }
        }
    };
}

impl_injectable!();
impl_injectable!(A1);
impl_injectable!(A1, A2);
impl_injectable!(A1, A2, A3);
impl_injectable!(A1, A2, A3, A4);
impl_injectable!(A1, A2, A3, A4, A5);
impl_injectable!(A1, A2, A3, A4, A5, A6);
impl_injectable!(A1, A2, A3, A4, A5, A6, A7);
impl_injectable!(A1, A2, A3, A4, A5, A6, A7, A8);
