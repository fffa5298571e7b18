//! Error types for the service registry.

use std::fmt;
use std::sync::Arc;

/// Boxed user error carried by [`DiError::Propagated`].
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Registry and resolution errors
///
/// Represents every failure that can surface while registering services,
/// resolving them, or invoking functions through a [`Container`](crate::Container).
///
/// Errors returned by user constructors and invoked functions are never
/// rewritten: whatever `DiError` the user code returned is handed back as-is.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{ContainerBuilder, DiError, Resolver};
///
/// let container = ContainerBuilder::new().build();
/// match container.get::<String>() {
///     Err(DiError::Unresolved(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// A registration for the target type already exists in the same builder
    #[error("{0} has already been registered")]
    RegistrationConflict(&'static str),
    /// A constructor's declared return shape is not accepted
    #[error("invalid factory signature: {0}")]
    InvalidFactorySignature(&'static str),
    /// A function handed to `resolve*` has an unaccepted return shape
    #[error("invalid invocation signature: {0}")]
    InvalidInvocationSignature(&'static str),
    /// Nothing in the container chain satisfies the requested type
    #[error("no registration for {0}")]
    Unresolved(&'static str),
    /// Stored value could not be downcast to the requested type
    #[error("type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Circular dependency detected (includes path)
    #[error("circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<&'static str>),
    /// Failures collected by a fan-out resolution
    #[error(transparent)]
    Aggregate(AggregateError),
    /// Error produced by user code, passed through unchanged
    #[error(transparent)]
    Propagated(SharedError),
}

impl DiError {
    /// Wraps an arbitrary user error so constructors and invoked functions can
    /// return it.
    ///
    /// ```rust
    /// use ferrous_wire::DiError;
    ///
    /// let err = DiError::custom("database offline");
    /// assert_eq!(err.to_string(), "database offline");
    /// ```
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        DiError::Propagated(Arc::from(error.into()))
    }

    /// Returns the user error if this is a [`DiError::Propagated`].
    pub fn propagated(&self) -> Option<&SharedError> {
        match self {
            DiError::Propagated(inner) => Some(inner),
            _ => None,
        }
    }

    /// True when both values carry the very same propagated user error.
    pub fn is_same_propagated(&self, other: &DiError) -> bool {
        match (self.propagated(), other.propagated()) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Zero or more errors collected by a fan-out operation.
///
/// A single wrapped error renders as that error's message; several render as a
/// newline-joined list.
///
/// ```rust
/// use ferrous_wire::{AggregateError, DiError};
///
/// let errors = AggregateError::new(vec![
///     DiError::Unresolved("A"),
///     DiError::Unresolved("B"),
/// ]);
/// assert_eq!(errors.to_string(), "no registration for A\nno registration for B");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregateError {
    errors: Vec<DiError>,
}

impl AggregateError {
    pub fn new(errors: Vec<DiError>) -> Self {
        Self { errors }
    }

    pub fn push(&mut self, error: DiError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[DiError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_inner(self) -> Vec<DiError> {
        self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

/// Result type for registry operations
///
/// A convenience alias for `Result<T, DiError>`. Constructors registered with
/// [`register_fallible_factory`] and functions passed to
/// [`Container::resolve`](crate::Container::resolve) use it to report failures.
///
/// [`register_fallible_factory`]: crate::ContainerBuilder::register_fallible_factory
pub type DiResult<T> = Result<T, DiError>;
