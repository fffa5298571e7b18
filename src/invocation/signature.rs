//! Declared-shape descriptors and the signature contract.
//!
//! A [`Signature`] lists the parameter keys and the declared return keys of a
//! callable. Return keys follow the four accepted shapes `()`, `(error)`,
//! `(T)` and `(T, error)`, where the error kind is [`DiError`]. Every shape
//! check runs before the callable is invoked.

use std::any::{Any, TypeId};

use crate::error::{DiError, DiResult};
use crate::key::{key_of_type, Key};

/// Key of the error kind.
#[inline(always)]
pub fn error_key() -> Key {
    key_of_type::<DiError>()
}

/// Parameter and return shape of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<Key>,
    pub returns: Vec<Key>,
}

impl Signature {
    pub fn new(parameters: Vec<Key>, returns: Vec<Key>) -> Self {
        Self { parameters, returns }
    }

    /// Target type of a constructor: its first declared return.
    pub fn target(&self) -> Option<Key> {
        self.returns.first().copied()
    }

    fn returns_error_at(&self, index: usize) -> bool {
        self.returns.get(index).map_or(false, |key| *key == error_key())
    }

    /// Constructor rule set: `(T)` or `(T, error)`.
    pub fn validate_constructor(&self) -> DiResult<()> {
        let reject = |reason| Err(DiError::InvalidFactorySignature(reason));
        match self.returns.len() {
            0 => reject("factory does not return anything"),
            1 if self.returns_error_at(0) => reject("factory only returns an error"),
            _ if self.returns_error_at(0) => {
                reject("the first value returned from a factory must not be an error")
            }
            2 if !self.returns_error_at(1) => {
                reject("if the factory returns two values, the second one must be an error")
            }
            2 | 1 => Ok(()),
            _ => reject("factory cannot return more than two values"),
        }
    }

    /// Scope-function rule set: `()` or `(error)`.
    pub fn validate_scope(&self) -> DiResult<()> {
        match self.returns.len() {
            0 => Ok(()),
            1 if self.returns_error_at(0) => Ok(()),
            _ => Err(DiError::InvalidInvocationSignature(
                "func must return either nothing or an error",
            )),
        }
    }

    /// Result-function rule set: `(T)` or `(T, error)`.
    pub fn validate_with_result(&self) -> DiResult<()> {
        let reject = |reason| Err(DiError::InvalidInvocationSignature(reason));
        match self.returns.len() {
            0 => reject("func must return something"),
            _ if self.returns_error_at(0) => {
                reject("the first value returned must not be an error")
            }
            1 => Ok(()),
            2 if self.returns_error_at(1) => Ok(()),
            2 => reject("if the func returns two values, the second one must be an error"),
            _ => reject("func cannot return more than two values"),
        }
    }
}

/// Declared return keys of a plain output type.
///
/// `()` declares nothing; `DiResult<()>` and a bare `DiError` declare the error
/// kind alone; anything else declares itself.
pub fn declared_returns<R: 'static>() -> Vec<Key> {
    let id = TypeId::of::<R>();
    if id == TypeId::of::<()>() {
        Vec::new()
    } else if id == TypeId::of::<DiResult<()>>() || id == TypeId::of::<DiError>() {
        vec![error_key()]
    } else {
        vec![key_of_type::<R>()]
    }
}

/// True when `R` is `DiResult<T>` for some `T` other than `()`.
///
/// Such outputs declare `(T, error)` but can only be decoded by the fallible
/// entry points, so the plain ones reject them before any call.
pub fn is_fallible_output<R: 'static>() -> bool {
    if TypeId::of::<R>() == TypeId::of::<DiResult<()>>() {
        return false;
    }
    let name = std::any::type_name::<R>();
    name.starts_with("core::result::Result<")
        && name
            .strip_suffix('>')
            .map_or(false, |rest| rest.ends_with(std::any::type_name::<DiError>()))
}

/// Declared return keys of a fallible `DiResult<T>` output.
pub fn declared_fallible_returns<T: 'static>() -> Vec<Key> {
    let mut returns = declared_returns::<T>();
    returns.push(error_key());
    returns
}

/// Decodes the output of a scope function already validated as `()` or `(error)`.
pub(crate) fn decode_scope_output<R: 'static>(output: R) -> DiResult<()> {
    let output: Box<dyn Any> = Box::new(output);
    let output = match output.downcast::<DiResult<()>>() {
        Ok(result) => return *result,
        Err(other) => other,
    };
    match output.downcast::<DiError>() {
        Ok(err) => Err(*err),
        Err(_) => Ok(()),
    }
}
