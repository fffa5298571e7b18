//! Target-type keys for registration storage and lookup.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Key identifying the type a registration satisfies.
///
/// Keys compare and hash by [`TypeId`] only; the type name is carried for
/// diagnostics and for predicate-based lookups.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Key, key_of_type};
/// use std::sync::Arc;
///
/// let key = key_of_type::<Arc<String>>();
/// assert!(key.is::<Arc<String>>());
/// assert!(!key.is::<String>());
/// assert_eq!(key, Key::of::<Arc<String>>());
/// assert!(key.type_name().ends_with("Arc<alloc::string::String>"));
/// ```
#[derive(Clone, Copy)]
pub struct Key {
    id: TypeId,
    name: &'static str,
}

impl Key {
    /// Builds the key for `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` the key compares by.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The `std::any::type_name` of the keyed type.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// True when the key denotes `T`.
    #[inline(always)]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl Hash for Key {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// Helper function for creating type keys
#[inline(always)]
pub fn key_of_type<T: ?Sized + 'static>() -> Key {
    Key::of::<T>()
}
