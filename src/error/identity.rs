//! Error identity used as the deduplication key.
//!
//! An [`ErrorKey`] owns a clone of the error and compares through the
//! concrete type's own `Eq` and `Hash`. Keys built from different error types
//! never compare equal, even if both types would render the same text.
//! A set of keys can be probed with a borrowed [`ErasedKey`], so checking an
//! already reported error does not clone it.

use std::{
    any::{Any, TypeId},
    borrow::Borrow,
    error::Error as StdError,
    fmt::{Debug, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
};

/// Object-safe view of an `Eq + Hash` value.
///
/// Implemented for every such type. `dyn ErasedKey` hashes and compares the
/// same way as the [`ErrorKey`] built from the same value.
pub trait ErasedKey: Send + Sync {
    /// Concrete type of the value.
    fn key_type(&self) -> TypeId;
    /// The value as `Any`, for downcasting.
    fn as_any(&self) -> &dyn Any;
    /// Equality through the concrete type's `Eq`; `false` across types.
    fn erased_eq(&self, other: &dyn ErasedKey) -> bool;
    /// Feeds the concrete type and value into `state`.
    fn erased_hash(&self, state: &mut dyn Hasher);
}

impl<T> ErasedKey for T
where
    T: Eq + Hash + Send + Sync + 'static,
{
    fn key_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn erased_eq(&self, other: &dyn ErasedKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn erased_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl PartialEq for dyn ErasedKey {
    fn eq(&self, other: &Self) -> bool {
        self.erased_eq(other)
    }
}

impl Eq for dyn ErasedKey {}

impl Hash for dyn ErasedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.erased_hash(state);
    }
}

/// Type-erased identity of one reported error.
pub struct ErrorKey(Box<dyn ErasedKey>);

impl ErrorKey {
    /// Builds a key from an owned value of any `Eq + Hash` type.
    pub fn new<T>(value: T) -> Self
    where
        T: Eq + Hash + Send + Sync + 'static,
    {
        Self(Box::new(value))
    }

    fn erased(&self) -> &(dyn ErasedKey + 'static) {
        &*self.0
    }
}

impl Borrow<dyn ErasedKey> for ErrorKey {
    fn borrow(&self) -> &(dyn ErasedKey + 'static) {
        &*self.0
    }
}

impl PartialEq for ErrorKey {
    fn eq(&self, other: &Self) -> bool {
        self.erased() == other.erased()
    }
}

impl Eq for ErrorKey {}

impl Hash for ErrorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.erased().hash(state);
    }
}

impl Debug for ErrorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ErrorKey")
            .field("type_id", &self.erased().key_type())
            .finish_non_exhaustive()
    }
}

/// An error that can be captured and deduplicated.
///
/// Implemented for every error type with native equality. Errors without
/// `Eq + Hash + Clone` can be wrapped in
/// [`SharedError`](crate::error::SharedError), which compares by allocation.
///
/// Manual implementations must return equal identities from both methods.
pub trait Reportable: StdError + Send + Sync + 'static {
    /// Borrowed identity, used to look the error up among reported ones.
    fn erased_key(&self) -> &(dyn ErasedKey + 'static);

    /// Owned identity, stored when the error is reported for the first time.
    fn error_key(&self) -> ErrorKey;
}

impl<E> Reportable for E
where
    E: StdError + Eq + Hash + Clone + Send + Sync + 'static,
{
    fn erased_key(&self) -> &(dyn ErasedKey + 'static) {
        self
    }

    fn error_key(&self) -> ErrorKey {
        ErrorKey::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use thiserror::Error;

    use crate::error::identity::{ErrorKey, Reportable};

    #[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
    #[error("lookup failed for {0}")]
    struct LookupError(u32);

    #[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
    #[error("lookup failed for {0}")]
    struct OtherLookupError(u32);

    #[test]
    fn test_equal_values_share_a_key() {
        assert_eq!(LookupError(1).error_key(), LookupError(1).error_key());
        assert_ne!(LookupError(1).error_key(), LookupError(2).error_key());
    }

    #[test]
    fn test_types_never_collide() {
        assert_ne!(LookupError(1).error_key(), OtherLookupError(1).error_key());

        let mut seen = HashSet::new();
        assert!(seen.insert(LookupError(1).error_key()));
        assert!(seen.insert(OtherLookupError(1).error_key()));
        assert!(!seen.insert(LookupError(1).error_key()));
    }

    #[test]
    fn test_key_from_plain_value() {
        assert_eq!(ErrorKey::new("timeout"), ErrorKey::new("timeout"));
        assert_ne!(ErrorKey::new(1_u8), ErrorKey::new(1_u16));
    }

    #[test]
    fn test_borrowed_lookup_matches_owned_key() {
        let mut seen = HashSet::new();
        seen.insert(LookupError(1).error_key());

        assert!(seen.contains(LookupError(1).erased_key()));
        assert!(!seen.contains(LookupError(2).erased_key()));
        assert!(!seen.contains(OtherLookupError(1).erased_key()));
    }
}
