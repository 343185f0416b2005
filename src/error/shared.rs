//! Shared errors compared by allocation identity.

use std::{
    error::Error as StdError,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    io::Error as IoError,
    sync::Arc,
};

use anyhow::Error as AnyhowError;

/// Reference-counted error whose identity is its allocation.
///
/// Clones of one `SharedError` are equal; two values built separately are
/// not, even when their messages match. Use it for error types that have no
/// `Eq`/`Hash` of their own, such as `std::io::Error` or `anyhow::Error`.
#[derive(Clone)]
pub struct SharedError(Arc<dyn StdError + Send + Sync>);

impl SharedError {
    /// Wraps an error in a new shared allocation.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Returns the wrapped error.
    pub fn get(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for SharedError {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for SharedError {}

impl Hash for SharedError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl Display for SharedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&*self.0, f)
    }
}

impl Debug for SharedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&*self.0, f)
    }
}

impl StdError for SharedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<IoError> for SharedError {
    fn from(error: IoError) -> Self {
        Self::new(error)
    }
}

impl From<AnyhowError> for SharedError {
    fn from(error: AnyhowError) -> Self {
        Self(Arc::from(Box::<dyn StdError + Send + Sync>::from(error)))
    }
}

impl From<Box<dyn StdError + Send + Sync>> for SharedError {
    fn from(error: Box<dyn StdError + Send + Sync>) -> Self {
        Self(Arc::from(error))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        error::Error as _,
        io::{Error as IoError, ErrorKind},
    };

    use anyhow::{Context, anyhow};

    use crate::error::{identity::Reportable, shared::SharedError};

    #[test]
    fn test_clones_are_equal() {
        let error = SharedError::new(IoError::new(ErrorKind::NotFound, "missing"));
        let clone = error.clone();

        assert_eq!(error, clone);
        assert_eq!(error.error_key(), clone.error_key());
    }

    #[test]
    fn test_separate_allocations_differ() {
        let first = SharedError::from(IoError::new(ErrorKind::NotFound, "missing"));
        let second = SharedError::from(IoError::new(ErrorKind::NotFound, "missing"));

        assert_eq!(first.to_string(), second.to_string());
        assert_ne!(first, second);
        assert_ne!(first.error_key(), second.error_key());
    }

    #[test]
    fn test_anyhow_conversion_keeps_text_and_chain() {
        let result: Result<(), IoError> = Err(IoError::other("disk full"));
        let error = SharedError::from(result.context("writing cache").unwrap_err());

        assert_eq!(error.to_string(), "writing cache");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("disk full")
        );
    }

    #[test]
    fn test_anyhow_message_displays() {
        let error = SharedError::from(anyhow!("quota exceeded"));
        assert_eq!(error.to_string(), "quota exceeded");
        assert_eq!(format!("{error:?}"), format!("{:?}", error.get()));
    }
}
