//! Parent-linked context nodes addressed by key types.

use std::{
    any::{Any, TypeId},
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

/// Key type addressing one value slot in a [`Context`].
///
/// The key is the implementing type itself, so a private key type cannot be
/// read or shadowed by code outside the module that declares it.
pub trait Key: 'static {
    /// Type of the value stored under this key.
    type Value: Send + Sync + 'static;
}

/// One link in the context chain.
struct Node {
    /// Identity of the key type the value was stored under.
    key: TypeId,
    /// Stored value, downcast to `K::Value` on lookup.
    value: Box<dyn Any + Send + Sync>,
    /// Enclosing context, if any.
    parent: Option<Arc<Node>>,
}

/// Immutable request-scoped carrier.
///
/// Cloning shares the underlying chain. Values added to a child are never
/// visible from its parent or from sibling branches.
#[derive(Clone, Default)]
pub struct Context {
    /// Innermost node, `None` for a background context.
    head: Option<Arc<Node>>,
}

impl Context {
    /// Creates an empty root context.
    ///
    /// # Returns
    ///
    /// A `Context` carrying no values.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a child context carrying `value` under key `K`.
    ///
    /// # Arguments
    ///
    /// * `value` - Value to store; shadows any value already stored under `K`.
    ///
    /// # Returns
    ///
    /// The derived `Context`. `self` is left untouched.
    pub fn with_value<K: Key>(&self, value: K::Value) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Looks up the innermost value stored under key `K`.
    ///
    /// # Returns
    ///
    /// A reference to the value, or `None` if no context in the chain
    /// carries `K`.
    pub fn value<K: Key>(&self) -> Option<&K::Value> {
        let key = TypeId::of::<K>();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == key {
                return current.value.downcast_ref::<K::Value>();
            }
            node = current.parent.as_deref();
        }
        None
    }

    /// Returns `true` if any context in the chain carries key `K`.
    pub fn contains<K: Key>(&self) -> bool {
        self.value::<K>().is_some()
    }

    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            depth += 1;
            node = current.parent.as_deref();
        }
        depth
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // Unlinks one node at a time, stopping at the first shared node.
        let mut head = self.head.take();
        while let Some(node) = head {
            head = Arc::into_inner(node).and_then(|mut node| node.parent.take());
        }
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
