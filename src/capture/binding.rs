//! Per-request binding of a handler and its set of reported errors.

use std::collections::HashSet;

use {parking_lot::Mutex, tracing::trace};

use crate::{
    capture::handler::ErrorHandler,
    context::{Context, Key},
    error::{ErrorKey, Reportable},
};

/// Record attached to a context by [`new_context`].
pub(crate) struct Binding {
    /// Bound handler; `None` selects the default handler at dispatch time.
    handler: Option<ErrorHandler>,
    /// Identities already handed to the handler. Only ever grows.
    reported: Mutex<HashSet<ErrorKey>>,
}

impl Binding {
    fn new(handler: Option<ErrorHandler>) -> Self {
        Self {
            handler,
            reported: Mutex::new(HashSet::new()),
        }
    }

    /// Marks `err` as reported.
    ///
    /// Only the first report clones the error into the set.
    ///
    /// # Returns
    ///
    /// `true` if this is the first report of `err` under this binding.
    pub(crate) fn mark_reported<E: Reportable>(&self, err: &E) -> bool {
        let mut reported = self.reported.lock();
        if reported.contains(err.erased_key()) {
            return false;
        }
        reported.insert(err.error_key())
    }

    pub(crate) fn handler(&self) -> Option<&ErrorHandler> {
        self.handler.as_ref()
    }
}

/// Private key under which the binding is stored.
pub(crate) struct BindingKey;

impl Key for BindingKey {
    type Value = Binding;
}

/// Derives a context carrying a fresh binding.
///
/// Any binding already visible in `parent` is shadowed for the returned
/// context and its descendants. `parent` and its other children keep
/// reporting through their own binding.
///
/// # Arguments
///
/// * `parent` - Context to derive from.
/// * `handler` - Handler for first reports, or `None` for the default handler.
///
/// # Returns
///
/// The derived `Context`.
pub fn new_context(parent: &Context, handler: Option<ErrorHandler>) -> Context {
    trace!(has_handler = handler.is_some(), "Binding error handler to context");
    parent.with_value::<BindingKey>(Binding::new(handler))
}

/// Returns `true` if `ctx` or one of its ancestors carries a binding.
pub fn is_bound(ctx: &Context) -> bool {
    ctx.contains::<BindingKey>()
}

impl Context {
    /// Derives a context with a fresh binding to `handler`.
    ///
    /// Shorthand for [`new_context`]`(self, Some(handler))`.
    pub fn with_error_handler(&self, handler: ErrorHandler) -> Self {
        new_context(self, Some(handler))
    }
}
