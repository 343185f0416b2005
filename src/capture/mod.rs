//! Request-scoped error capture.
//!
//! [`new_context`] binds a handler and an empty set of reported errors to a
//! context. The `capture*` functions resolve that binding from any context
//! derived from it and hand each distinct error to the handler exactly once.
//! Contexts without a binding silently ignore captures.

pub mod binding;
pub mod dispatch;
pub mod handler;


pub use {
    binding::{is_bound, new_context},
    dispatch::{capture, capture_message, capture_message_fmt},
    handler::{DefaultHandler, ErrorHandler, default_handler, format_report, handler},
};
