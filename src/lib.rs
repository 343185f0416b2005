//! Ctxerror - request-scoped error reporting
//!
//! Binds an error handler to a request's [`Context`] and guarantees that
//! each distinct error reaches that handler at most once per request, no
//! matter how many call sites observe it. Call sites report with
//! [`capture`], [`capture_message`], or [`capture_messagef!`]; contexts
//! without a binding ignore reports.
//!
//! ```
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! use ctxerror::{Context, SharedError, capture, handler, new_context};
//!
//! let reported = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&reported);
//! let ctx = new_context(
//!     &Context::background(),
//!     Some(handler(move |_, _, _| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })),
//! );
//!
//! let err = SharedError::from(std::io::Error::other("disk full"));
//! capture(&ctx, &err);
//! capture(&ctx, &err);
//! assert_eq!(reported.load(Ordering::SeqCst), 1);
//! ```

pub mod capture;
pub mod config;
pub mod context;
pub mod error;

// Re-export key types for convenience
pub use {
    capture::{
        DefaultHandler, ErrorHandler, capture, capture_message, capture_message_fmt,
        default_handler, handler, is_bound, new_context,
    },
    config::{ReporterSettings, SettingsError, install_settings},
    context::{Context, Key},
    error::{CaptureResultExt, Reportable, SharedError},
};
