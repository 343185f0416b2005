//! Capture entry points and the deduplicating dispatch they share.

use std::{error::Error as StdError, fmt::Arguments};

use tracing::trace;

use crate::{
    capture::{binding::BindingKey, handler::default_handler},
    context::Context,
    error::Reportable,
};

/// Reports `err` using its own text as the message.
///
/// Does nothing if `ctx` carries no binding or `err` was already reported
/// under it.
pub fn capture<E: Reportable>(ctx: &Context, err: &E) {
    dispatch(ctx, err, || err.to_string());
}

/// Reports `err` with an explicit message.
pub fn capture_message<E: Reportable>(ctx: &Context, err: &E, msg: impl AsRef<str>) {
    dispatch(ctx, err, || msg.as_ref().to_owned());
}

/// Reports `err` with a message built from `format_args!`.
///
/// The message is only formatted if the handler is going to run. See
/// [`capture_messagef!`](crate::capture_messagef) for the macro form.
pub fn capture_message_fmt<E: Reportable>(ctx: &Context, err: &E, args: Arguments<'_>) {
    dispatch(ctx, err, || args.to_string());
}

/// Reports an error with a formatted message.
///
/// ```
/// use ctxerror::{Context, SharedError, capture_messagef, new_context};
///
/// let ctx = new_context(&Context::background(), None);
/// let err = SharedError::from(std::io::Error::other("timed out"));
/// capture_messagef!(&ctx, &err, "failed on {} item {}", "widget", 5);
/// ```
#[macro_export]
macro_rules! capture_messagef {
    ($ctx:expr, $err:expr, $($arg:tt)+) => {
        $crate::capture::capture_message_fmt($ctx, $err, ::std::format_args!($($arg)+))
    };
}

fn dispatch<E, F>(ctx: &Context, err: &E, message: F)
where
    E: Reportable,
    F: FnOnce() -> String,
{
    let Some(binding) = ctx.value::<BindingKey>() else {
        return;
    };

    // Lock is held for the insert only; handlers run unlocked.
    if !binding.mark_reported(err) {
        trace!(error = %err, "Error already reported in this context");
        return;
    }

    let msg = message();
    let err: &(dyn StdError + 'static) = err;
    match binding.handler() {
        Some(handler) => handler(ctx, err, &msg),
        None => default_handler(ctx, err, &msg),
    }
}
