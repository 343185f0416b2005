//! Capturing errors as they flow through `Result` values.

use crate::{
    capture::{capture, capture_message},
    context::Context,
    error::identity::Reportable,
};

/// Extension trait that reports the error half of a `Result` to the
/// context's binding and passes the result through unchanged.
pub trait CaptureResultExt<T, E> {
    /// Captures the error, if any, with its own text as the message.
    fn capture_err(self, ctx: &Context) -> Result<T, E>;

    /// Captures the error, if any, with an explicit message.
    fn capture_err_msg(self, ctx: &Context, msg: &str) -> Result<T, E>;
}

impl<T, E> CaptureResultExt<T, E> for Result<T, E>
where
    E: Reportable,
{
    fn capture_err(self, ctx: &Context) -> Result<T, E> {
        if let Err(err) = &self {
            capture(ctx, err);
        }
        self
    }

    fn capture_err_msg(self, ctx: &Context, msg: &str) -> Result<T, E> {
        if let Err(err) = &self {
            capture_message(ctx, err, msg);
        }
        self
    }
}
