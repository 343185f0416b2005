//! Error identity and `Result` integration for captured errors.
//!
//! Errors are deduplicated by their own equality. Types with `Eq + Hash +
//! Clone` are usable directly; everything else goes through [`SharedError`].

pub mod identity;
pub mod operational;
pub mod shared;

pub use {
    identity::{ErasedKey, ErrorKey, Reportable},
    operational::CaptureResultExt,
    shared::SharedError,
};
