//! Immutable, hierarchical key/value carrier threaded through a request.
//!
//! A `Context` is cheap to clone and never mutated in place. Deriving a
//! child adds one value on top of the parent chain; lookups walk from the
//! innermost value outwards so inner values shadow outer ones.

pub mod carrier;


pub use carrier::{Context, Key};
