//! Shared primitives: frame/time types, errors and stable hashing.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
