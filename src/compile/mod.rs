//! Stable digests of evaluated frames.

pub(crate) mod fingerprint;
