//! Composition configuration.
//!
//! Everything a render needs beyond the scene script itself: output format, fallbacks, the asset
//! namespace and per-layer tuning. All fields have defaults so an empty JSON object is valid.

pub(crate) mod compose;
