//! Flat audio cue list for hosts that mix once per render.

pub(crate) mod manifest;
