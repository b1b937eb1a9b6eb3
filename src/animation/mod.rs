//! Easing curves for time-varying layer properties.

pub(crate) mod ease;
