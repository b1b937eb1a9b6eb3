//! Render sessions: compose once, then sample frames or frame ranges.

pub(crate) mod render_session;
