//! Multi-image sub-sequencer.
//!
//! Decides grid vs. sequence layout for a scene's image/meme set and computes per-item visibility
//! as a pure function of the frame offset inside the scene.

pub(crate) mod grid;
pub(crate) mod sequencer;
