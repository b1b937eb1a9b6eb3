//! Scene timeline: join indices, frame allocation and the looping background.
//!
//! Allocation is a single pure fold over the scene list; nothing here depends on which frame is
//! later sampled.

pub(crate) mod allocator;
pub(crate) mod background;
pub(crate) mod index;
