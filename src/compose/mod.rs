//! Scene composition.
//!
//! Turns a scene script plus its allocated timeline into a [`CompositionPlan`](crate::CompositionPlan):
//! every layer and audio cue keyed by the global frame range it occupies. The plan is computed once
//! per render and only read afterwards.

pub(crate) mod compositor;
pub(crate) mod layer;
