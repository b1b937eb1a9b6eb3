//! Per-frame evaluation of a composed plan.
//!
//! Stateless: the result for a frame depends only on the plan, the frame index and the (optional)
//! preflight failure set.

pub(crate) mod evaluator;
