//! Word/character subtitle highlighting by point-in-time lookup.

pub(crate) mod highlight;
