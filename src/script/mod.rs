//! Scene-script boundary model.
//!
//! The JSON-facing representation produced by the upstream pipeline. Parsing is lenient about the
//! shapes upstream stages actually emit (nulls, single-vs-list fields, wrapped asset plans).

pub(crate) mod de;
pub(crate) mod descriptor;
pub(crate) mod document;
pub(crate) mod model;
