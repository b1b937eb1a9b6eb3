//! Asset reference resolution and host-side media probing.
//!
//! Resolution turns whatever upstream left in the asset plan into either a loadable
//! [`AssetSource`](crate::AssetSource) or nothing. Probing is the only place this crate touches
//! the filesystem, and it never aborts a render.

pub(crate) mod loader;
pub(crate) mod resolve;
