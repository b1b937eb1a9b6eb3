use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assets::resolve::{AssetSource, AssetUsage};

/// A media load that failed on the host side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MediaLoadFailure {
    /// The reference that was attempted.
    pub source: AssetSource,
    /// What the reference was going to be used for.
    pub usage: AssetUsage,
    /// Human-readable reason.
    pub reason: String,
}

/// Host-injected media probe.
///
/// Implementations must be callable from several threads at once.
pub trait MediaLoader: Send + Sync {
    /// Check that `source` can be loaded for `usage`.
    fn probe(&self, source: &AssetSource, usage: AssetUsage) -> Result<(), String>;
}

/// Loader that checks local namespaced assets exist under a public root directory.
///
/// URLs are never fetched and always succeed.
#[derive(Clone, Debug)]
pub struct FsMediaLoader {
    root: PathBuf,
}

impl FsMediaLoader {
    /// Loader rooted at the host's public static directory (the parent of the namespace).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Public root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaLoader for FsMediaLoader {
    fn probe(&self, source: &AssetSource, _usage: AssetUsage) -> Result<(), String> {
        match source {
            AssetSource::Url(_) => Ok(()),
            AssetSource::Local(rel) => {
                let path = self.root.join(rel);
                match std::fs::metadata(&path) {
                    Ok(m) if m.is_file() => Ok(()),
                    Ok(_) => Err(format!("'{}' is not a file", path.display())),
                    Err(e) => Err(format!("'{}': {e}", path.display())),
                }
            }
        }
    }
}

/// Sources whose load failed during preflight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaFailures {
    failed: BTreeSet<AssetSource>,
}

impl MediaFailures {
    /// Mark a source as failed.
    pub fn mark(&mut self, source: AssetSource) {
        self.failed.insert(source);
    }

    /// Whether `source` failed to load.
    pub fn is_failed(&self, source: &AssetSource) -> bool {
        self.failed.contains(source)
    }

    /// Number of failed sources.
    pub fn len(&self) -> usize {
        self.failed.len()
    }

    /// `true` when nothing failed.
    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }

    /// Failed sources in order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetSource> {
        self.failed.iter()
    }
}

/// Probe every distinct source once, reporting failures through `on_error`.
///
/// A source used for several purposes is probed with the first usage seen. Never aborts.
pub fn preflight<'a, I>(
    sources: I,
    loader: &dyn MediaLoader,
    on_error: &mut dyn FnMut(&MediaLoadFailure),
) -> MediaFailures
where
    I: IntoIterator<Item = (&'a AssetSource, AssetUsage)>,
{
    let mut seen = BTreeSet::<&AssetSource>::new();
    let mut failures = MediaFailures::default();
    for (source, usage) in sources {
        if !seen.insert(source) {
            continue;
        }
        if let Err(reason) = loader.probe(source, usage) {
            tracing::warn!(%source, ?usage, %reason, "media load failed");
            on_error(&MediaLoadFailure {
                source: source.clone(),
                usage,
                reason,
            });
            failures.mark(source.clone());
        }
    }
    failures
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
