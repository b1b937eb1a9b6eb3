use std::fmt;

use serde::{Deserialize, Serialize};

use crate::script::descriptor::DescriptorKind;
use crate::script::model::{AssetRef, SceneAssetEntry};

/// A directly loadable media reference.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum AssetSource {
    /// Absolute `http(s)` URL, passed through untouched.
    Url(String),
    /// Path inside the local-asset namespace, prefix included.
    Local(String),
}

impl AssetSource {
    /// The reference as handed to a media loader.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(s) | Self::Local(s) => s,
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a reference is going to be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetUsage {
    /// Main scene video.
    Video,
    /// Still image in the meme/image set.
    Image,
    /// Meme in the meme/image set.
    Meme,
    /// Narration audio.
    Audio,
    /// Background music.
    Bgm,
    /// Sound effect.
    Sfx,
    /// Looping background video.
    Background,
}

impl AssetUsage {
    fn descriptor_kind(self) -> Option<DescriptorKind> {
        match self {
            Self::Video => Some(DescriptorKind::Video),
            Self::Image => Some(DescriptorKind::Image),
            Self::Meme => Some(DescriptorKind::Meme),
            Self::Audio | Self::Bgm | Self::Sfx | Self::Background => None,
        }
    }
}

/// Why a candidate string resolved to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Empty after trimming.
    Empty,
    /// Contains whitespace: a description left where a path belongs.
    Placeholder,
    /// Climbs out of the namespace with `..`.
    Traversal,
    /// Rooted at an arbitrary filesystem location.
    Absolute,
    /// A URL with a scheme other than `http`/`https`.
    UnsupportedScheme,
}

/// Sources of an entry's references, tried in order until one yields a resolved source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryRule {
    /// The structured descriptor, when its tag matches the usage.
    Descriptor,
    /// The legacy flat field for the usage.
    Legacy,
}

/// Precedence of [`EntryRule`]s; the first rule producing at least one source wins.
pub const ENTRY_RULES: &[EntryRule] = &[EntryRule::Descriptor, EntryRule::Legacy];

/// Normalizes raw asset references into [`AssetSource`]s.
#[derive(Clone, Debug)]
pub struct AssetPathResolver {
    namespace: String,
}

impl Default for AssetPathResolver {
    fn default() -> Self {
        Self::new("vol/")
    }
}

impl AssetPathResolver {
    /// Resolver for the given local namespace (e.g. `vol/`). A trailing `/` is added if missing.
    pub fn new(namespace: impl Into<String>) -> Self {
        let mut namespace = namespace.into().trim().to_string();
        if !namespace.ends_with('/') {
            namespace.push('/');
        }
        Self { namespace }
    }

    /// The local namespace prefix, trailing `/` included.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolve one candidate string.
    pub fn resolve_str(&self, raw: &str, usage: AssetUsage) -> Option<AssetSource> {
        match self.classify(raw) {
            Ok(src) => Some(src),
            Err(why) => {
                if why == Rejection::Placeholder {
                    tracing::debug!(?usage, reference = raw, "rejecting placeholder asset reference");
                } else if why != Rejection::Empty {
                    tracing::debug!(?usage, ?why, reference = raw, "rejecting asset reference");
                }
                None
            }
        }
    }

    /// Resolve one candidate string, reporting why it was rejected.
    pub fn classify(&self, raw: &str) -> Result<AssetSource, Rejection> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(Rejection::Empty);
        }
        if has_http_scheme(s) {
            return Ok(AssetSource::Url(s.to_string()));
        }
        if s.starts_with(&self.namespace) {
            if s.split(['/', '\\']).any(|part| part == "..") {
                return Err(Rejection::Traversal);
            }
            return Ok(AssetSource::Local(s.to_string()));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(Rejection::Placeholder);
        }
        if s.contains("://") {
            return Err(Rejection::UnsupportedScheme);
        }

        let rel = normalize_rel(s)?;
        // Upstream sometimes writes the namespace with a leading `./`.
        if rel.starts_with(&self.namespace) {
            return Ok(AssetSource::Local(rel));
        }
        Ok(AssetSource::Local(format!("{}{rel}", self.namespace)))
    }

    /// Resolve a raw [`AssetRef`].
    pub fn resolve_ref(&self, r: &AssetRef, usage: AssetUsage) -> Option<AssetSource> {
        r.candidate().and_then(|s| self.resolve_str(s, usage))
    }

    /// Resolved sources for `usage` from one asset-plan entry.
    ///
    /// Rules run in [`ENTRY_RULES`] order; within the winning rule, order is preserved and
    /// duplicates are dropped.
    pub fn resolve_entry(&self, entry: &SceneAssetEntry, usage: AssetUsage) -> Vec<AssetSource> {
        ENTRY_RULES
            .iter()
            .map(|&rule| self.apply_rule(entry, rule, usage))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    /// Resolved sources produced by a single rule.
    pub fn apply_rule(
        &self,
        entry: &SceneAssetEntry,
        rule: EntryRule,
        usage: AssetUsage,
    ) -> Vec<AssetSource> {
        let mut out = Vec::new();
        match rule {
            EntryRule::Descriptor => {
                let Some(kind) = usage.descriptor_kind() else {
                    return out;
                };
                let Some(desc) = entry.asset.as_ref().and_then(|d| d.normalize()) else {
                    return out;
                };
                if desc.kind() != kind {
                    return out;
                }
                for raw in desc.raw_paths() {
                    push_unique(&mut out, self.resolve_str(raw, usage));
                }
            }
            EntryRule::Legacy => {
                for r in legacy_field(entry, usage) {
                    push_unique(&mut out, self.resolve_ref(r, usage));
                }
            }
        }
        out
    }
}

fn legacy_field(entry: &SceneAssetEntry, usage: AssetUsage) -> &[AssetRef] {
    match usage {
        AssetUsage::Video => &entry.video_asset,
        AssetUsage::Image => &entry.image_asset,
        AssetUsage::Meme => &entry.meme_asset,
        AssetUsage::Bgm => &entry.bgm,
        AssetUsage::Audio | AssetUsage::Sfx | AssetUsage::Background => &[],
    }
}

fn push_unique(out: &mut Vec<AssetSource>, src: Option<AssetSource>) {
    if let Some(src) = src
        && !out.contains(&src)
    {
        out.push(src);
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn normalize_rel(s: &str) -> Result<String, Rejection> {
    let s = s.replace('\\', "/");
    if s.starts_with('/') || has_drive_prefix(&s) {
        return Err(Rejection::Absolute);
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(Rejection::Traversal);
        }
        out.push(part);
    }
    if out.is_empty() {
        return Err(Rejection::Empty);
    }
    Ok(out.join("/"))
}

fn has_drive_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
