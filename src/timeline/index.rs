use std::collections::BTreeMap;

use crate::config::compose::AssetJoinMode;
use crate::script::model::{SceneAssetEntry, VoiceTiming};

/// Exact-id lookup of voice timing per scene.
#[derive(Clone, Debug, Default)]
pub struct TimingIndex<'a> {
    by_scene: BTreeMap<u32, &'a VoiceTiming>,
}

impl<'a> TimingIndex<'a> {
    /// Index a timing table. Entries without a scene id are skipped; duplicate ids keep the first.
    pub fn new(table: &'a [VoiceTiming]) -> Self {
        let mut by_scene = BTreeMap::new();
        for (i, t) in table.iter().enumerate() {
            let Some(id) = t.scene_id else {
                tracing::debug!(entry = i, "skipping voice timing entry without scene id");
                continue;
            };
            if by_scene.contains_key(&id) {
                tracing::warn!(scene = id, entry = i, "duplicate voice timing; keeping first");
                continue;
            }
            by_scene.insert(id, t);
        }
        Self { by_scene }
    }

    /// Timing for `scene`, if any.
    pub fn get(&self, scene: u32) -> Option<&'a VoiceTiming> {
        self.by_scene.get(&scene).copied()
    }

    /// Spoken duration of `scene` in seconds, if timed.
    pub fn duration_secs(&self, scene: u32) -> Option<f64> {
        self.get(scene).map(|t| t.duration_seconds)
    }

    /// Number of indexed scenes.
    pub fn len(&self) -> usize {
        self.by_scene.len()
    }

    /// `true` when no timing was indexed.
    pub fn is_empty(&self) -> bool {
        self.by_scene.is_empty()
    }
}

/// Scene-number lookup into the asset plan.
///
/// An exact key index is built once; the substring rule on `scene_name` is only a fallback, and
/// in [`AssetJoinMode::ExactThenSubstring`] it never borrows an entry that carries its own key.
#[derive(Clone, Debug)]
pub struct AssetPlanIndex<'a> {
    entries: &'a [SceneAssetEntry],
    exact: BTreeMap<u32, usize>,
    mode: AssetJoinMode,
}

impl<'a> AssetPlanIndex<'a> {
    /// Index asset-plan entries.
    pub fn new(entries: &'a [SceneAssetEntry], mode: AssetJoinMode) -> Self {
        let mut exact = BTreeMap::new();
        for (i, e) in entries.iter().enumerate() {
            if let Some(key) = entry_key(e) {
                exact.entry(key).or_insert(i);
            }
        }
        Self {
            entries,
            exact,
            mode,
        }
    }

    /// Entry joined to `scene`, if any.
    pub fn lookup(&self, scene: u32) -> Option<&'a SceneAssetEntry> {
        let needle = scene.to_string();
        match self.mode {
            AssetJoinMode::ExactThenSubstring => {
                if let Some(&i) = self.exact.get(&scene) {
                    return self.entries.get(i);
                }
                // "Scene 10" belongs to scene 10, never to scene 1.
                self.entries
                    .iter()
                    .find(|e| entry_key(e).is_none() && e.scene_name.contains(&needle))
            }
            AssetJoinMode::SubstringOnly => {
                self.entries.iter().find(|e| e.scene_name.contains(&needle))
            }
        }
    }
}

/// Exact join key: the explicit scene number, else the last digit run of the name.
pub fn entry_key(entry: &SceneAssetEntry) -> Option<u32> {
    entry
        .scene_number
        .or_else(|| last_digit_run(&entry.scene_name))
}

fn last_digit_run(s: &str) -> Option<u32> {
    let end = s.rfind(|c: char| c.is_ascii_digit())? + 1;
    let start = s[..end]
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    s[start..end].parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/index.rs"]
mod tests;
