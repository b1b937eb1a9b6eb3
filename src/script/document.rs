use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};
use crate::script::model::SceneScript;

impl SceneScript {
    /// Parse a scene script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse scene script JSON: {e}")))
    }

    /// Parse a scene script from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ReelError::serde(format!("parse scene script JSON: {e}")))
    }

    /// Parse a scene script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open scene script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Scene numbers that appear more than once, in ascending order.
    ///
    /// Duplicates are tolerated (each occurrence still gets its own interval) but every lookup by
    /// number joins the same timing and asset entry.
    pub fn duplicate_scene_numbers(&self) -> Vec<u32> {
        let mut seen = BTreeSet::new();
        let mut dups = BTreeSet::new();
        for s in &self.scenes {
            if !seen.insert(s.scene_number) {
                dups.insert(s.scene_number);
            }
        }
        dups.into_iter().collect()
    }

    /// Seed text for the background offset: the first scene's narration, if non-blank.
    pub fn background_seed_text(&self) -> Option<&str> {
        self.scenes
            .first()
            .map(|s| s.dialogue_vo.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/document.rs"]
mod tests;
