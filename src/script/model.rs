use serde::{Deserialize, Serialize};

use crate::script::de::{
    lenient_f64, lenient_opt_f64, lenient_opt_scene_id, lenient_scene_id, null_as_default,
    one_or_many,
};

/// Root input document produced once by the upstream pipeline.
///
/// Treated as read-only: every derived structure (frame intervals, layer trees) is recomputed from
/// it per render and it is never mutated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneScript {
    /// Scenes in render order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub scenes: Vec<Scene>,
    /// Per-scene asset references, loosely joined to scenes by name.
    #[serde(default)]
    pub asset_plan: AssetPlan,
    /// Per-scene voice timing, joined to scenes by exact scene id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub voice_timing: Vec<VoiceTiming>,
    /// Advisory total duration in seconds.
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_duration: Option<f64>,
}

/// One narrated beat of the video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene number; defines render order and is the join key.
    #[serde(deserialize_with = "lenient_scene_id")]
    pub scene_number: u32,
    /// Narration text.
    #[serde(default, alias = "narration", deserialize_with = "null_as_default")]
    pub dialogue_vo: String,
    /// Caption text shown on screen for the whole scene.
    #[serde(default, deserialize_with = "null_as_default")]
    pub on_screen_text: String,
    /// Visual direction; carried through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub on_screen_action: String,
}

/// A single timed token (character or word) in seconds relative to scene start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedToken {
    /// Token text.
    #[serde(
        alias = "character",
        alias = "word",
        alias = "text",
        default,
        deserialize_with = "null_as_default"
    )]
    pub token: String,
    /// Start time in seconds.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start: f64,
    /// End time in seconds.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end: f64,
}

impl TimedToken {
    /// Convenience constructor.
    pub fn new(token: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            token: token.into(),
            start,
            end,
        }
    }
}

/// Measured narration timing for one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceTiming {
    /// Scene id (join key). Upstream error records carry none and are skipped.
    #[serde(
        default,
        alias = "scene_number",
        deserialize_with = "lenient_opt_scene_id"
    )]
    pub scene_id: Option<u32>,
    /// Narration text that was synthesized.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Narration audio reference, when synthesis succeeded.
    #[serde(default)]
    pub audio_path: Option<String>,
    /// Spoken duration in seconds.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_seconds: f64,
    /// Per-character timestamps.
    #[serde(default, deserialize_with = "null_as_default")]
    pub character_timestamps: Vec<TimedToken>,
    /// Per-word timestamps; authoritative for subtitles when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_timestamps: Option<Vec<TimedToken>>,
}

/// Ordered asset plan. Accepts either a bare list or `{ "scenes": [...] }`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct AssetPlan(pub Vec<SceneAssetEntry>);

impl AssetPlan {
    /// Entries in plan order.
    pub fn entries(&self) -> &[SceneAssetEntry] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for AssetPlan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<SceneAssetEntry>),
            Wrapped {
                #[serde(default)]
                scenes: Vec<SceneAssetEntry>,
            },
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None => Self::default(),
            Some(Repr::List(v)) | Some(Repr::Wrapped { scenes: v }) => Self(v),
        })
    }
}

/// Asset references planned for one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneAssetEntry {
    /// Free-form scene identifier ("Scene 3", "scene_03", ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub scene_name: String,
    /// Explicit scene number, when the producer supplies one.
    #[serde(
        default,
        deserialize_with = "lenient_opt_scene_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub scene_number: Option<u32>,
    /// Structured descriptor.
    #[serde(default, alias = "video_assets", skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetDescriptorDef>,
    /// Legacy video references.
    #[serde(default, deserialize_with = "one_or_many")]
    pub video_asset: Vec<AssetRef>,
    /// Legacy image references.
    #[serde(default, deserialize_with = "one_or_many")]
    pub image_asset: Vec<AssetRef>,
    /// Legacy meme references.
    #[serde(default, deserialize_with = "one_or_many")]
    pub meme_asset: Vec<AssetRef>,
    /// Legacy background-music references.
    #[serde(default, deserialize_with = "one_or_many")]
    pub bgm: Vec<AssetRef>,
    /// Sound effects cued relative to scene start.
    #[serde(default, deserialize_with = "one_or_many")]
    pub sfx: Vec<SfxAsset>,
}

/// A raw asset reference: a bare string or an object carrying a path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    /// Bare path, URL, or (malformed) free-text description.
    Text(String),
    /// Object form.
    Object(AssetRefObject),
}

impl AssetRef {
    /// The candidate path string, if any.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Object(o) => o.path.as_deref(),
        }
    }
}

impl From<&str> for AssetRef {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Object form of [`AssetRef`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRefObject {
    /// Path or URL.
    #[serde(default, alias = "url", alias = "src", alias = "generated_path")]
    pub path: Option<String>,
    /// Human description (unused).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A sound effect cue.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SfxAsset {
    /// Description (unused by composition).
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Offset in seconds from scene start. May be negative or malformed upstream.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub timestamp_offset: f64,
    /// Audio reference.
    #[serde(default, alias = "path")]
    pub audio_path: Option<String>,
}

/// Structured descriptor exactly as it arrives: a type tag plus overlapping optional path fields.
///
/// Use [`AssetDescriptorDef::normalize`] to obtain the tagged [`crate::AssetDescriptor`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptorDef {
    /// `video`, `image` or `meme` (case-insensitive).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Generation prompt; occasionally a real path left by upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Generated video path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_video_path: Option<String>,
    /// Generated single image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image_path: Option<String>,
    /// Generated image paths.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub generated_image_paths: Vec<String>,
    /// Generated single meme path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_meme_path: Option<String>,
    /// Generated meme paths.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub generated_meme_paths: Vec<String>,
    /// Generic single path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Generic path list.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub paths: Vec<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
