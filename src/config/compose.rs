use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};

/// Top-level composition configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Identifier reported to the rendering host.
    pub composition_id: String,
    /// Output frame rate.
    pub fps: Fps,
    /// Output frame size.
    pub canvas: Canvas,
    /// Duration used for scenes with no voice timing.
    pub fallback_scene_secs: f64,
    /// How the total frame count is chosen.
    pub duration: DurationPolicy,
    /// Prefix rooting every local asset reference.
    pub local_namespace: String,
    /// How asset-plan entries are joined to scenes.
    pub asset_join: AssetJoinMode,
    /// Looping background layer.
    pub background: BackgroundConfig,
    /// Multi-image sub-sequencer.
    pub memes: MemeConfig,
    /// Subtitle highlighter.
    pub subtitles: SubtitleConfig,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            composition_id: "ShortformComposition".to_string(),
            fps: Fps::default(),
            canvas: Canvas::default(),
            fallback_scene_secs: 5.0,
            duration: DurationPolicy::default(),
            local_namespace: "vol/".to_string(),
            asset_join: AssetJoinMode::default(),
            background: BackgroundConfig::default(),
            memes: MemeConfig::default(),
            subtitles: SubtitleConfig::default(),
        }
    }
}

impl ComposeConfig {
    /// Parse and validate a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse compose config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open compose config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.composition_id.trim().is_empty() {
            return Err(ReelError::validation("composition_id must be non-empty"));
        }
        if !self.fallback_scene_secs.is_finite() || self.fallback_scene_secs < 0.0 {
            return Err(ReelError::validation(
                "fallback_scene_secs must be finite and >= 0",
            ));
        }
        let ns = self.local_namespace.trim();
        if ns.is_empty() || !ns.ends_with('/') || ns.starts_with('/') {
            return Err(ReelError::validation(
                "local_namespace must be a relative prefix ending in '/'",
            ));
        }
        if let DurationPolicy::Fixed { frames } = self.duration
            && frames == 0
        {
            return Err(ReelError::validation("fixed duration must be >= 1 frame"));
        }
        self.background.validate()?;
        self.memes.validate()?;
        Ok(())
    }
}

/// Total-frame-count policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Sum of allocated scene lengths.
    Computed,
    /// `ceil(total_duration * fps)` from the script, or [`DurationPolicy::Computed`] when absent.
    #[default]
    ScriptTotal,
    /// A fixed frame count.
    Fixed {
        /// Total frames.
        frames: u64,
    },
}

/// Asset-plan join strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetJoinMode {
    /// Exact scene-number key first, substring containment as fallback.
    #[default]
    ExactThenSubstring,
    /// Substring containment only.
    SubstringOnly,
}

/// Background loop settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Raw background source, resolved like any other asset reference.
    pub source: String,
    /// Upper bound (exclusive) of the random start offset, in seconds.
    pub max_offset_secs: u32,
    /// Length of the background asset in frames; source frames wrap when set.
    pub loop_frames: Option<u64>,
    /// Seed used when the script has no usable narration.
    pub default_seed: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            source: "stock/gameplay/background_loop.mp4".to_string(),
            max_offset_secs: 1200,
            loop_frames: None,
            default_seed: "reelwright-background".to_string(),
        }
    }
}

impl BackgroundConfig {
    fn validate(&self) -> ReelResult<()> {
        if self.loop_frames == Some(0) {
            return Err(ReelError::validation("background.loop_frames must be >= 1"));
        }
        Ok(())
    }
}

/// Meme layout mode selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemeLayoutChoice {
    /// Grid for small sets, sequence otherwise.
    #[default]
    Auto,
    /// Always grid.
    Grid,
    /// Always sequence.
    Sequence,
}

/// Meme sub-sequencer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeConfig {
    /// Forced or automatic layout.
    pub layout: MemeLayoutChoice,
    /// Largest item count laid out as a grid in `auto` mode.
    pub grid_max_items: usize,
    /// Crossfade window as a fraction of the base segment length.
    pub crossfade_fraction: f64,
    /// Slow zoom on grid cells.
    pub zoom: bool,
    /// Extra scale reached at the end of a zoom.
    pub zoom_amount: f64,
    /// Easing applied to the zoom.
    pub zoom_ease: Ease,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            layout: MemeLayoutChoice::Auto,
            grid_max_items: 6,
            crossfade_fraction: 0.15,
            zoom: true,
            zoom_amount: 0.08,
            zoom_ease: Ease::InOutSine,
        }
    }
}

impl MemeConfig {
    fn validate(&self) -> ReelResult<()> {
        if !(0.0..=0.5).contains(&self.crossfade_fraction) {
            return Err(ReelError::validation(
                "memes.crossfade_fraction must be in [0, 0.5]",
            ));
        }
        if !self.zoom_amount.is_finite() || self.zoom_amount < 0.0 {
            return Err(ReelError::validation(
                "memes.zoom_amount must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Subtitle settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleConfig {
    /// Emit subtitle layers.
    pub enabled: bool,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/compose.rs"]
mod tests;
