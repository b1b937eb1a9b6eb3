use serde::Serialize;

use crate::assets::resolve::{AssetSource, AssetUsage};
use crate::foundation::core::{Canvas, FrameIndex, FrameRange, Fps, Rect};
use crate::memes::sequencer::{MemeLayoutMode, ZoomSpec};
use crate::subtitle::highlight::TokenTrack;
use crate::timeline::background::BackgroundLoop;

/// Fixed position of a layer in every scene's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSlot {
    /// Looping background video.
    Background,
    /// Main scene media.
    Media,
    /// Meme/image sub-sequence.
    Meme,
    /// On-screen caption overlay.
    Text,
    /// Narration audio.
    Voiceover,
    /// Sound effect.
    Sfx,
    /// Highlighted subtitle token.
    Subtitle,
}

impl LayerSlot {
    /// Stack index (0..=6).
    pub fn index(self) -> u8 {
        match self {
            Self::Background => 0,
            Self::Media => 1,
            Self::Meme => 2,
            Self::Text => 3,
            Self::Voiceover => 4,
            Self::Sfx => 5,
            Self::Subtitle => 6,
        }
    }

    /// Painter's z; `None` for audio slots.
    pub fn z(self) -> Option<i32> {
        match self {
            Self::Background => Some(0),
            Self::Media | Self::Meme => Some(1),
            Self::Text => Some(10),
            Self::Subtitle => Some(20),
            Self::Voiceover | Self::Sfx => None,
        }
    }

    /// `true` for slots that carry audio rather than pixels.
    pub fn is_audio(self) -> bool {
        self.z().is_none()
    }
}

/// What a layer span shows or plays.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerKind {
    /// Main media, starting at its first frame when the scene begins.
    Media {
        /// Resolved source.
        source: AssetSource,
    },
    /// Grid cell showing one meme/image for the whole scene.
    MemeCell {
        /// Resolved source.
        source: AssetSource,
        /// Cell on the canvas.
        cell: Rect,
        /// Optional slow zoom.
        zoom: Option<ZoomSpec>,
    },
    /// One sequenced meme/image with fade in/out.
    MemeSequence {
        /// Resolved source.
        source: AssetSource,
        /// Region on the canvas.
        cell: Rect,
        /// Crossfade window in frames.
        fade_frames: u64,
    },
    /// Caption overlay.
    Text {
        /// Caption text.
        text: String,
    },
    /// Narration audio.
    Voiceover {
        /// Resolved source.
        source: AssetSource,
    },
    /// Sound effect cue.
    Sfx {
        /// Resolved source.
        source: AssetSource,
        /// Offset from scene start in frames, after clamping.
        offset_frames: u64,
    },
    /// Subtitle highlighter over the scene's timestamp table.
    Subtitle {
        /// Owned timing track.
        track: TokenTrack,
    },
}

impl LayerKind {
    /// Source and its usage, for kinds that load media.
    pub fn source(&self) -> Option<(&AssetSource, AssetUsage)> {
        match self {
            Self::Media { source } => Some((source, AssetUsage::Video)),
            Self::MemeCell { source, .. } | Self::MemeSequence { source, .. } => {
                Some((source, AssetUsage::Image))
            }
            Self::Voiceover { source } => Some((source, AssetUsage::Audio)),
            Self::Sfx { source, .. } => Some((source, AssetUsage::Sfx)),
            Self::Text { .. } | Self::Subtitle { .. } => None,
        }
    }
}

/// One layer placed on the global timeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerSpan {
    /// Stack slot.
    pub slot: LayerSlot,
    /// Index among the slot's items (meme index, sfx index); 0 otherwise.
    pub item: usize,
    /// Global frames the layer occupies.
    pub range: FrameRange,
    /// Payload.
    pub kind: LayerKind,
}

/// One scene's composed stack.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenePlan {
    /// Scene number.
    pub scene_number: u32,
    /// Position in the scene list.
    pub order: usize,
    /// Allocated frames.
    pub range: FrameRange,
    /// Duration the range was derived from.
    pub duration_secs: f64,
    /// Whether voice timing was found.
    pub timed: bool,
    /// Meme layout, when the scene has a meme set.
    pub meme_layout: Option<MemeLayoutMode>,
    /// Background music for the scene, reported to audio hosts only.
    pub bgm: Option<AssetSource>,
    /// Layers in slot order.
    pub layers: Vec<LayerSpan>,
}

/// Output format reported to the rendering host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositionInfo {
    /// Composition identifier.
    pub id: String,
    /// Frame rate.
    pub fps: Fps,
    /// Frame size.
    pub canvas: Canvas,
    /// Total frames to render.
    pub duration_frames: u64,
    /// Sum of allocated scene lengths.
    pub computed_frames: u64,
}

/// The layer tree for one render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompositionPlan {
    /// Output format.
    pub info: CompositionInfo,
    /// Background spanning the whole render.
    pub background: BackgroundLoop,
    /// Scenes in render order.
    pub scenes: Vec<ScenePlan>,
}

impl CompositionPlan {
    /// All frames the host should render.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange::with_len(0, self.info.duration_frames)
    }

    /// Scene whose allocated interval contains `frame`.
    pub fn scene_at(&self, frame: FrameIndex) -> Option<&ScenePlan> {
        let i = self.scenes.partition_point(|s| s.range.end.0 <= frame.0);
        self.scenes.get(i).filter(|s| s.range.contains(frame))
    }

    /// Every media reference in the plan with its usage, in plan order (duplicates kept).
    pub fn sources(&self) -> Vec<(&AssetSource, AssetUsage)> {
        let mut out = Vec::new();
        if let Some(src) = &self.background.source {
            out.push((src, AssetUsage::Background));
        }
        for scene in &self.scenes {
            out.extend(scene.layers.iter().filter_map(|l| l.kind.source()));
            if let Some(src) = &scene.bgm {
                out.push((src, AssetUsage::Bgm));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layer.rs"]
mod tests;
