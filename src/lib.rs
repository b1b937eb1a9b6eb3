//! Reelwright composes short-form vertical videos from a scene script.
//!
//! A scene script is the JSON document an upstream content pipeline emits: ordered narrated scenes,
//! measured voice timing per scene and a loosely keyed asset plan. Reelwright turns it into a
//! deterministic frame timeline and answers, for any frame, which layers are visible, in what
//! order, with which opacity and scale, and which audio cues are active.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `JSON -> SceneScript`, tolerant of the shapes upstream actually emits
//! 2. **Allocate**: voice timing durations become contiguous per-scene frame intervals
//! 3. **Compose**: `SceneScript + ComposeConfig -> CompositionPlan` (fixed layer stack per scene)
//! 4. **Evaluate**: `CompositionPlan + FrameIndex -> EvaluatedFrame`
//!
//! Evaluation is pure. Media probing is front-loaded in [`RenderSession::preflight`]; failed
//! sources are remembered and evaluate as blank layers instead of aborting the frame.
//!
//! Pixel rendering, encoding and audio mixing live outside this crate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod audio;
mod compile;
mod compose;
mod config;
mod eval;
mod foundation;
mod memes;
mod script;
mod session;
mod subtitle;
mod timeline;

pub use animation::ease::Ease;
pub use assets::loader::{
    FsMediaLoader, MediaFailures, MediaLoadFailure, MediaLoader, preflight,
};
pub use assets::resolve::{
    AssetPathResolver, AssetSource, AssetUsage, ENTRY_RULES, EntryRule, Rejection,
};
pub use audio::manifest::{AudioCue, AudioCueKind, AudioManifest, build_audio_manifest};
pub use compile::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use compose::compositor::{
    SceneCompositor, compose, composition_duration, sfx_offset_frames,
};
pub use compose::layer::{
    CompositionInfo, CompositionPlan, LayerKind, LayerSlot, LayerSpan, ScenePlan,
};
pub use config::compose::{
    AssetJoinMode, BackgroundConfig, ComposeConfig, DurationPolicy, MemeConfig, MemeLayoutChoice,
    SubtitleConfig,
};
pub use eval::evaluator::{EvaluatedAudio, EvaluatedFrame, EvaluatedLayer, Evaluator, LayerContent};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Size};
pub use foundation::error::{ReelError, ReelResult};
pub use memes::grid::{GridDims, grid_cells, grid_dims};
pub use memes::sequencer::{
    GridItem, MemeLayoutMode, MemePlan, SequenceItem, ZoomSpec, choose_layout, crossfade_frames,
    plan_memes, sequence_opacity, split_segments,
};
pub use script::descriptor::{AssetDescriptor, DescriptorKind, PathField};
pub use script::model::{
    AssetDescriptorDef, AssetPlan, AssetRef, AssetRefObject, Scene, SceneAssetEntry, SceneScript,
    SfxAsset, TimedToken, VoiceTiming,
};
pub use session::render_session::{RangeStats, RenderSession, RenderSessionOpts};
pub use subtitle::highlight::{
    ActiveToken, TokenTable, TokenTrack, active_table, token_at,
};
pub use timeline::allocator::{SceneSlot, Timeline, allocate_timeline, scene_length_frames};
pub use timeline::background::{BackgroundLoop, background_offset_frames, select_background};
pub use timeline::index::{AssetPlanIndex, TimingIndex, entry_key};
