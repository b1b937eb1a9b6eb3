use serde::Serialize;

use crate::assets::resolve::{AssetPathResolver, AssetSource, AssetUsage};
use crate::config::compose::BackgroundConfig;
use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::math::stable_hash64;
use crate::script::model::SceneScript;

/// The looping background chosen for one render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackgroundLoop {
    /// Resolved background media, if the configured source resolves.
    pub source: Option<AssetSource>,
    /// Start offset into the asset, in frames.
    pub offset_frames: u64,
    /// Asset length in frames; source frames wrap when known.
    pub loop_frames: Option<u64>,
}

impl BackgroundLoop {
    /// Source frame shown at timeline frame `frame`.
    pub fn source_frame(&self, frame: FrameIndex) -> u64 {
        let f = self.offset_frames.saturating_add(frame.0);
        match self.loop_frames {
            Some(n) if n > 0 => f % n,
            _ => f,
        }
    }
}

/// Deterministic start offset in `[0, max_offset_secs * fps)` frames seeded by `seed`.
pub fn background_offset_frames(seed: &str, max_offset_secs: u32, fps: Fps) -> u64 {
    let span = fps.secs_to_frames_floor(f64::from(max_offset_secs));
    if span == 0 {
        return 0;
    }
    stable_hash64(seed.as_bytes()) % span
}

/// Pick the background for `script`: seeded by the first narration, else the configured default.
pub fn select_background(
    script: &SceneScript,
    cfg: &BackgroundConfig,
    fps: Fps,
    resolver: &AssetPathResolver,
) -> BackgroundLoop {
    let seed = script
        .background_seed_text()
        .unwrap_or(cfg.default_seed.as_str());
    BackgroundLoop {
        source: resolver.resolve_str(&cfg.source, AssetUsage::Background),
        offset_frames: background_offset_frames(seed, cfg.max_offset_secs, fps),
        loop_frames: cfg.loop_frames,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/background.rs"]
mod tests;
