use serde::Serialize;

use crate::assets::resolve::AssetSource;
use crate::compose::layer::{CompositionPlan, LayerKind};
use crate::foundation::core::{FrameRange, Fps};

/// What an audio cue is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCueKind {
    /// Scene narration.
    Voiceover,
    /// Sound effect.
    Sfx,
    /// Per-scene background music.
    Bgm,
}

/// One audio cue on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AudioCue {
    /// Cue kind.
    pub kind: AudioCueKind,
    /// Owning scene.
    pub scene_number: u32,
    /// Index among the scene's cues of this kind.
    pub item: usize,
    /// Audio source.
    pub source: AssetSource,
    /// Timeline frames the cue may play over.
    pub range: FrameRange,
    /// Timeline start in seconds.
    pub start_secs: f64,
    /// Timeline end in seconds.
    pub end_secs: f64,
}

/// Every audio cue of a render, ordered by start frame then kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AudioManifest {
    /// Frame rate the ranges are expressed in.
    pub fps: Fps,
    /// Composition length in frames.
    pub duration_frames: u64,
    /// Cues.
    pub cues: Vec<AudioCue>,
}

/// Collect the audio cues of `plan`, clipped to the composition length.
pub fn build_audio_manifest(plan: &CompositionPlan) -> AudioManifest {
    let fps = plan.info.fps;
    let total = plan.frame_range();
    let mut cues = Vec::new();

    for scene in &plan.scenes {
        let mut push = |kind: AudioCueKind, item: usize, source: &AssetSource, range: FrameRange| {
            let Some(range) = range.intersect(total) else {
                return;
            };
            cues.push(AudioCue {
                kind,
                scene_number: scene.scene_number,
                item,
                source: source.clone(),
                range,
                start_secs: fps.frames_to_secs(range.start.0),
                end_secs: fps.frames_to_secs(range.end.0),
            });
        };

        for span in &scene.layers {
            match &span.kind {
                LayerKind::Voiceover { source } => {
                    push(AudioCueKind::Voiceover, span.item, source, span.range)
                }
                LayerKind::Sfx { source, .. } => push(AudioCueKind::Sfx, span.item, source, span.range),
                _ => {}
            }
        }
        if let Some(source) = &scene.bgm {
            push(AudioCueKind::Bgm, 0, source, scene.range);
        }
    }

    cues.sort_by(|a, b| {
        (a.range.start, a.kind, a.scene_number, a.item).cmp(&(
            b.range.start,
            b.kind,
            b.scene_number,
            b.item,
        ))
    });

    AudioManifest {
        fps,
        duration_frames: plan.info.duration_frames,
        cues,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/manifest.rs"]
mod tests;
