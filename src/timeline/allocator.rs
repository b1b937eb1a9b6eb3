use serde::Serialize;

use crate::foundation::core::{FrameIndex, FrameRange, Fps};
use crate::script::model::Scene;
use crate::timeline::index::TimingIndex;

/// One scene's allocated interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SceneSlot {
    /// Scene number (join key).
    pub scene_number: u32,
    /// Position in the scene list.
    pub order: usize,
    /// Allocated frames.
    pub range: FrameRange,
    /// Duration the length was derived from, in seconds.
    pub duration_secs: f64,
    /// Whether the duration came from voice timing (vs. the fallback).
    pub timed: bool,
}

/// Contiguous, non-overlapping scene intervals in render order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Timeline {
    /// Slots in scene order.
    pub slots: Vec<SceneSlot>,
    /// Final cursor: sum of all slot lengths.
    pub total_frames: u64,
}

impl Timeline {
    /// Slot containing `frame`, if any.
    pub fn slot_at(&self, frame: FrameIndex) -> Option<&SceneSlot> {
        let i = self.slots.partition_point(|s| s.range.end.0 <= frame.0);
        self.slots.get(i).filter(|s| s.range.contains(frame))
    }

    /// First slot allocated to `scene_number`.
    pub fn slot_for(&self, scene_number: u32) -> Option<&SceneSlot> {
        self.slots.iter().find(|s| s.scene_number == scene_number)
    }
}

/// Frame length for a duration: `ceil(duration * fps)`, at least 1.
pub fn scene_length_frames(duration_secs: f64, fps: Fps) -> u64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 1;
    }
    fps.secs_to_frames_ceil(duration_secs).max(1)
}

/// Assign every scene a frame interval, in order.
pub fn allocate_timeline(
    scenes: &[Scene],
    timing: &TimingIndex<'_>,
    fallback_secs: f64,
    fps: Fps,
) -> Timeline {
    let (slots, total_frames) = scenes.iter().enumerate().fold(
        (Vec::with_capacity(scenes.len()), 0u64),
        |(mut slots, cursor), (order, scene)| {
            let timed = timing.duration_secs(scene.scene_number);
            if timed.is_none() {
                tracing::info!(
                    scene = scene.scene_number,
                    fallback_secs,
                    "no voice timing for scene; using fallback duration"
                );
            }
            let duration_secs = timed.unwrap_or(fallback_secs);
            let len = scene_length_frames(duration_secs, fps);
            slots.push(SceneSlot {
                scene_number: scene.scene_number,
                order,
                range: FrameRange::with_len(cursor, len),
                duration_secs,
                timed: timed.is_some(),
            });
            (slots, cursor.saturating_add(len))
        },
    );
    Timeline {
        slots,
        total_frames,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/allocator.rs"]
mod tests;
