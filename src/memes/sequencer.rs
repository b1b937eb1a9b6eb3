use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::config::compose::{MemeConfig, MemeLayoutChoice};
use crate::foundation::core::{FrameIndex, FrameRange, Rect};
use crate::memes::grid::{GridDims, grid_cells, grid_dims};

/// Resolved layout for a scene's meme set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemeLayoutMode {
    /// All items at once, one per cell.
    Grid,
    /// One item after another with crossfades.
    Sequence,
}

/// Pick a layout: forced choices win, otherwise grid up to `grid_max_items`.
pub fn choose_layout(choice: MemeLayoutChoice, count: usize, grid_max_items: usize) -> MemeLayoutMode {
    match choice {
        MemeLayoutChoice::Grid => MemeLayoutMode::Grid,
        MemeLayoutChoice::Sequence => MemeLayoutMode::Sequence,
        MemeLayoutChoice::Auto if count <= grid_max_items => MemeLayoutMode::Grid,
        MemeLayoutChoice::Auto => MemeLayoutMode::Sequence,
    }
}

/// Slow zoom over the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomSpec {
    /// Scale at the first frame.
    pub from: f64,
    /// Scale at the last frame.
    pub to: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl ZoomSpec {
    /// Zoom for grid cell `index`: even cells zoom in, odd cells zoom out.
    pub fn for_cell(index: usize, amount: f64, ease: Ease) -> Self {
        let (from, to) = if index % 2 == 0 {
            (1.0, 1.0 + amount)
        } else {
            (1.0 + amount, 1.0)
        };
        Self { from, to, ease }
    }

    /// Scale at local frame `local` of a `len`-frame span.
    pub fn scale_at(&self, local: u64, len: u64) -> f64 {
        let t = if len > 1 {
            local as f64 / (len - 1) as f64
        } else {
            0.0
        };
        self.ease.lerp(self.from, self.to, t)
    }
}

/// One grid item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    /// Item index in the meme set.
    pub index: usize,
    /// Cell on the canvas.
    pub cell: Rect,
    /// Optional slow zoom.
    pub zoom: Option<ZoomSpec>,
}

/// One sequenced item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceItem {
    /// Item index in the meme set.
    pub index: usize,
    /// Segment, in scene-local frames.
    pub local: FrameRange,
    /// Crossfade window in frames.
    pub fade_frames: u64,
}

impl SequenceItem {
    /// Opacity at scene-local frame `local`; `None` outside the segment.
    pub fn opacity_at(&self, local: u64) -> Option<f64> {
        let l = self.local.local(FrameIndex(local))?;
        Some(sequence_opacity(l, self.local.len_frames(), self.fade_frames))
    }
}

/// Layout for one scene's meme set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MemePlan {
    /// Grid layout spanning the whole scene.
    Grid {
        /// Grid shape.
        dims: GridDims,
        /// Items in cell order.
        items: Vec<GridItem>,
    },
    /// Sequenced layout; zero-length segments are omitted.
    Sequence {
        /// Items in play order.
        items: Vec<SequenceItem>,
    },
}

impl MemePlan {
    /// Layout mode of this plan.
    pub fn mode(&self) -> MemeLayoutMode {
        match self {
            Self::Grid { .. } => MemeLayoutMode::Grid,
            Self::Sequence { .. } => MemeLayoutMode::Sequence,
        }
    }
}

/// Plan `count` items over a `scene_len`-frame scene. `None` when there is nothing to show.
pub fn plan_memes(count: usize, scene_len: u64, area: Rect, cfg: &MemeConfig) -> Option<MemePlan> {
    if count == 0 || scene_len == 0 {
        return None;
    }
    Some(match choose_layout(cfg.layout, count, cfg.grid_max_items) {
        MemeLayoutMode::Grid => MemePlan::Grid {
            dims: grid_dims(count),
            items: grid_cells(count, area)
                .into_iter()
                .enumerate()
                .map(|(index, cell)| GridItem {
                    index,
                    cell,
                    zoom: cfg
                        .zoom
                        .then(|| ZoomSpec::for_cell(index, cfg.zoom_amount, cfg.zoom_ease)),
                })
                .collect(),
        },
        MemeLayoutMode::Sequence => {
            let seg_base = scene_len / count as u64;
            MemePlan::Sequence {
                items: split_segments(scene_len, count)
                    .into_iter()
                    .enumerate()
                    .filter(|(_, r)| !r.is_empty())
                    .map(|(index, local)| SequenceItem {
                        index,
                        local,
                        fade_frames: crossfade_frames(
                            seg_base,
                            local.len_frames(),
                            cfg.crossfade_fraction,
                        ),
                    })
                    .collect(),
            }
        }
    })
}

/// Split `len` frames into `n` consecutive local segments; the last absorbs the remainder.
pub fn split_segments(len: u64, n: usize) -> Vec<FrameRange> {
    if n == 0 {
        return Vec::new();
    }
    let n = n as u64;
    let base = len / n;
    (0..n)
        .map(|i| {
            let start = i * base;
            let seg = if i + 1 == n { len - start } else { base };
            FrameRange::with_len(start, seg)
        })
        .collect()
}

/// Crossfade window: `fraction` of the base segment, capped at half of this segment.
pub fn crossfade_frames(seg_base: u64, seg_len: u64, fraction: f64) -> u64 {
    let want = if fraction.is_finite() && fraction > 0.0 {
        (seg_base as f64 * fraction).floor() as u64
    } else {
        0
    };
    want.min(seg_len / 2)
}

/// Piecewise-linear opacity at local frame `l` of a segment of length `len` with window `w`.
pub fn sequence_opacity(l: u64, len: u64, w: u64) -> f64 {
    if l >= len {
        return 0.0;
    }
    if w == 0 {
        return 1.0;
    }
    let w = w as f64;
    let rise = l as f64 / w;
    let fall = (len - l) as f64 / w;
    rise.min(fall).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/memes/sequencer.rs"]
mod tests;
