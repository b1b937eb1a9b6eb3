use serde::Serialize;
use smallvec::SmallVec;

use crate::assets::loader::MediaFailures;
use crate::assets::resolve::AssetSource;
use crate::compose::layer::{CompositionPlan, LayerKind, LayerSlot, LayerSpan, ScenePlan};
use crate::foundation::core::{FrameIndex, Rect};
use crate::memes::sequencer::sequence_opacity;
use crate::subtitle::highlight::TokenTable;

/// Everything visible and audible at one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Scene whose interval contains the frame, if any.
    pub scene_number: Option<u32>,
    /// Visual layers in painter's order.
    pub layers: SmallVec<[EvaluatedLayer; 8]>,
    /// Active audio cues ordered by slot, scene, then item.
    pub audio: SmallVec<[EvaluatedAudio; 4]>,
}

/// One visual layer at one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluatedLayer {
    /// Stack slot.
    pub slot: LayerSlot,
    /// Painter's z.
    pub z: i32,
    /// Owning scene; `None` for the background.
    pub scene_number: Option<u32>,
    /// Index among the slot's items.
    pub item: usize,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Media failed to load: draw nothing in this slot.
    pub blank: bool,
    /// Payload.
    pub content: LayerContent,
}

/// Sampled payload of a visual layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerContent {
    /// Background video frame.
    Background {
        /// Source.
        source: AssetSource,
        /// Frame of the source to show.
        source_frame: u64,
    },
    /// Main media frame.
    Media {
        /// Source.
        source: AssetSource,
        /// Frame of the source to show.
        source_frame: u64,
    },
    /// Meme/image placement.
    Meme {
        /// Source.
        source: AssetSource,
        /// Region on the canvas.
        cell: Rect,
        /// Zoom scale (1 when not zooming).
        scale: f64,
    },
    /// Caption overlay.
    Text {
        /// Caption text.
        text: String,
    },
    /// Highlighted subtitle token.
    Subtitle {
        /// Token text.
        token: String,
        /// Source table.
        table: TokenTable,
        /// Index in the table.
        index: usize,
        /// Token start in scene seconds.
        start_secs: f64,
        /// Token end in scene seconds.
        end_secs: f64,
    },
}

/// One audio cue playing at one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluatedAudio {
    /// `Voiceover` or `Sfx`.
    pub slot: LayerSlot,
    /// Owning scene.
    pub scene_number: u32,
    /// Index among the slot's items.
    pub item: usize,
    /// Source.
    pub source: AssetSource,
    /// Frames since the cue started.
    pub cue_frame: u64,
    /// Media failed to load.
    pub blank: bool,
}

/// Stateless evaluator from composition plan to per-frame layer stack.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate one frame. Frames at or past the composition length are empty.
    #[tracing::instrument(skip(plan, failures))]
    pub fn eval_frame(
        plan: &CompositionPlan,
        frame: FrameIndex,
        failures: Option<&MediaFailures>,
    ) -> EvaluatedFrame {
        let mut out = EvaluatedFrame {
            frame,
            scene_number: None,
            layers: SmallVec::new(),
            audio: SmallVec::new(),
        };
        if frame.0 >= plan.info.duration_frames {
            return out;
        }
        out.scene_number = plan.scene_at(frame).map(|s| s.scene_number);

        let blank = |src: &AssetSource| failures.is_some_and(|f| f.is_failed(src));
        let mut keyed: SmallVec<[((i32, u8, usize, usize), EvaluatedLayer); 8]> = SmallVec::new();
        let mut audio: SmallVec<[((u8, usize, usize), EvaluatedAudio); 4]> = SmallVec::new();

        if let Some(source) = &plan.background.source {
            let layer = EvaluatedLayer {
                slot: LayerSlot::Background,
                z: 0,
                scene_number: None,
                item: 0,
                opacity: 1.0,
                blank: blank(source),
                content: LayerContent::Background {
                    source: source.clone(),
                    source_frame: plan.background.source_frame(frame),
                },
            };
            keyed.push(((layer.z, LayerSlot::Background.index(), 0, 0), layer));
        }

        for scene in &plan.scenes {
            for span in &scene.layers {
                let Some(local) = span.range.local(frame) else {
                    continue;
                };
                if span.slot.is_audio() {
                    if let Some(a) = eval_audio(scene, span, local, &blank) {
                        audio.push(((span.slot.index(), scene.order, span.item), a));
                    }
                    continue;
                }
                if let Some(layer) = eval_layer(plan, scene, span, local, &blank) {
                    let key = (layer.z, span.slot.index(), scene.order, span.item);
                    keyed.push((key, layer));
                }
            }
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        audio.sort_by(|a, b| a.0.cmp(&b.0));
        out.layers = keyed.into_iter().map(|(_, l)| l).collect();
        out.audio = audio.into_iter().map(|(_, a)| a).collect();
        out
    }
}

fn eval_layer(
    plan: &CompositionPlan,
    scene: &ScenePlan,
    span: &LayerSpan,
    local: u64,
    blank: &dyn Fn(&AssetSource) -> bool,
) -> Option<EvaluatedLayer> {
    let z = span.slot.z()?;
    let (opacity, is_blank, content) = match &span.kind {
        LayerKind::Media { source } => (
            1.0,
            blank(source),
            LayerContent::Media {
                source: source.clone(),
                source_frame: local,
            },
        ),
        LayerKind::MemeCell { source, cell, zoom } => (
            1.0,
            blank(source),
            LayerContent::Meme {
                source: source.clone(),
                cell: *cell,
                scale: zoom.map_or(1.0, |z| z.scale_at(local, span.range.len_frames())),
            },
        ),
        LayerKind::MemeSequence {
            source,
            cell,
            fade_frames,
        } => {
            let opacity = sequence_opacity(
                local,
                span.range.len_frames(),
                *fade_frames,
            );
            if opacity <= 0.0 {
                return None;
            }
            (
                opacity,
                blank(source),
                LayerContent::Meme {
                    source: source.clone(),
                    cell: *cell,
                    scale: 1.0,
                },
            )
        }
        LayerKind::Text { text } => (1.0, false, LayerContent::Text { text: text.clone() }),
        LayerKind::Subtitle { track } => {
            let active = track.active_at(local, plan.info.fps)?;
            (
                1.0,
                false,
                LayerContent::Subtitle {
                    token: active.token.token.clone(),
                    table: active.table,
                    index: active.index,
                    start_secs: active.token.start,
                    end_secs: active.token.end,
                },
            )
        }
        LayerKind::Voiceover { .. } | LayerKind::Sfx { .. } => return None,
    };
    Some(EvaluatedLayer {
        slot: span.slot,
        z,
        scene_number: Some(scene.scene_number),
        item: span.item,
        opacity,
        blank: is_blank,
        content,
    })
}

fn eval_audio(
    scene: &ScenePlan,
    span: &LayerSpan,
    local: u64,
    blank: &dyn Fn(&AssetSource) -> bool,
) -> Option<EvaluatedAudio> {
    let source = match &span.kind {
        LayerKind::Voiceover { source } | LayerKind::Sfx { source, .. } => source,
        _ => return None,
    };
    Some(EvaluatedAudio {
        slot: span.slot,
        scene_number: scene.scene_number,
        item: span.item,
        source: source.clone(),
        cue_frame: local,
        blank: blank(source),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
