use crate::assets::resolve::{AssetPathResolver, AssetSource, AssetUsage};
use crate::compose::layer::{
    CompositionInfo, CompositionPlan, LayerKind, LayerSlot, LayerSpan, ScenePlan,
};
use crate::config::compose::{ComposeConfig, DurationPolicy};
use crate::foundation::core::{FrameRange, Fps};
use crate::memes::sequencer::{MemePlan, plan_memes};
use crate::script::model::{Scene, SceneAssetEntry, SceneScript, VoiceTiming};
use crate::subtitle::highlight::TokenTrack;
use crate::timeline::allocator::{SceneSlot, allocate_timeline};
use crate::timeline::background::select_background;
use crate::timeline::index::{AssetPlanIndex, TimingIndex};

/// Composes per-scene layer stacks against a fixed timeline.
pub struct SceneCompositor<'a> {
    cfg: &'a ComposeConfig,
    resolver: AssetPathResolver,
    timing: TimingIndex<'a>,
    assets: AssetPlanIndex<'a>,
    total_frames: u64,
}

impl<'a> SceneCompositor<'a> {
    /// Compositor over `script`'s asset plan for a render of `total_frames` frames.
    pub fn new(
        script: &'a SceneScript,
        cfg: &'a ComposeConfig,
        timing: TimingIndex<'a>,
        total_frames: u64,
    ) -> Self {
        Self {
            cfg,
            resolver: AssetPathResolver::new(cfg.local_namespace.as_str()),
            timing,
            assets: AssetPlanIndex::new(script.asset_plan.entries(), cfg.asset_join),
            total_frames,
        }
    }

    /// Build the layer stack for one scene in its allocated slot.
    ///
    /// Missing assets omit their layer; they never move other layers.
    pub fn compose_scene(&self, scene: &Scene, slot: &SceneSlot) -> ScenePlan {
        let entry = self.assets.lookup(scene.scene_number);
        if entry.is_none() {
            tracing::info!(scene = scene.scene_number, "no asset plan entry for scene");
        }
        let timing = self.timing.get(scene.scene_number);

        let mut layers = Vec::new();
        let mut meme_layout = None;
        let mut bgm = None;

        if let Some(entry) = entry {
            if let Some(source) = self
                .resolver
                .resolve_entry(entry, AssetUsage::Video)
                .into_iter()
                .next()
            {
                layers.push(LayerSpan {
                    slot: LayerSlot::Media,
                    item: 0,
                    range: slot.range,
                    kind: LayerKind::Media { source },
                });
            }

            let memes = self.meme_set(entry);
            if let Some(plan) = plan_memes(
                memes.len(),
                slot.range.len_frames(),
                self.cfg.canvas.rect(),
                &self.cfg.memes,
            ) {
                meme_layout = Some(plan.mode());
                self.push_meme_layers(&mut layers, plan, memes, slot.range);
            }

            bgm = self
                .resolver
                .resolve_entry(entry, AssetUsage::Bgm)
                .into_iter()
                .next();
        }

        let text = scene.on_screen_text.trim();
        if !text.is_empty() {
            layers.push(LayerSpan {
                slot: LayerSlot::Text,
                item: 0,
                range: slot.range,
                kind: LayerKind::Text {
                    text: text.to_string(),
                },
            });
        }

        if let Some(source) = timing.and_then(|t| self.voiceover(t)) {
            layers.push(LayerSpan {
                slot: LayerSlot::Voiceover,
                item: 0,
                range: slot.range,
                kind: LayerKind::Voiceover { source },
            });
        }

        if let Some(entry) = entry {
            self.push_sfx_layers(&mut layers, entry, slot.range);
        }

        if self.cfg.subtitles.enabled
            && let Some(track) = timing.and_then(TokenTrack::from_timing)
        {
            layers.push(LayerSpan {
                slot: LayerSlot::Subtitle,
                item: 0,
                range: slot.range,
                kind: LayerKind::Subtitle { track },
            });
        }

        ScenePlan {
            scene_number: scene.scene_number,
            order: slot.order,
            range: slot.range,
            duration_secs: slot.duration_secs,
            timed: slot.timed,
            meme_layout,
            bgm,
            layers,
        }
    }

    /// Image sources followed by meme sources, duplicates removed.
    fn meme_set(&self, entry: &SceneAssetEntry) -> Vec<AssetSource> {
        let mut set = self.resolver.resolve_entry(entry, AssetUsage::Image);
        for src in self.resolver.resolve_entry(entry, AssetUsage::Meme) {
            if !set.contains(&src) {
                set.push(src);
            }
        }
        set
    }

    fn push_meme_layers(
        &self,
        layers: &mut Vec<LayerSpan>,
        plan: MemePlan,
        memes: Vec<AssetSource>,
        scene: FrameRange,
    ) {
        match plan {
            MemePlan::Grid { items, .. } => {
                for (it, source) in items.into_iter().zip(memes) {
                    layers.push(LayerSpan {
                        slot: LayerSlot::Meme,
                        item: it.index,
                        range: scene,
                        kind: LayerKind::MemeCell {
                            source,
                            cell: it.cell,
                            zoom: it.zoom,
                        },
                    });
                }
            }
            MemePlan::Sequence { items } => {
                for it in items {
                    let Some(source) = memes.get(it.index).cloned() else {
                        continue;
                    };
                    layers.push(LayerSpan {
                        slot: LayerSlot::Meme,
                        item: it.index,
                        range: FrameRange::with_len(
                            scene.start.0 + it.local.start.0,
                            it.local.len_frames(),
                        ),
                        kind: LayerKind::MemeSequence {
                            source,
                            cell: self.cfg.canvas.rect(),
                            fade_frames: it.fade_frames,
                        },
                    });
                }
            }
        }
    }

    fn voiceover(&self, timing: &VoiceTiming) -> Option<AssetSource> {
        timing
            .audio_path
            .as_deref()
            .and_then(|p| self.resolver.resolve_str(p, AssetUsage::Audio))
    }

    fn push_sfx_layers(&self, layers: &mut Vec<LayerSpan>, entry: &SceneAssetEntry, scene: FrameRange) {
        for (item, sfx) in entry.sfx.iter().enumerate() {
            let Some(source) = sfx
                .audio_path
                .as_deref()
                .and_then(|p| self.resolver.resolve_str(p, AssetUsage::Sfx))
            else {
                continue;
            };
            let offset_frames = sfx_offset_frames(sfx.timestamp_offset, self.cfg.fps);
            let start = scene.start.0.saturating_add(offset_frames);
            if start >= self.total_frames {
                tracing::debug!(
                    item,
                    start,
                    total = self.total_frames,
                    "dropping sfx cue past the end of the composition"
                );
                continue;
            }
            layers.push(LayerSpan {
                slot: LayerSlot::Sfx,
                item,
                range: FrameRange::with_len(start, self.total_frames - start),
                kind: LayerKind::Sfx {
                    source,
                    offset_frames,
                },
            });
        }
    }
}

/// `max(0, floor(offset * fps))`; malformed offsets count as 0.
pub fn sfx_offset_frames(offset_secs: f64, fps: Fps) -> u64 {
    fps.secs_to_frames_floor(offset_secs)
}

/// Total frame count under `policy`.
pub fn composition_duration(
    policy: DurationPolicy,
    script_total_secs: Option<f64>,
    computed_frames: u64,
    fps: Fps,
) -> u64 {
    match policy {
        DurationPolicy::Computed => computed_frames,
        DurationPolicy::ScriptTotal => match script_total_secs {
            Some(secs) if secs.is_finite() && secs > 0.0 => fps.secs_to_frames_ceil(secs),
            _ => computed_frames,
        },
        DurationPolicy::Fixed { frames } => frames,
    }
}

/// Compose the full layer tree for `script`.
///
/// Pure: the same inputs always produce the same plan.
pub fn compose(script: &SceneScript, cfg: &ComposeConfig) -> CompositionPlan {
    let timing = TimingIndex::new(&script.voice_timing);
    let timeline = allocate_timeline(&script.scenes, &timing, cfg.fallback_scene_secs, cfg.fps);
    let duration_frames = composition_duration(
        cfg.duration,
        script.total_duration,
        timeline.total_frames,
        cfg.fps,
    );

    let compositor = SceneCompositor::new(script, cfg, timing, duration_frames);
    let scenes = script
        .scenes
        .iter()
        .zip(&timeline.slots)
        .map(|(scene, slot)| compositor.compose_scene(scene, slot))
        .collect();

    CompositionPlan {
        info: CompositionInfo {
            id: cfg.composition_id.clone(),
            fps: cfg.fps,
            canvas: cfg.canvas,
            duration_frames,
            computed_frames: timeline.total_frames,
        },
        background: select_background(script, &cfg.background, cfg.fps, &compositor.resolver),
        scenes,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
