use super::*;
use crate::compose::compositor::compose;
use crate::config::compose::{ComposeConfig, MemeLayoutChoice};
use crate::script::model::SceneScript;

fn script() -> SceneScript {
    SceneScript::from_json_str(
        r#"{
            "scenes": [
                {"scene_number": 1, "dialogue_vo": "hi there", "on_screen_text": "Hook!"},
                {"scene_number": 2, "dialogue_vo": "more"}
            ],
            "asset_plan": [
                {
                    "scene_name": "Scene 1",
                    "video_asset": "clips/one.mp4",
                    "meme_asset": ["m1.png", "m2.png"],
                    "sfx": [{"description": "pop", "timestamp_offset": 0.5, "audio_path": "sfx/pop.mp3"}]
                }
            ],
            "voice_timing": [
                {
                    "scene_id": 1, "audio_path": "audio/s1.mp3", "duration_seconds": 1.0,
                    "word_timestamps": [
                        {"word": "hi", "start": 0.0, "end": 0.4},
                        {"word": "there", "start": 0.5, "end": 0.9}
                    ]
                },
                {"scene_id": 2, "audio_path": "audio/s2.mp3", "duration_seconds": 1.0}
            ]
        }"#,
    )
    .unwrap()
}

fn plan_with(layout: MemeLayoutChoice) -> CompositionPlan {
    let mut cfg = ComposeConfig::default();
    cfg.memes.layout = layout;
    compose(&script(), &cfg)
}

fn slots(f: &EvaluatedFrame) -> Vec<LayerSlot> {
    f.layers.iter().map(|l| l.slot).collect()
}

#[test]
fn layers_are_in_painters_order() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    let f = Evaluator::eval_frame(&plan, FrameIndex(6), None);
    assert_eq!(f.scene_number, Some(1));
    assert_eq!(
        slots(&f),
        vec![
            LayerSlot::Background,
            LayerSlot::Media,
            LayerSlot::Meme,
            LayerSlot::Meme,
            LayerSlot::Text,
            LayerSlot::Subtitle,
        ]
    );
    let z: Vec<i32> = f.layers.iter().map(|l| l.z).collect();
    assert!(z.windows(2).all(|w| w[0] <= w[1]));
    match &f.layers.last().unwrap().content {
        LayerContent::Subtitle { token, index, .. } => {
            assert_eq!(token, "hi");
            assert_eq!(*index, 0);
        }
        other => panic!("expected subtitle, got {other:?}"),
    }
}

#[test]
fn subtitle_gap_drops_only_the_subtitle() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    let f = Evaluator::eval_frame(&plan, FrameIndex(14), None);
    assert!(!slots(&f).contains(&LayerSlot::Subtitle));
    assert!(slots(&f).contains(&LayerSlot::Text));
}

#[test]
fn media_and_background_frames_advance() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    let f = Evaluator::eval_frame(&plan, FrameIndex(10), None);
    let offset = plan.background.offset_frames;
    match &f.layers[0].content {
        LayerContent::Background { source_frame, .. } => assert_eq!(*source_frame, offset + 10),
        other => panic!("expected background, got {other:?}"),
    }
    match &f.layers[1].content {
        LayerContent::Media { source_frame, .. } => assert_eq!(*source_frame, 10),
        other => panic!("expected media, got {other:?}"),
    }
}

#[test]
fn audio_cues_overlap_scene_boundaries() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    let f = Evaluator::eval_frame(&plan, FrameIndex(40), None);
    assert_eq!(f.scene_number, Some(2));
    let cues: Vec<(LayerSlot, u32, u64)> = f
        .audio
        .iter()
        .map(|a| (a.slot, a.scene_number, a.cue_frame))
        .collect();
    assert_eq!(
        cues,
        vec![(LayerSlot::Voiceover, 2, 10), (LayerSlot::Sfx, 1, 25)]
    );
}

#[test]
fn sequence_memes_fade_and_hide_at_segment_start() {
    let plan = plan_with(MemeLayoutChoice::Sequence);
    let memes = |frame: u64| -> Vec<(usize, f64)> {
        Evaluator::eval_frame(&plan, FrameIndex(frame), None)
            .layers
            .iter()
            .filter(|l| l.slot == LayerSlot::Meme)
            .map(|l| (l.item, l.opacity))
            .collect()
    };
    // Two items over 30 frames: segments [0,15) and [15,30), window floor(15 * 0.15) = 2.
    assert!(memes(0).is_empty());
    assert_eq!(memes(1), vec![(0, 0.5)]);
    assert_eq!(memes(7), vec![(0, 1.0)]);
    assert!(memes(15).is_empty());
    assert_eq!(memes(20), vec![(1, 1.0)]);
}

#[test]
fn failed_media_is_flagged_blank() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    let mut failures = MediaFailures::default();
    failures.mark(AssetSource::Local("vol/clips/one.mp4".to_string()));
    failures.mark(AssetSource::Local("vol/audio/s1.mp3".to_string()));
    let f = Evaluator::eval_frame(&plan, FrameIndex(3), Some(&failures));
    let media = f.layers.iter().find(|l| l.slot == LayerSlot::Media).unwrap();
    assert!(media.blank);
    assert!(f.layers.iter().filter(|l| l.slot == LayerSlot::Meme).all(|l| !l.blank));
    assert!(f.audio[0].blank);
}

#[test]
fn frames_past_the_end_are_empty() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    let f = Evaluator::eval_frame(&plan, FrameIndex(plan.info.duration_frames), None);
    assert!(f.layers.is_empty());
    assert!(f.audio.is_empty());
    assert_eq!(f.scene_number, None);
}

#[test]
fn evaluation_is_idempotent() {
    let plan = plan_with(MemeLayoutChoice::Auto);
    for frame in [0, 6, 14, 27, 40, 59] {
        let a = Evaluator::eval_frame(&plan, FrameIndex(frame), None);
        let b = Evaluator::eval_frame(&plan, FrameIndex(frame), None);
        assert_eq!(a, b);
    }
}
