use super::*;
use crate::script::model::Scene;

fn script(narration: &str) -> SceneScript {
    SceneScript {
        scenes: vec![Scene {
            scene_number: 1,
            dialogue_vo: narration.to_string(),
            ..Scene::default()
        }],
        ..SceneScript::default()
    }
}

#[test]
fn offset_is_deterministic_and_bounded() {
    let fps = Fps::default();
    let a = background_offset_frames("Did you know octopuses have three hearts?", 1200, fps);
    let b = background_offset_frames("Did you know octopuses have three hearts?", 1200, fps);
    assert_eq!(a, b);
    assert!(a < 1200 * 30);
}

#[test]
fn different_seeds_usually_differ() {
    let fps = Fps::default();
    let offsets: std::collections::BTreeSet<u64> = (0..16)
        .map(|i| background_offset_frames(&format!("seed {i}"), 1200, fps))
        .collect();
    assert!(offsets.len() > 1);
}

#[test]
fn zero_span_gives_zero_offset() {
    assert_eq!(background_offset_frames("x", 0, Fps::default()), 0);
}

#[test]
fn empty_script_uses_default_seed() {
    let cfg = BackgroundConfig::default();
    let fps = Fps::default();
    let r = AssetPathResolver::default();
    let bg = select_background(&SceneScript::default(), &cfg, fps, &r);
    assert_eq!(
        bg.offset_frames,
        background_offset_frames("reelwright-background", 1200, fps)
    );
    assert_eq!(
        bg.source,
        Some(AssetSource::Local(
            "vol/stock/gameplay/background_loop.mp4".to_string()
        ))
    );
}

#[test]
fn seed_follows_first_narration() {
    let cfg = BackgroundConfig::default();
    let fps = Fps::default();
    let r = AssetPathResolver::default();
    let a = select_background(&script("alpha"), &cfg, fps, &r);
    assert_eq!(a.offset_frames, background_offset_frames("alpha", 1200, fps));
    assert_eq!(a, select_background(&script("alpha"), &cfg, fps, &r));
}

#[test]
fn source_frame_wraps_when_length_known() {
    let bg = BackgroundLoop {
        source: None,
        offset_frames: 90,
        loop_frames: Some(100),
    };
    assert_eq!(bg.source_frame(FrameIndex(0)), 90);
    assert_eq!(bg.source_frame(FrameIndex(15)), 5);

    let open = BackgroundLoop {
        loop_frames: None,
        ..bg
    };
    assert_eq!(open.source_frame(FrameIndex(15)), 105);
}
