use super::*;
use crate::compose::compositor::compose;
use crate::config::compose::{ComposeConfig, DurationPolicy};
use crate::script::model::SceneScript;

fn script() -> SceneScript {
    SceneScript::from_json_str(
        r#"{
            "scenes": [{"scene_number": 1}, {"scene_number": 2}],
            "asset_plan": [
                {"scene_name": "Scene 1", "bgm": "music/bed.mp3",
                 "sfx": [{"timestamp_offset": 0.5, "audio_path": "sfx/pop.mp3"}]},
                {"scene_name": "Scene 2", "bgm": {"path": "https://cdn/bed2.mp3"}}
            ],
            "voice_timing": [
                {"scene_id": 1, "audio_path": "audio/s1.mp3", "duration_seconds": 1.0},
                {"scene_id": 2, "audio_path": "audio/s2.mp3", "duration_seconds": 2.0}
            ]
        }"#,
    )
    .unwrap()
}

fn summary(m: &AudioManifest) -> Vec<(AudioCueKind, u32, u64, u64)> {
    m.cues
        .iter()
        .map(|c| (c.kind, c.scene_number, c.range.start.0, c.range.end.0))
        .collect()
}

#[test]
fn manifest_lists_every_cue_in_start_order() {
    let plan = compose(&script(), &ComposeConfig::default());
    let m = build_audio_manifest(&plan);
    assert_eq!(m.duration_frames, 90);
    assert_eq!(
        summary(&m),
        vec![
            (AudioCueKind::Voiceover, 1, 0, 30),
            (AudioCueKind::Bgm, 1, 0, 30),
            (AudioCueKind::Sfx, 1, 15, 90),
            (AudioCueKind::Voiceover, 2, 30, 90),
            (AudioCueKind::Bgm, 2, 30, 90),
        ]
    );
    let sfx = &m.cues[2];
    assert_eq!(sfx.start_secs, 0.5);
    assert_eq!(sfx.end_secs, 3.0);
}

#[test]
fn cues_are_clipped_to_a_shorter_render() {
    let cfg = ComposeConfig {
        duration: DurationPolicy::Fixed { frames: 40 },
        ..ComposeConfig::default()
    };
    let plan = compose(&script(), &cfg);
    let m = build_audio_manifest(&plan);
    assert!(m.cues.iter().all(|c| c.range.end.0 <= 40));
    let vo2 = m
        .cues
        .iter()
        .find(|c| c.kind == AudioCueKind::Voiceover && c.scene_number == 2)
        .unwrap();
    assert_eq!(vo2.range, FrameRange::with_len(30, 10));
}
