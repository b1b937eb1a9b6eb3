use super::*;

fn timing(id: Option<u32>, secs: f64) -> VoiceTiming {
    VoiceTiming {
        scene_id: id,
        duration_seconds: secs,
        ..VoiceTiming::default()
    }
}

fn entry(name: &str, number: Option<u32>) -> SceneAssetEntry {
    SceneAssetEntry {
        scene_name: name.to_string(),
        scene_number: number,
        ..SceneAssetEntry::default()
    }
}

#[test]
fn timing_index_skips_idless_and_keeps_first_duplicate() {
    let table = vec![
        timing(Some(1), 2.0),
        timing(None, 9.0),
        timing(Some(1), 7.0),
        timing(Some(2), 3.0),
    ];
    let idx = TimingIndex::new(&table);
    assert_eq!(idx.len(), 2);
    assert_eq!(idx.duration_secs(1), Some(2.0));
    assert_eq!(idx.duration_secs(2), Some(3.0));
    assert_eq!(idx.duration_secs(3), None);
}

#[test]
fn entry_key_prefers_explicit_number_then_last_digit_run() {
    assert_eq!(entry_key(&entry("Scene 10", None)), Some(10));
    assert_eq!(entry_key(&entry("scene_003", None)), Some(3));
    assert_eq!(entry_key(&entry("v2 scene 7 (final)", None)), Some(7));
    assert_eq!(entry_key(&entry("Scene 10", Some(4))), Some(4));
    assert_eq!(entry_key(&entry("Intro", None)), None);
}

#[test]
fn exact_join_does_not_confuse_one_with_ten() {
    let plan = vec![entry("Scene 10", None), entry("Scene 1", None)];
    let idx = AssetPlanIndex::new(&plan, AssetJoinMode::ExactThenSubstring);
    assert_eq!(idx.lookup(1).unwrap().scene_name, "Scene 1");
    assert_eq!(idx.lookup(10).unwrap().scene_name, "Scene 10");
}

#[test]
fn substring_only_mode_keeps_legacy_first_match() {
    let plan = vec![entry("Scene 10", None), entry("Scene 1", None)];
    let idx = AssetPlanIndex::new(&plan, AssetJoinMode::SubstringOnly);
    assert_eq!(idx.lookup(1).unwrap().scene_name, "Scene 10");
}

#[test]
fn substring_is_fallback_when_no_exact_key() {
    let plan = vec![entry("Opening (part 2a)", None), entry("the 5th beat", Some(9))];
    let idx = AssetPlanIndex::new(&plan, AssetJoinMode::ExactThenSubstring);
    // "Opening (part 2a)" keys to 2 exactly.
    assert_eq!(idx.lookup(2).unwrap().scene_name, "Opening (part 2a)");
    assert_eq!(idx.lookup(9).unwrap().scene_name, "the 5th beat");
    // "the 5th beat" is keyed to 9, so scene 5 does not borrow it.
    assert!(idx.lookup(5).is_none());
    assert!(idx.lookup(4).is_none());

    // A digit run too long for a key leaves the entry unkeyed.
    let plan = vec![entry("take 99999999999", None)];
    let idx = AssetPlanIndex::new(&plan, AssetJoinMode::ExactThenSubstring);
    assert_eq!(entry_key(&plan[0]), None);
    assert_eq!(idx.lookup(999).unwrap().scene_name, "take 99999999999");

    let plan = vec![entry("Opening (part 2a)", None), entry("the 5th beat", Some(9))];
    let legacy = AssetPlanIndex::new(&plan, AssetJoinMode::SubstringOnly);
    assert_eq!(legacy.lookup(5).unwrap().scene_name, "the 5th beat");
}

#[test]
fn keyed_entries_are_never_borrowed_by_other_scenes() {
    let plan = vec![entry("Scene 10", None), entry("Scene 11", None)];
    let idx = AssetPlanIndex::new(&plan, AssetJoinMode::ExactThenSubstring);
    assert!(idx.lookup(1).is_none());
    assert_eq!(idx.lookup(10).unwrap().scene_name, "Scene 10");
    assert_eq!(idx.lookup(11).unwrap().scene_name, "Scene 11");
}
