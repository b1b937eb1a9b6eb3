use super::*;

fn seq_cfg() -> MemeConfig {
    MemeConfig {
        layout: MemeLayoutChoice::Sequence,
        ..MemeConfig::default()
    }
}

fn area() -> Rect {
    Rect::new(0.0, 0.0, 1080.0, 1920.0)
}

fn seq_items(plan: Option<MemePlan>) -> Vec<SequenceItem> {
    match plan {
        Some(MemePlan::Sequence { items }) => items,
        other => panic!("expected sequence plan, got {other:?}"),
    }
}

#[test]
fn auto_layout_switches_at_grid_limit() {
    assert_eq!(choose_layout(MemeLayoutChoice::Auto, 6, 6), MemeLayoutMode::Grid);
    assert_eq!(choose_layout(MemeLayoutChoice::Auto, 7, 6), MemeLayoutMode::Sequence);
    assert_eq!(choose_layout(MemeLayoutChoice::Grid, 20, 6), MemeLayoutMode::Grid);
    assert_eq!(choose_layout(MemeLayoutChoice::Sequence, 1, 6), MemeLayoutMode::Sequence);
}

#[test]
fn even_budget_splits_evenly() {
    let segs = split_segments(150, 5);
    let lens: Vec<u64> = segs.iter().map(|r| r.len_frames()).collect();
    assert_eq!(lens, vec![30, 30, 30, 30, 30]);
}

#[test]
fn last_segment_absorbs_remainder() {
    let segs = split_segments(151, 5);
    let lens: Vec<u64> = segs.iter().map(|r| r.len_frames()).collect();
    assert_eq!(lens, vec![30, 30, 30, 30, 31]);
    assert_eq!(segs[4].end, FrameIndex(151));
    for w in segs.windows(2) {
        assert_eq!(w[0].end, w[1].start);
    }
}

#[test]
fn crossfade_window_is_bounded() {
    let items = seq_items(plan_memes(5, 150, area(), &seq_cfg()));
    for it in &items {
        assert!(it.fade_frames <= 15);
        assert!(it.fade_frames <= it.local.len_frames() / 2);
    }
    assert_eq!(items[0].fade_frames, 4);
    assert_eq!(crossfade_frames(30, 30, 0.5), 15);
    assert_eq!(crossfade_frames(100, 30, 0.15), 15);
    assert_eq!(crossfade_frames(30, 30, f64::NAN), 0);
}

#[test]
fn opacity_ramps_up_holds_and_ramps_down() {
    assert_eq!(sequence_opacity(0, 30, 4), 0.0);
    assert_eq!(sequence_opacity(2, 30, 4), 0.5);
    assert_eq!(sequence_opacity(4, 30, 4), 1.0);
    assert_eq!(sequence_opacity(15, 30, 4), 1.0);
    assert_eq!(sequence_opacity(28, 30, 4), 0.5);
    assert_eq!(sequence_opacity(30, 30, 4), 0.0);
    assert_eq!(sequence_opacity(0, 30, 0), 1.0);
}

#[test]
fn visible_opacity_sum_never_exceeds_two() {
    for (count, len) in [(5usize, 150u64), (7, 151), (12, 97), (3, 5)] {
        let items = seq_items(plan_memes(count, len, area(), &seq_cfg()));
        for f in 0..len {
            let visible: Vec<f64> = items.iter().filter_map(|it| it.opacity_at(f)).collect();
            assert!(visible.iter().sum::<f64>() <= 2.0);
            let opaque = visible.iter().filter(|&&o| o == 1.0).count();
            assert!(opaque <= 1, "count={count} len={len} f={f}");
        }
    }
}

#[test]
fn exactly_one_item_is_opaque_outside_crossfades() {
    for (count, len) in [(5usize, 150u64), (7, 151), (12, 97), (3, 5)] {
        let items = seq_items(plan_memes(count, len, area(), &seq_cfg()));
        for it in &items {
            let seg_len = it.local.len_frames();
            for l in it.fade_frames..seg_len - it.fade_frames {
                let f = it.local.start.0 + l;
                let opaque = items
                    .iter()
                    .filter_map(|other| other.opacity_at(f))
                    .filter(|&o| o == 1.0)
                    .count();
                assert_eq!(opaque, 1, "count={count} len={len} f={f}");
            }
        }
    }
}

#[test]
fn more_items_than_frames_skips_empty_segments() {
    let items = seq_items(plan_memes(5, 3, area(), &seq_cfg()));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].index, 4);
    assert_eq!(items[0].local, FrameRange::with_len(0, 3));
}

#[test]
fn grid_plan_zooms_alternate_direction() {
    let plan = plan_memes(3, 90, area(), &MemeConfig::default()).unwrap();
    let MemePlan::Grid { dims, items } = plan else {
        panic!("expected grid");
    };
    assert_eq!((dims.cols, dims.rows), (2, 2));
    let z0 = items[0].zoom.unwrap();
    let z1 = items[1].zoom.unwrap();
    assert_eq!((z0.from, z0.to), (1.0, 1.0 + 0.08));
    assert_eq!((z1.from, z1.to), (1.0 + 0.08, 1.0));
    assert_eq!(z0.scale_at(0, 90), 1.0);
    assert!((z0.scale_at(89, 90) - 1.08).abs() < 1e-12);
}

#[test]
fn zoom_can_be_disabled() {
    let cfg = MemeConfig {
        zoom: false,
        ..MemeConfig::default()
    };
    let Some(MemePlan::Grid { items, .. }) = plan_memes(2, 30, area(), &cfg) else {
        panic!("expected grid");
    };
    assert!(items.iter().all(|it| it.zoom.is_none()));
}

#[test]
fn nothing_to_plan() {
    assert!(plan_memes(0, 30, area(), &MemeConfig::default()).is_none());
    assert!(plan_memes(3, 0, area(), &MemeConfig::default()).is_none());
}
