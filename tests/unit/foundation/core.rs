use super::*;

#[test]
fn frame_range_new_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(2)).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.len_frames(), 0);
}

#[test]
fn frame_range_contains_is_half_open() {
    let r = FrameRange::with_len(150, 75);
    assert!(!r.contains(FrameIndex(149)));
    assert!(r.contains(FrameIndex(150)));
    assert!(r.contains(FrameIndex(224)));
    assert!(!r.contains(FrameIndex(225)));
    assert_eq!(r.local(FrameIndex(160)), Some(10));
    assert_eq!(r.local(FrameIndex(225)), None);
}

#[test]
fn frame_range_intersect() {
    let a = FrameRange::with_len(0, 10);
    let b = FrameRange::with_len(5, 10);
    assert_eq!(a.intersect(b), Some(FrameRange::with_len(5, 5)));
    assert_eq!(a.intersect(FrameRange::with_len(10, 3)), None);
}

#[test]
fn fps_validation_and_conversions() {
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps::new(0, 1).is_err());

    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(5.0), 150);
    assert_eq!(fps.secs_to_frames_ceil(2.5), 75);
    assert_eq!(fps.secs_to_frames_ceil(0.1), 3);
    assert_eq!(fps.secs_to_frames_ceil(0.11), 4);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), 0);
    assert_eq!(fps.secs_to_frames_ceil(f64::NAN), 0);
    assert_eq!(fps.secs_to_frames_floor(1.99), 59);
    assert_eq!(fps.secs_to_frames_floor(-0.5), 0);
    assert_eq!(fps.frames_to_secs(45), 1.5);
}

#[test]
fn canvas_defaults_to_vertical_hd() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1080, 1920));
    assert_eq!(c.rect().width(), 1080.0);
}
