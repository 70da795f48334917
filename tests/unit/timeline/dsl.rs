use super::*;

#[test]
fn builder_keeps_strip_order_and_validates() {
    let t = TimelineBuilder::new("Edit")
        .current_frame(12)
        .strip(scene_strip("s1", "Layout", Some("CamA"), 1, 0, 50).unwrap())
        .strip(scene_strip("s2", "Layout", Some("CamB"), 2, 25, 80).unwrap())
        .active_strip("s2")
        .build()
        .unwrap();
    assert_eq!(t.current_frame, FrameIndex(12));
    assert_eq!(t.strips[0].name, "s1");
    assert_eq!(t.active().unwrap().name, "s2");
}

#[test]
fn builder_rejects_unknown_active_strip_and_duplicates() {
    let err = TimelineBuilder::new("Edit")
        .strip(scene_strip("s1", "Layout", None, 1, 0, 50).unwrap())
        .active_strip("nope")
        .build();
    assert!(err.is_err());

    let dup = TimelineBuilder::new("Edit")
        .strip(scene_strip("s1", "Layout", None, 1, 0, 50).unwrap())
        .strip(scene_strip("s1", "Layout", None, 1, 50, 60).unwrap())
        .build();
    assert!(dup.is_err());
}

#[test]
fn helpers_reject_empty_ranges() {
    assert!(scene_strip("s", "Layout", None, 1, 10, 10).is_err());
    assert!(media_strip("m", MediaKind::Sound, "a.wav", 1, 5, 2, 0).is_err());
}

#[test]
fn camera_strip_at_uses_camera_channel() {
    let s = camera_strip_at("Scene", "Layout", "CamA", FrameIndex(30), FrameIndex(250)).unwrap();
    assert_eq!(s.channel, DEFAULT_CAMERA_CHANNEL);
    assert_eq!(s.range.start, FrameIndex(30));
    assert_eq!(s.scene().unwrap().camera_target(), Some("CamA"));
}

#[test]
fn modifiers_touch_only_scene_payloads() {
    let s = scene_strip("s", "Layout", Some("CamA"), 1, 0, 10)
        .unwrap()
        .into_muted()
        .with_input(SceneInput::Content)
        .with_scene_offset(7);
    assert!(s.muted);
    let scene = s.scene().unwrap();
    assert_eq!(scene.input, SceneInput::Content);
    assert_eq!(scene.offset, 7);

    let m = media_strip("m", MediaKind::Movie, "a.mov", 1, 0, 10, 3)
        .unwrap()
        .with_scene_offset(99);
    assert_eq!(m.media().unwrap().offset, 3);
}
