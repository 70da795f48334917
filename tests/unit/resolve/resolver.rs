use super::*;
use crate::{
    foundation::core::FrameRange,
    timeline::model::{SceneInput, SceneStrip, StripKind},
};

fn cam_strip(name: &str, camera: &str, channel: u32, start: i64, end: i64) -> Strip {
    Strip {
        name: name.to_string(),
        range: FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap(),
        channel,
        muted: false,
        kind: StripKind::Scene(SceneStrip {
            target: "Scene".to_string(),
            camera: Some(camera.to_string()),
            input: SceneInput::Camera,
            offset: 0,
        }),
    }
}

fn timeline(strips: Vec<Strip>) -> Timeline {
    let mut t = Timeline::new("Scene");
    t.strips = strips;
    t
}

fn winner(t: &Timeline, frame: i64) -> Option<&str> {
    Resolver::winning_strip(t, FrameIndex(frame), TargetMatch::Exact).map(|s| s.name.as_str())
}

#[test]
fn higher_channel_wins_overlap() {
    let t = timeline(vec![
        cam_strip("A", "CamA", 1, 0, 100),
        cam_strip("B", "CamB", 2, 50, 150),
    ]);
    assert_eq!(winner(&t, 60), Some("B"));
    assert_eq!(winner(&t, 20), Some("A"));
    assert_eq!(winner(&t, 120), Some("B"));
    assert_eq!(winner(&t, 150), None);
}

#[test]
fn same_channel_tie_goes_to_earliest_start() {
    let t = timeline(vec![
        cam_strip("late", "CamB", 3, 40, 120),
        cam_strip("early", "CamA", 3, 10, 100),
    ]);
    for _ in 0..3 {
        assert_eq!(winner(&t, 50), Some("early"));
    }
}

#[test]
fn full_tie_goes_to_list_order() {
    let t = timeline(vec![
        cam_strip("first", "CamA", 1, 0, 10),
        cam_strip("second", "CamB", 1, 0, 10),
    ]);
    assert_eq!(winner(&t, 5), Some("first"));
}

#[test]
fn muted_strips_never_win() {
    let mut top = cam_strip("top", "CamTop", 9, 0, 100);
    top.muted = true;
    let t = timeline(vec![top, cam_strip("base", "CamBase", 1, 0, 100)]);
    assert_eq!(winner(&t, 10), Some("base"));

    let mut only = cam_strip("only", "Cam", 1, 0, 100);
    only.muted = true;
    assert_eq!(winner(&timeline(vec![only]), 10), None);
}

#[test]
fn strips_for_other_timelines_are_ignored() {
    let mut other = cam_strip("other", "CamX", 5, 0, 100);
    if let StripKind::Scene(s) = &mut other.kind {
        s.target = "Scene.001".to_string();
    }
    let t = timeline(vec![other, cam_strip("own", "CamA", 1, 0, 100)]);
    assert_eq!(winner(&t, 10), Some("own"));
    assert_eq!(
        Resolver::winning_strip(&t, FrameIndex(10), TargetMatch::IgnoreCopySuffix)
            .map(|s| s.name.as_str()),
        Some("other")
    );
}

#[test]
fn content_input_wins_but_selects_no_camera() {
    let t = timeline(vec![
        cam_strip("cam", "CamA", 1, 0, 100),
        cam_strip("content", "CamB", 2, 0, 100).with_input(SceneInput::Content),
    ]);
    assert_eq!(Resolver::resolve(&t, FrameIndex(10), TargetMatch::Exact), None);

    let step = Resolver::step(&ResolverState::new(), &t, FrameIndex(10), &LinkConfig::default());
    assert_eq!(
        step,
        ResolveStep::NoTarget {
            strip: "content".to_string()
        }
    );
}

#[test]
fn malformed_strips_are_skipped() {
    let mut broken = cam_strip("broken", "CamX", 7, 0, 100);
    broken.range = FrameRange {
        start: FrameIndex(100),
        end: FrameIndex(0),
    };
    let t = timeline(vec![broken, cam_strip("ok", "CamA", 1, 0, 100)]);
    assert_eq!(winner(&t, 50), Some("ok"));
}

#[test]
fn resolve_is_deterministic() {
    let t = timeline(vec![
        cam_strip("A", "CamA", 1, 0, 100),
        cam_strip("B", "CamB", 2, 50, 150),
        cam_strip("C", "CamC", 2, 50, 150),
    ]);
    let first = Resolver::resolve(&t, FrameIndex(75), TargetMatch::Exact);
    let second = Resolver::resolve(&t, FrameIndex(75), TargetMatch::Exact);
    assert_eq!(first, second);
    assert_eq!(first.unwrap().strip, "B");
}

#[test]
fn step_applies_once_then_reports_unchanged() {
    let t = timeline(vec![cam_strip("A", "CamA", 1, 0, 100)]);
    let cfg = LinkConfig::default();
    let mut state = ResolverState::new();

    let ResolveStep::Apply { target } = Resolver::step(&state, &t, FrameIndex(1), &cfg) else {
        panic!("expected apply");
    };
    state.commit(target.clone());
    assert_eq!(
        Resolver::step(&state, &t, FrameIndex(2), &cfg),
        ResolveStep::Unchanged { target }
    );
    assert_eq!(Resolver::step(&state, &t, FrameIndex(200), &cfg), ResolveStep::Idle);
    assert_eq!(state.last_applied().unwrap().camera, "CamA");

    state.reset();
    assert!(matches!(
        Resolver::step(&state, &t, FrameIndex(2), &cfg),
        ResolveStep::Apply { .. }
    ));
}

#[test]
fn reapply_key_controls_same_camera_strips() {
    let t = timeline(vec![
        cam_strip("A", "Cam", 1, 0, 50),
        cam_strip("B", "Cam", 1, 50, 100),
    ]);
    let mut state = ResolverState::new();
    state.commit(ResolvedTarget {
        timeline: "Scene".to_string(),
        strip: "A".to_string(),
        camera: "Cam".to_string(),
    });

    let by_strip = LinkConfig::default();
    assert!(matches!(
        Resolver::step(&state, &t, FrameIndex(60), &by_strip),
        ResolveStep::Apply { .. }
    ));

    let by_camera = LinkConfig {
        reapply_key: ReapplyKey::Camera,
        ..LinkConfig::default()
    };
    assert!(matches!(
        Resolver::step(&state, &t, FrameIndex(60), &by_camera),
        ResolveStep::Unchanged { .. }
    ));
}

#[test]
fn same_strip_name_on_another_timeline_is_a_new_target() {
    let mut other = Timeline::new("Other");
    let mut strip = cam_strip("Camera", "CamB", 1, 0, 100);
    if let StripKind::Scene(s) = &mut strip.kind {
        s.target = "Other".to_string();
    }
    other.strips = vec![strip];
    let here = timeline(vec![cam_strip("Camera", "CamA", 1, 0, 100)]);

    for key in [ReapplyKey::Strip, ReapplyKey::Camera] {
        let cfg = LinkConfig {
            reapply_key: key,
            ..LinkConfig::default()
        };
        let mut state = ResolverState::new();
        let ResolveStep::Apply { target } = Resolver::step(&state, &here, FrameIndex(10), &cfg)
        else {
            panic!("expected apply on Scene");
        };
        assert_eq!(target.timeline, "Scene");
        state.commit(target);

        let ResolveStep::Apply { target } = Resolver::step(&state, &other, FrameIndex(10), &cfg)
        else {
            panic!("expected apply on Other under {key:?}");
        };
        assert_eq!(target.timeline, "Other");
        assert_eq!(target.camera, "CamB");
    }
}
