use super::*;

const PROJECT: &str = r#"{
    "active_timeline": "Edit",
    "timelines": [
        {"name": "Edit", "strips": [
            {"name": "shot", "range": {"start": 0, "end": 10}, "channel": 1,
             "kind": {"type": "scene", "target": "Layout", "camera": "CamA"}}
        ]},
        {"name": "Layout"}
    ]
}"#;

#[test]
fn commands_mutate_state_and_are_logged() {
    let mut host = MemoryHost::from_json(PROJECT).unwrap();
    host.switch_active_timeline("Layout").unwrap();
    host.apply_camera("Layout", "CamA").unwrap();
    host.set_frame("Layout", FrameIndex(7)).unwrap();
    host.set_active_strip("Edit", "shot").unwrap();

    assert_eq!(host.active_timeline(), "Layout");
    assert!(host.camera_view());
    let layout = host.timeline("Layout").unwrap();
    assert_eq!(layout.camera.as_deref(), Some("CamA"));
    assert_eq!(layout.current_frame, FrameIndex(7));
    assert_eq!(host.timeline("Edit").unwrap().active_strip.as_deref(), Some("shot"));
    assert_eq!(host.commands().len(), 4);
    assert_eq!(
        host.commands()[0],
        HostCommand::SwitchTimeline {
            timeline: "Layout".to_string()
        }
    );

    assert_eq!(host.take_commands().len(), 4);
    assert!(host.commands().is_empty());
}

#[test]
fn unknown_targets_are_not_found_and_not_logged() {
    let mut host = MemoryHost::from_json(PROJECT).unwrap();
    assert!(host.switch_active_timeline("Gone").unwrap_err().is_not_found());
    assert!(host.set_frame("Gone", FrameIndex(1)).unwrap_err().is_not_found());
    assert!(host.set_active_strip("Edit", "nope").unwrap_err().is_not_found());
    assert!(host.commands().is_empty());
    assert_eq!(host.active_timeline(), "Edit");
}

#[test]
fn removed_cameras_are_not_found() {
    let mut host = MemoryHost::from_json(PROJECT)
        .unwrap()
        .with_cameras(["CamA", "CamB"]);
    host.apply_camera("Edit", "CamB").unwrap();
    host.remove_camera("CamB");
    assert!(host.apply_camera("Edit", "CamB").unwrap_err().is_not_found());
    assert_eq!(host.timeline("Edit").unwrap().camera.as_deref(), Some("CamB"));
}

#[test]
fn timelines_keep_registration_order() {
    let host = MemoryHost::from_json(PROJECT).unwrap();
    let names: Vec<&str> = host.timelines().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Edit", "Layout"]);
}

#[test]
fn selection_can_be_cleared() {
    let mut host = MemoryHost::from_json(PROJECT).unwrap();
    host.select_strip("Edit", Some("shot")).unwrap();
    host.select_strip("Edit", None).unwrap();
    assert!(host.timeline("Edit").unwrap().active().is_none());
    assert!(host.commands().is_empty());
    assert_eq!(host.into_project().timelines.len(), 2);
}
