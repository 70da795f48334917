use super::*;

fn marker(frame: i64, camera: &str) -> CameraMarker {
    CameraMarker {
        frame: FrameIndex(frame),
        camera: camera.to_string(),
    }
}

fn spans(strips: &[Strip]) -> Vec<(String, i64, i64)> {
    strips
        .iter()
        .map(|s| (s.name.clone(), s.range.start.0, s.range.end.0))
        .collect()
}

#[test]
fn markers_become_back_to_back_strips() {
    let markers = [marker(40, "CamB"), marker(1, "CamA"), marker(90, "CamC")];
    let strips = strips_from_camera_markers(&markers, "Scene", MARKER_CHANNEL, 150).unwrap();
    assert_eq!(
        spans(&strips),
        [
            ("CamA".to_string(), 1, 40),
            ("CamB".to_string(), 40, 90),
            ("CamC".to_string(), 90, 240),
        ]
    );
    assert!(strips.iter().all(|s| s.channel == MARKER_CHANNEL));
    assert_eq!(strips[1].scene().unwrap().camera_target(), Some("CamB"));
}

#[test]
fn shared_frames_keep_last_marker_and_unbound_markers_are_skipped() {
    let markers = [
        marker(10, "CamA"),
        marker(10, "CamB"),
        marker(20, ""),
        marker(30, "CamA"),
    ];
    let strips = strips_from_camera_markers(&markers, "Scene", 1, 5).unwrap();
    assert_eq!(
        spans(&strips),
        [("CamB".to_string(), 10, 30), ("CamA".to_string(), 30, 35)]
    );
}

#[test]
fn reused_cameras_get_suffixed_names() {
    let markers = [marker(0, "Cam"), marker(10, "Cam"), marker(20, "Cam")];
    let strips = strips_from_camera_markers(&markers, "Scene", 1, 10).unwrap();
    let names: Vec<&str> = strips.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Cam", "Cam.001", "Cam.002"]);
}

#[test]
fn empty_input_and_bad_tail() {
    assert!(
        strips_from_camera_markers(&[], "Scene", 1, DEFAULT_MARKER_TAIL)
            .unwrap()
            .is_empty()
    );
    assert!(strips_from_camera_markers(&[marker(0, "Cam")], "Scene", 1, 0).is_err());
}

#[test]
fn last_marker_near_frame_limit_is_reported() {
    let err = strips_from_camera_markers(&[marker(i64::MAX - 2, "Cam")], "Scene", 1, 10)
        .unwrap_err();
    assert!(err.to_string().contains("out of range"));
}
