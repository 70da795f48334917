use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LinkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LinkError::not_found("x").to_string().contains("not found:"));
    assert!(LinkError::host("x").to_string().contains("host error:"));
    assert!(
        LinkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_not_found_is_silent() {
    assert!(LinkError::not_found("camera 'Cam.002'").is_not_found());
    assert!(!LinkError::host("window closed").is_not_found());
    assert!(!LinkError::validation("bad strip").is_not_found());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LinkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_become_serde() {
    let err: LinkError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, LinkError::Serde(_)));
}
