use super::*;

#[test]
fn exact_match_is_strict() {
    assert!(TargetMatch::Exact.matches("Scene", "Scene"));
    assert!(!TargetMatch::Exact.matches("Scene.001", "Scene"));
}

#[test]
fn copy_suffix_only_strips_three_digits() {
    let rule = TargetMatch::IgnoreCopySuffix;
    assert!(rule.matches("Scene.001", "Scene"));
    assert!(rule.matches("Scene", "Scene"));
    assert!(!rule.matches("Scene.01", "Scene"));
    assert!(!rule.matches("Scene.abc", "Scene"));
    assert!(!rule.matches("Scene.001", "Other"));
    assert!(rule.matches("Shot.010.002", "Shot.010"));
    assert!(!rule.matches(".001", ""));
}

#[test]
fn config_json_defaults() {
    let cfg = LinkConfig::from_json("{}").unwrap();
    assert_eq!(cfg, LinkConfig::default());
    assert!(!cfg.link_enabled);

    let cfg = LinkConfig::from_json(
        r#"{"link_enabled": true, "target_match": "ignore_copy_suffix", "reapply_key": "camera"}"#,
    )
    .unwrap();
    assert!(cfg.link_enabled);
    assert_eq!(cfg.target_match, TargetMatch::IgnoreCopySuffix);
    assert_eq!(cfg.reapply_key, ReapplyKey::Camera);
}
