use crate::foundation::error::LinkResult;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Session configuration owned by the host.
pub struct LinkConfig {
    /// Whether frame changes drive the viewport camera.
    #[serde(default)]
    pub link_enabled: bool,
    /// How a scene strip's target is compared with the displayed timeline.
    #[serde(default)]
    pub target_match: TargetMatch,
    /// Which identity decides that a target was already applied.
    #[serde(default)]
    pub reapply_key: ReapplyKey,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Rule for "this scene strip plays back the displayed timeline".
pub enum TargetMatch {
    /// Target name equals the displayed timeline name.
    #[default]
    Exact,
    /// Also accept a linked copy of the displayed timeline, i.e. a target
    /// named like `Scene.001` while `Scene` is displayed.
    IgnoreCopySuffix,
}

impl TargetMatch {
    /// `true` when a strip targeting `target` plays back `displayed`.
    pub fn matches(self, target: &str, displayed: &str) -> bool {
        if target == displayed {
            return true;
        }
        match self {
            Self::Exact => false,
            Self::IgnoreCopySuffix => strip_copy_suffix(target) == displayed,
        }
    }
}

fn strip_copy_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, digits))
            if !base.is_empty()
                && digits.len() == 3
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => name,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Identity used to skip reapplying a target that is already live.
pub enum ReapplyKey {
    /// A new winning strip always reapplies, even when it shows the same camera.
    #[default]
    Strip,
    /// Only a different camera reapplies.
    Camera,
}

impl LinkConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> LinkResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
