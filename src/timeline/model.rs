use std::collections::BTreeSet;

use crate::foundation::{
    core::{FrameIndex, FrameRange},
    error::{LinkError, LinkResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One host timeline (a scene with its sequencer) as seen by the core.
///
/// Timelines are owned by the host. The core only reads them; the host applies
/// whatever commands the core issues through [`crate::Host`].
pub struct Timeline {
    /// Timeline name, unique among the host's timelines.
    pub name: String,
    /// Current playhead position.
    #[serde(default)]
    pub current_frame: FrameIndex,
    /// Strips in host list order.
    #[serde(default)]
    pub strips: Vec<Strip>,
    /// Name of the strip the user has selected as active, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_strip: Option<String>,
    /// Camera currently assigned to this timeline's viewport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A labeled interval on a channel.
pub struct Strip {
    /// Strip identity, unique within its timeline.
    pub name: String,
    /// Placement `[start, end)` on the owning timeline.
    pub range: FrameRange,
    /// Priority lane, `>= 1`. Higher channels win on overlap.
    pub channel: u32,
    /// Muted strips never drive camera selection.
    #[serde(default)]
    pub muted: bool,
    /// What the strip plays back.
    pub kind: StripKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Strip payload.
pub enum StripKind {
    /// A movie or sound file.
    Media(MediaStrip),
    /// Plays back another timeline (a scene strip).
    Scene(SceneStrip),
    /// Any other host strip type (color, effect, text...). Never resolved or
    /// matched, but still counts as "a selected strip" for toggling.
    #[serde(other)]
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Media flavour. Frame matching only pairs strips of the same flavour.
pub enum MediaKind {
    /// Video file.
    Movie,
    /// Audio file.
    Sound,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Media strip payload.
pub struct MediaStrip {
    /// Movie or sound.
    pub media: MediaKind,
    /// Content identity, usually a file path.
    pub source: String,
    /// Start trim in frames: strip-local frame to content-local frame.
    #[serde(default)]
    pub offset: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which part of the referenced timeline a scene strip shows.
pub enum SceneInput {
    /// The strip's camera view. Only this mode drives the viewport camera.
    #[default]
    Camera,
    /// The referenced timeline's own sequencer output.
    Content,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scene strip payload.
pub struct SceneStrip {
    /// Name of the referenced timeline.
    pub target: String,
    /// Camera override used when `input` is [`SceneInput::Camera`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    /// Input mode.
    #[serde(default)]
    pub input: SceneInput,
    /// Strip-local frame to target-timeline frame.
    #[serde(default)]
    pub offset: i64,
}

impl SceneStrip {
    /// The camera this strip selects, if it selects one at all.
    pub fn camera_target(&self) -> Option<&str> {
        if self.input != SceneInput::Camera {
            return None;
        }
        self.camera
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

impl Strip {
    /// Scene payload, when this is a scene strip.
    pub fn scene(&self) -> Option<&SceneStrip> {
        match &self.kind {
            StripKind::Scene(s) => Some(s),
            _ => None,
        }
    }

    /// Media payload, when this is a media strip.
    pub fn media(&self) -> Option<&MediaStrip> {
        match &self.kind {
            StripKind::Media(m) => Some(m),
            _ => None,
        }
    }

    /// Validate strip invariants.
    pub fn validate(&self) -> LinkResult<()> {
        if self.name.trim().is_empty() {
            return Err(LinkError::validation("strip name must be non-empty"));
        }
        if !self.range.is_well_formed() {
            return Err(LinkError::validation(format!(
                "strip '{}' has invalid range (start >= end)",
                self.name
            )));
        }
        if self.channel == 0 {
            return Err(LinkError::validation(format!(
                "strip '{}' channel must be >= 1",
                self.name
            )));
        }
        match &self.kind {
            StripKind::Media(m) if m.source.trim().is_empty() => Err(LinkError::validation(
                format!("media strip '{}' source must be non-empty", self.name),
            )),
            StripKind::Scene(s) if s.target.trim().is_empty() => Err(LinkError::validation(
                format!("scene strip '{}' target must be non-empty", self.name),
            )),
            _ => Ok(()),
        }
    }

    /// Cheap structural check used on the per-frame path.
    pub fn is_well_formed(&self) -> bool {
        self.range.is_well_formed() && self.channel >= 1
    }
}

impl Timeline {
    /// Create an empty timeline with the playhead at frame 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_frame: FrameIndex(0),
            strips: Vec::new(),
            active_strip: None,
            camera: None,
        }
    }

    /// Look a strip up by name.
    pub fn strip(&self, name: &str) -> Option<&Strip> {
        self.strips.iter().find(|s| s.name == name)
    }

    /// The selected strip, if the selection still names an existing strip.
    pub fn active(&self) -> Option<&Strip> {
        self.active_strip.as_deref().and_then(|n| self.strip(n))
    }

    /// Strips that satisfy the structural invariants, in host list order.
    pub fn usable_strips(&self) -> impl Iterator<Item = &Strip> {
        self.strips.iter().filter(|s| {
            let ok = s.is_well_formed();
            if !ok {
                tracing::trace!(timeline = %self.name, strip = %s.name, "skipping malformed strip");
            }
            ok
        })
    }

    /// Validate timeline invariants, rejecting the first malformed strip.
    pub fn validate(&self) -> LinkResult<()> {
        if self.name.trim().is_empty() {
            return Err(LinkError::validation("timeline name must be non-empty"));
        }
        let mut seen = BTreeSet::new();
        for strip in &self.strips {
            strip.validate()?;
            if !seen.insert(strip.name.as_str()) {
                return Err(LinkError::validation(format!(
                    "timeline '{}' has duplicate strip name '{}'",
                    self.name, strip.name
                )));
            }
        }
        Ok(())
    }

    /// Drop malformed and duplicate strips, keeping the first of each name.
    ///
    /// Returns the number of strips removed. Each removal is logged.
    pub fn sanitize(&mut self) -> usize {
        let before = self.strips.len();
        let timeline = self.name.clone();
        let mut seen = BTreeSet::new();
        self.strips.retain(|strip| {
            if let Err(err) = strip.validate() {
                tracing::warn!(%timeline, strip = %strip.name, %err, "dropping strip");
                return false;
            }
            if !seen.insert(strip.name.clone()) {
                tracing::warn!(%timeline, strip = %strip.name, "dropping duplicate strip");
                return false;
            }
            true
        });
        before - self.strips.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
