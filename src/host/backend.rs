use crate::{
    foundation::core::FrameIndex,
    foundation::error::LinkResult,
    timeline::model::Timeline,
};

/// The host application binding the core talks to.
///
/// Reads expose the host's timelines in registration order. Commands are
/// idempotent; a command naming something that no longer exists should fail
/// with [`crate::LinkError::NotFound`], which the core treats as a no-op.
pub trait Host {
    /// All timelines in host registration order. The order must be stable
    /// for the lifetime of a session.
    fn timelines(&self) -> &[Timeline];

    /// Look a timeline up by name.
    fn timeline(&self, name: &str) -> Option<&Timeline> {
        self.timelines().iter().find(|t| t.name == name)
    }

    /// Assign `camera` to `timeline` and switch the viewport to camera view.
    fn apply_camera(&mut self, timeline: &str, camera: &str) -> LinkResult<()>;

    /// Display `timeline`.
    fn switch_active_timeline(&mut self, timeline: &str) -> LinkResult<()>;

    /// Move the playhead of `timeline`.
    fn set_frame(&mut self, timeline: &str, frame: FrameIndex) -> LinkResult<()>;

    /// Select `strip` as the active strip of `timeline`.
    ///
    /// Hosts without a notion of strip selection can keep the default.
    fn set_active_strip(&mut self, _timeline: &str, _strip: &str) -> LinkResult<()> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
/// A command issued to a host, as recorded by [`crate::MemoryHost`].
pub enum HostCommand {
    /// [`Host::apply_camera`].
    ApplyCamera {
        /// Timeline whose camera changes.
        timeline: String,
        /// New camera.
        camera: String,
    },
    /// [`Host::switch_active_timeline`].
    SwitchTimeline {
        /// Timeline to display.
        timeline: String,
    },
    /// [`Host::set_frame`].
    SetFrame {
        /// Timeline whose playhead moves.
        timeline: String,
        /// New playhead position.
        frame: FrameIndex,
    },
    /// [`Host::set_active_strip`].
    SetActiveStrip {
        /// Timeline whose selection changes.
        timeline: String,
        /// Newly selected strip.
        strip: String,
    },
}
