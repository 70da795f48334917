use std::collections::BTreeSet;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{LinkError, LinkResult},
    host::backend::{Host, HostCommand},
    timeline::{model::Timeline, project::Project},
};

/// In-memory [`Host`] backed by a [`Project`].
///
/// Applies every command to its own copy of the timelines and records it in an
/// ordered log. Used by the CLI and as a test double.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    project: Project,
    cameras: Option<BTreeSet<String>>,
    removed: BTreeSet<String>,
    camera_view: bool,
    log: Vec<HostCommand>,
}

impl MemoryHost {
    /// Ingest a project, dropping malformed strips and duplicate timelines.
    pub fn new(mut project: Project) -> LinkResult<Self> {
        let dropped = project.sanitize()?;
        if dropped > 0 {
            tracing::warn!(dropped, "ignored malformed strips while loading project");
        }
        Ok(Self {
            project,
            cameras: None,
            removed: BTreeSet::new(),
            camera_view: false,
            log: Vec::new(),
        })
    }

    /// Parse and ingest a project from JSON.
    pub fn from_json(text: &str) -> LinkResult<Self> {
        Self::new(Project::from_json(text)?)
    }

    /// Restrict the cameras that exist. By default any camera name is accepted.
    pub fn with_cameras<I, S>(mut self, cameras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cameras = Some(cameras.into_iter().map(Into::into).collect());
        self
    }

    /// Delete a camera so later [`Host::apply_camera`] calls fail with `NotFound`.
    pub fn remove_camera(&mut self, camera: &str) {
        if let Some(known) = &mut self.cameras {
            known.remove(camera);
        }
        self.removed.insert(camera.to_string());
    }

    /// Name of the displayed timeline.
    pub fn active_timeline(&self) -> &str {
        &self.project.active_timeline
    }

    /// `true` once a camera was applied and the viewport looks through it.
    pub fn camera_view(&self) -> bool {
        self.camera_view
    }

    /// Commands applied so far, oldest first.
    pub fn commands(&self) -> &[HostCommand] {
        &self.log
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.log)
    }

    /// Change (or clear) the user's strip selection on `timeline`.
    pub fn select_strip(&mut self, timeline: &str, strip: Option<&str>) -> LinkResult<()> {
        let t = self.timeline_entry(timeline)?;
        if let Some(name) = strip
            && t.strip(name).is_none()
        {
            return Err(LinkError::not_found(format!(
                "strip '{name}' on timeline '{timeline}'"
            )));
        }
        t.active_strip = strip.map(str::to_string);
        Ok(())
    }

    /// The project in its current state.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consume the host, returning the project in its current state.
    pub fn into_project(self) -> Project {
        self.project
    }

    fn timeline_entry(&mut self, name: &str) -> LinkResult<&mut Timeline> {
        self.project
            .timelines
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| LinkError::not_found(format!("timeline '{name}'")))
    }
}

impl Host for MemoryHost {
    fn timelines(&self) -> &[Timeline] {
        &self.project.timelines
    }

    fn apply_camera(&mut self, timeline: &str, camera: &str) -> LinkResult<()> {
        let exists = self.cameras.as_ref().is_none_or(|known| known.contains(camera));
        if !exists || self.removed.contains(camera) {
            return Err(LinkError::not_found(format!("camera '{camera}'")));
        }
        self.timeline_entry(timeline)?.camera = Some(camera.to_string());
        self.camera_view = true;
        self.log.push(HostCommand::ApplyCamera {
            timeline: timeline.to_string(),
            camera: camera.to_string(),
        });
        Ok(())
    }

    fn switch_active_timeline(&mut self, timeline: &str) -> LinkResult<()> {
        self.timeline_entry(timeline)?;
        self.project.active_timeline = timeline.to_string();
        self.log.push(HostCommand::SwitchTimeline {
            timeline: timeline.to_string(),
        });
        Ok(())
    }

    fn set_frame(&mut self, timeline: &str, frame: FrameIndex) -> LinkResult<()> {
        self.timeline_entry(timeline)?.current_frame = frame;
        self.log.push(HostCommand::SetFrame {
            timeline: timeline.to_string(),
            frame,
        });
        Ok(())
    }

    fn set_active_strip(&mut self, timeline: &str, strip: &str) -> LinkResult<()> {
        self.select_strip(timeline, Some(strip))?;
        self.log.push(HostCommand::SetActiveStrip {
            timeline: timeline.to_string(),
            strip: strip.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
