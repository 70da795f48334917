use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{LinkError, LinkResult},
    timeline::model::{
        MediaKind, MediaStrip, SceneInput, SceneStrip, Strip, StripKind, Timeline,
    },
};

/// Channel the "add camera as scene strip" action places new strips on.
pub const DEFAULT_CAMERA_CHANNEL: u32 = 2;

/// Builder for [`Timeline`](crate::Timeline).
pub struct TimelineBuilder {
    name: String,
    current_frame: FrameIndex,
    strips: Vec<Strip>,
    active_strip: Option<String>,
    camera: Option<String>,
}

impl TimelineBuilder {
    /// Create a builder for a timeline called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_frame: FrameIndex(0),
            strips: Vec::new(),
            active_strip: None,
            camera: None,
        }
    }

    /// Set the initial playhead position.
    pub fn current_frame(mut self, frame: i64) -> Self {
        self.current_frame = FrameIndex(frame);
        self
    }

    /// Append a strip. Strip order is preserved.
    pub fn strip(mut self, strip: Strip) -> Self {
        self.strips.push(strip);
        self
    }

    /// Mark a strip as the host's active selection.
    pub fn active_strip(mut self, name: impl Into<String>) -> Self {
        self.active_strip = Some(name.into());
        self
    }

    /// Set the camera currently assigned to the timeline.
    pub fn camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }

    /// Build and validate the final [`Timeline`](crate::Timeline).
    pub fn build(self) -> LinkResult<Timeline> {
        if let Some(active) = &self.active_strip
            && !self.strips.iter().any(|s| &s.name == active)
        {
            return Err(LinkError::validation(format!(
                "active strip '{active}' is not on timeline '{}'",
                self.name
            )));
        }
        let timeline = Timeline {
            name: self.name,
            current_frame: self.current_frame,
            strips: self.strips,
            active_strip: self.active_strip,
            camera: self.camera,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

/// Scene strip showing `camera` from timeline `target` over `[start, end)`.
pub fn scene_strip(
    name: impl Into<String>,
    target: impl Into<String>,
    camera: Option<&str>,
    channel: u32,
    start: i64,
    end: i64,
) -> LinkResult<Strip> {
    strip(
        name,
        channel,
        start,
        end,
        StripKind::Scene(SceneStrip {
            target: target.into(),
            camera: camera.map(str::to_string),
            input: SceneInput::Camera,
            offset: 0,
        }),
    )
}

/// Media strip playing `source` over `[start, end)` with a start trim of `offset` frames.
pub fn media_strip(
    name: impl Into<String>,
    media: MediaKind,
    source: impl Into<String>,
    channel: u32,
    start: i64,
    end: i64,
    offset: i64,
) -> LinkResult<Strip> {
    strip(
        name,
        channel,
        start,
        end,
        StripKind::Media(MediaStrip {
            media,
            source: source.into(),
            offset,
        }),
    )
}

/// The "add current camera as scene strip" action: a camera strip on
/// [`DEFAULT_CAMERA_CHANNEL`] running from the playhead to `end`.
pub fn camera_strip_at(
    name: impl Into<String>,
    target: impl Into<String>,
    camera: &str,
    playhead: FrameIndex,
    end: FrameIndex,
) -> LinkResult<Strip> {
    scene_strip(
        name,
        target,
        Some(camera),
        DEFAULT_CAMERA_CHANNEL,
        playhead.0,
        end.0,
    )
}

fn strip(
    name: impl Into<String>,
    channel: u32,
    start: i64,
    end: i64,
    kind: StripKind,
) -> LinkResult<Strip> {
    let strip = Strip {
        name: name.into(),
        range: FrameRange::new(FrameIndex(start), FrameIndex(end))?,
        channel,
        muted: false,
        kind,
    };
    strip.validate()?;
    Ok(strip)
}

impl Strip {
    /// Return the strip muted.
    pub fn into_muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Return the strip with a different scene input mode. No-op for non-scene strips.
    pub fn with_input(mut self, input: SceneInput) -> Self {
        if let StripKind::Scene(s) = &mut self.kind {
            s.input = input;
        }
        self
    }

    /// Return the strip with a different scene-local offset. No-op for non-scene strips.
    pub fn with_scene_offset(mut self, offset: i64) -> Self {
        if let StripKind::Scene(s) = &mut self.kind {
            s.offset = offset;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
