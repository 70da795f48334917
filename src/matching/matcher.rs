use crate::{
    foundation::core::FrameIndex,
    timeline::model::{MediaStrip, SceneStrip, Strip, StripKind, Timeline},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Where the active strip's current frame lives in another timeline.
pub struct FrameMatch {
    /// Timeline to display.
    pub timeline: String,
    /// Playhead position to set on that timeline.
    pub frame: FrameIndex,
    /// Matching strip to select, for media matches.
    pub strip: Option<String>,
    /// Camera to look through, for camera-input scene strips.
    pub camera: Option<String>,
}

/// Offset of `local_frame` into `active`, or `0` when the playhead is outside
/// the strip (the match then lands on the candidate's start).
///
/// The strip's end frame itself still counts as inside.
pub fn relative_frame(active: &Strip, local_frame: FrameIndex) -> i64 {
    if active.range.contains_inclusive(local_frame) {
        local_frame.0 - active.range.start.0
    } else {
        0
    }
}

#[tracing::instrument(skip(active, timelines), fields(strip = %active.name))]
/// Find the frame in another timeline that shows what `active` shows at `local_frame`.
///
/// Timelines are scanned in the given (host registration) order and strips in
/// list order; the first acceptable candidate wins. `active_timeline` itself is
/// never a candidate. Returns `None` when nothing matches.
pub fn find_match(
    active: &Strip,
    active_timeline: &str,
    local_frame: FrameIndex,
    timelines: &[Timeline],
) -> Option<FrameMatch> {
    let relative = relative_frame(active, local_frame);
    let found = match &active.kind {
        StripKind::Media(media) => match_media(media, active_timeline, relative, timelines),
        StripKind::Scene(scene) => match_scene(scene, active_timeline, relative, timelines),
        StripKind::Unsupported => None,
    };
    match &found {
        Some(m) => tracing::debug!(timeline = %m.timeline, frame = m.frame.0, "frame match found"),
        None => tracing::debug!(relative, "no matching frame"),
    }
    found
}

fn match_media(
    active: &MediaStrip,
    active_timeline: &str,
    relative: i64,
    timelines: &[Timeline],
) -> Option<FrameMatch> {
    timelines
        .iter()
        .filter(|t| t.name != active_timeline)
        .find_map(|t| {
            t.usable_strips().find_map(|candidate| {
                let media = candidate.media()?;
                if media.media != active.media || media.source != active.source {
                    return None;
                }
                let frame = candidate.range.start.offset(relative);
                if !candidate.range.shift(media.offset).contains_inclusive(frame) {
                    return None;
                }
                Some(FrameMatch {
                    timeline: t.name.clone(),
                    frame,
                    strip: Some(candidate.name.clone()),
                    camera: None,
                })
            })
        })
}

fn match_scene(
    active: &SceneStrip,
    active_timeline: &str,
    relative: i64,
    timelines: &[Timeline],
) -> Option<FrameMatch> {
    if active.target == active_timeline {
        return None;
    }
    let target = timelines.iter().find(|t| t.name == active.target)?;
    Some(FrameMatch {
        timeline: target.name.clone(),
        frame: FrameIndex(relative),
        strip: None,
        camera: active.camera_target().map(str::to_string),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/matching/matcher.rs"]
mod tests;
