use std::collections::BTreeSet;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{LinkError, LinkResult},
    timeline::{dsl::scene_strip, model::Strip},
};

/// Length given to the strip of the last marker (five seconds at 30 fps).
pub const DEFAULT_MARKER_TAIL: i64 = 150;

/// Channel marker conversion places strips on.
pub const MARKER_CHANNEL: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A timeline marker bound to a camera.
pub struct CameraMarker {
    /// Marker position.
    pub frame: FrameIndex,
    /// Camera bound to the marker. Markers without a camera are ignored.
    #[serde(default)]
    pub camera: String,
}

/// Convert camera-bound markers into consecutive camera strips on `target`.
///
/// Markers are ordered by frame; each strip runs until the next marker and the
/// last one runs for `tail` frames. When several markers share a frame the last
/// one in input order wins. Strip names are the camera names, with a `.NNN`
/// suffix when a camera is used more than once.
pub fn strips_from_camera_markers(
    markers: &[CameraMarker],
    target: &str,
    channel: u32,
    tail: i64,
) -> LinkResult<Vec<Strip>> {
    if tail < 1 {
        return Err(LinkError::validation("marker tail must be >= 1 frame"));
    }

    let mut bound: Vec<&CameraMarker> = markers
        .iter()
        .filter(|m| !m.camera.trim().is_empty())
        .collect();
    bound.sort_by_key(|m| m.frame);

    let mut deduped: Vec<&CameraMarker> = Vec::with_capacity(bound.len());
    for m in bound {
        match deduped.last_mut() {
            Some(prev) if prev.frame == m.frame => *prev = m,
            _ => deduped.push(m),
        }
    }

    let mut names = BTreeSet::new();
    let mut out = Vec::with_capacity(deduped.len());
    for (i, m) in deduped.iter().enumerate() {
        let end = match deduped.get(i + 1) {
            Some(next) => next.frame,
            None => match m.frame.0.checked_add(tail) {
                Some(end) => FrameIndex(end),
                None => {
                    return Err(LinkError::validation(format!(
                        "marker at frame {} is out of range for a {tail}-frame tail",
                        m.frame
                    )));
                }
            },
        };
        let name = unique_name(&mut names, &m.camera);
        out.push(scene_strip(
            name,
            target,
            Some(m.camera.as_str()),
            channel,
            m.frame.0,
            end.0,
        )?);
    }

    tracing::debug!(target_timeline = target, strips = out.len(), "converted camera markers");
    Ok(out)
}

fn unique_name(taken: &mut BTreeSet<String>, base: &str) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}.{n:03}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/markers.rs"]
mod tests;
