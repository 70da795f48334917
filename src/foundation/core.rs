use crate::foundation::error::{LinkError, LinkResult};

/// A frame position on a timeline. Frames may be negative.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameIndex(pub i64);

impl FrameIndex {
    /// Shift by a signed number of frames, saturating at the `i64` bounds.
    pub fn offset(self, delta: i64) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open frame interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame covered by the range.
    pub start: FrameIndex,
    /// First frame after the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a non-empty range; `start` must be strictly before `end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> LinkResult<Self> {
        let r = Self { start, end };
        if !r.is_well_formed() {
            return Err(LinkError::validation(format!(
                "frame range start must be < end (got {start}..{end})"
            )));
        }
        Ok(r)
    }

    /// `true` when `start < end`. Deserialized ranges are not checked until ingestion.
    pub fn is_well_formed(self) -> bool {
        self.start.0 < self.end.0
    }

    /// Number of frames covered; zero for malformed ranges.
    pub fn len_frames(self) -> i64 {
        self.end.0.saturating_sub(self.start.0).max(0)
    }

    /// Half-open membership test.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Closed membership test `[start, start + len]`, used for frame matching
    /// where the frame just past the last one still counts as inside.
    pub fn contains_inclusive(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 <= self.start.0.saturating_add(self.len_frames())
    }

    /// Translate both ends by `delta` frames.
    pub fn shift(self, delta: i64) -> Self {
        Self {
            start: self.start.offset(delta),
            end: self.end.offset(delta),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
