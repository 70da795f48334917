use std::collections::BTreeSet;

use crate::{
    foundation::error::{LinkError, LinkResult},
    timeline::model::Timeline,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A set of timelines in host registration order plus the one on screen.
///
/// This is the JSON shape read by the CLI and by [`crate::MemoryHost`].
pub struct Project {
    /// Timelines in registration order.
    pub timelines: Vec<Timeline>,
    /// Name of the displayed timeline.
    pub active_timeline: String,
}

impl Project {
    /// Validate names, strips and the displayed timeline reference.
    pub fn validate(&self) -> LinkResult<()> {
        let mut seen = BTreeSet::new();
        for timeline in &self.timelines {
            timeline.validate()?;
            if !seen.insert(timeline.name.as_str()) {
                return Err(LinkError::validation(format!(
                    "duplicate timeline name '{}'",
                    timeline.name
                )));
            }
        }
        if !seen.contains(self.active_timeline.as_str()) {
            return Err(LinkError::validation(format!(
                "active timeline '{}' does not exist",
                self.active_timeline
            )));
        }
        Ok(())
    }

    /// Ingest host data: drop duplicate timelines and malformed strips.
    ///
    /// Returns the number of strips dropped. A missing active timeline is an
    /// error because nothing can be displayed.
    pub fn sanitize(&mut self) -> LinkResult<usize> {
        let mut seen = BTreeSet::new();
        self.timelines.retain(|t| {
            let fresh = seen.insert(t.name.clone());
            if !fresh {
                tracing::warn!(timeline = %t.name, "dropping duplicate timeline");
            }
            fresh
        });
        let dropped = self.timelines.iter_mut().map(Timeline::sanitize).sum();
        if !seen.contains(&self.active_timeline) {
            return Err(LinkError::not_found(format!(
                "active timeline '{}'",
                self.active_timeline
            )));
        }
        Ok(dropped)
    }

    /// Parse a project from JSON text.
    pub fn from_json(text: &str) -> LinkResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/project.rs"]
mod tests;
