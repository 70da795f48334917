use crate::timeline::model::Strip;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// One-entry stack remembering where a drill-in came from.
pub struct ToggleState {
    previous_timeline: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
/// What the host should do in response to a toggle request.
pub enum ToggleAction {
    /// Nothing to do.
    Stay,
    /// Go back to the remembered outer timeline.
    Return {
        /// Timeline to display.
        timeline: String,
    },
    /// Drill into the timeline referenced by the selected scene strip.
    Enter {
        /// Timeline to display.
        timeline: String,
        /// Camera to look through after switching, for camera-input strips.
        camera: Option<String>,
    },
}

impl ToggleState {
    /// Empty state: nothing to return to.
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered outer timeline.
    pub fn previous_timeline(&self) -> Option<&str> {
        self.previous_timeline.as_deref()
    }

    /// Advance the machine for one toggle request.
    ///
    /// | selected strip | previous | action |
    /// |---|---|---|
    /// | none | empty | stay |
    /// | none | set | return, forget previous |
    /// | not a scene strip | set | return, keep previous |
    /// | not a scene strip | empty | stay |
    /// | scene strip | any | remember `current_timeline`, enter target |
    pub fn toggle(&mut self, current_timeline: &str, active_strip: Option<&Strip>) -> ToggleAction {
        match active_strip {
            None => match self.previous_timeline.take() {
                Some(timeline) => ToggleAction::Return { timeline },
                None => ToggleAction::Stay,
            },
            Some(strip) => match strip.scene() {
                Some(scene) => {
                    self.previous_timeline = Some(current_timeline.to_string());
                    ToggleAction::Enter {
                        timeline: scene.target.clone(),
                        camera: scene.camera_target().map(str::to_string),
                    }
                }
                None => match &self.previous_timeline {
                    Some(timeline) => ToggleAction::Return {
                        timeline: timeline.clone(),
                    },
                    None => ToggleAction::Stay,
                },
            },
        }
    }

    /// Forget the remembered timeline.
    pub fn clear(&mut self) {
        self.previous_timeline = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/toggle/machine.rs"]
mod tests;
