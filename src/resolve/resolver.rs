use crate::{
    foundation::core::FrameIndex,
    session::config::{LinkConfig, ReapplyKey, TargetMatch},
    timeline::model::{Strip, Timeline},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Camera selected by a winning scene strip.
pub struct ResolvedTarget {
    /// Timeline the camera was resolved for.
    pub timeline: String,
    /// Name of the winning strip. Unique only within `timeline`.
    pub strip: String,
    /// Camera the strip selects.
    pub camera: String,
}

#[derive(Clone, Debug, Default)]
/// What the resolver last pushed to the viewport.
///
/// Survives frames where no strip wins, so leaving every strip keeps the last
/// camera instead of flickering back to nothing.
pub struct ResolverState {
    last_applied: Option<ResolvedTarget>,
}

impl ResolverState {
    /// Fresh state with nothing applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// The target applied most recently.
    pub fn last_applied(&self) -> Option<&ResolvedTarget> {
        self.last_applied.as_ref()
    }

    /// `true` when applying `target` again would be redundant under `key`.
    pub fn is_applied(&self, target: &ResolvedTarget, key: ReapplyKey) -> bool {
        let Some(last) = &self.last_applied else {
            return false;
        };
        if last.timeline != target.timeline {
            return false;
        }
        match key {
            ReapplyKey::Strip => last.strip == target.strip,
            ReapplyKey::Camera => last.camera == target.camera,
        }
    }

    /// Record a target after the host applied it.
    pub fn commit(&mut self, target: ResolvedTarget) {
        self.last_applied = Some(target);
    }

    /// Forget the last target, e.g. at the end of a playback session.
    pub fn reset(&mut self) {
        self.last_applied = None;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
/// Outcome of evaluating one frame against the resolver state.
pub enum ResolveStep {
    /// No eligible strip covers the frame. Nothing changes.
    Idle,
    /// A strip wins but does not select a camera.
    NoTarget {
        /// Winning strip.
        strip: String,
    },
    /// The winning target is already live.
    Unchanged {
        /// Current target.
        target: ResolvedTarget,
    },
    /// The viewport must switch to `target`.
    Apply {
        /// Target to apply and then commit.
        target: ResolvedTarget,
    },
}

/// Stateless strip-to-camera resolution.
pub struct Resolver;

impl Resolver {
    /// The scene strip that drives `timeline` at `frame`, if any.
    ///
    /// Eligible strips are unmuted scene strips that play back the displayed
    /// timeline itself and cover `frame`. The highest channel wins, then the
    /// earliest start, then the first in list order.
    pub fn winning_strip(
        timeline: &Timeline,
        frame: FrameIndex,
        rule: TargetMatch,
    ) -> Option<&Strip> {
        let mut best: Option<&Strip> = None;
        for strip in timeline.usable_strips() {
            if strip.muted || !strip.range.contains(frame) {
                continue;
            }
            let Some(scene) = strip.scene() else {
                continue;
            };
            if !rule.matches(&scene.target, &timeline.name) {
                continue;
            }
            best = match best {
                Some(b) if !outranks(strip, b) => Some(b),
                _ => Some(strip),
            };
        }
        best
    }

    /// The camera target at `frame`, ignoring any session state.
    pub fn resolve(
        timeline: &Timeline,
        frame: FrameIndex,
        rule: TargetMatch,
    ) -> Option<ResolvedTarget> {
        let strip = Self::winning_strip(timeline, frame, rule)?;
        target_of(timeline, strip)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(timeline = %timeline.name, frame = frame.0))]
    /// Evaluate `frame` against `state` without mutating it.
    pub fn step(
        state: &ResolverState,
        timeline: &Timeline,
        frame: FrameIndex,
        config: &LinkConfig,
    ) -> ResolveStep {
        let Some(strip) = Self::winning_strip(timeline, frame, config.target_match) else {
            return ResolveStep::Idle;
        };
        let Some(target) = target_of(timeline, strip) else {
            return ResolveStep::NoTarget {
                strip: strip.name.clone(),
            };
        };
        if state.is_applied(&target, config.reapply_key) {
            ResolveStep::Unchanged { target }
        } else {
            ResolveStep::Apply { target }
        }
    }
}

fn outranks(a: &Strip, b: &Strip) -> bool {
    a.channel > b.channel || (a.channel == b.channel && a.range.start < b.range.start)
}

fn target_of(timeline: &Timeline, strip: &Strip) -> Option<ResolvedTarget> {
    let camera = strip.scene()?.camera_target()?;
    Some(ResolvedTarget {
        timeline: timeline.name.clone(),
        strip: strip.name.clone(),
        camera: camera.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
