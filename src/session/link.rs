use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{LinkError, LinkResult},
    host::backend::Host,
    matching::matcher::{FrameMatch, find_match},
    resolve::resolver::{ResolveStep, Resolver, ResolverState},
    session::config::LinkConfig,
    session::events::{LinkEvent, LinkObserver, LinkOutcome},
    toggle::machine::{ToggleAction, ToggleState},
};

/// Per-session core: resolver and toggle state plus the configuration.
///
/// Every handler runs to completion and never fails. Host commands that hit a
/// dangling reference are skipped quietly; other host failures are logged.
#[derive(Clone, Debug, Default)]
pub struct LinkSession {
    config: LinkConfig,
    resolver: ResolverState,
    toggle: ToggleState,
}

impl LinkSession {
    /// Start a session.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            resolver: ResolverState::new(),
            toggle: ToggleState::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Whether frame changes are routed to the resolver by [`Self::dispatch`].
    pub fn link_enabled(&self) -> bool {
        self.config.link_enabled
    }

    /// Resolver state.
    pub fn resolver_state(&self) -> &ResolverState {
        &self.resolver
    }

    /// Toggle state.
    pub fn toggle_state(&self) -> &ToggleState {
        &self.toggle
    }

    /// Forget the last applied camera, e.g. when playback ends.
    pub fn reset(&mut self) {
        self.resolver.reset();
    }

    /// Route one host event. Frame changes are dropped while the link is off.
    pub fn dispatch<H: Host>(&mut self, host: &mut H, event: &LinkEvent) -> LinkOutcome {
        match event {
            LinkEvent::FrameChanged { timeline, frame } => {
                if !self.config.link_enabled {
                    return LinkOutcome::Ignored {
                        reason: "link disabled",
                    };
                }
                self.on_frame_changed(host, timeline, *frame)
            }
            LinkEvent::ToggleRequested { timeline } => self.on_toggle_requested(host, timeline),
            LinkEvent::MatchFrameRequested { timeline, frame } => {
                self.on_match_frame_requested(host, timeline, *frame)
            }
            LinkEvent::LinkToggled { timeline, enabled } => {
                self.set_link_enabled(host, timeline, *enabled)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self, host))]
    /// Resolve `frame` on `timeline` and switch the camera if the target changed.
    pub fn on_frame_changed<H: Host>(
        &mut self,
        host: &mut H,
        timeline: &str,
        frame: FrameIndex,
    ) -> LinkOutcome {
        let Some(view) = host.timeline(timeline) else {
            tracing::debug!("unknown timeline");
            return LinkOutcome::Ignored {
                reason: "unknown timeline",
            };
        };
        let step = Resolver::step(&self.resolver, view, frame, &self.config);

        let mut applied = false;
        if let ResolveStep::Apply { target } = &step {
            match host.apply_camera(timeline, &target.camera) {
                Ok(()) => {
                    tracing::info!(strip = %target.strip, camera = %target.camera, "camera switched");
                    self.resolver.commit(target.clone());
                    applied = true;
                }
                Err(err) => report("apply_camera", &err),
            }
        }
        LinkOutcome::Frame { step, applied }
    }

    #[tracing::instrument(level = "debug", skip(self, host))]
    /// Drill into the selected scene strip, or back out of it.
    pub fn on_toggle_requested<H: Host>(&mut self, host: &mut H, timeline: &str) -> LinkOutcome {
        let Some(view) = host.timeline(timeline) else {
            return LinkOutcome::Ignored {
                reason: "unknown timeline",
            };
        };
        let selected = view.active().cloned();

        if let Some(scene) = selected.as_ref().and_then(|s| s.scene())
            && host.timeline(&scene.target).is_none()
        {
            tracing::debug!(target_timeline = %scene.target, "scene strip points at a missing timeline");
            return LinkOutcome::Toggle {
                action: ToggleAction::Stay,
                applied: false,
            };
        }

        let before = self.toggle.clone();
        let action = self.toggle.toggle(timeline, selected.as_ref());
        let applied = match execute_toggle(host, &action) {
            Ok(applied) => applied,
            Err(err) => {
                report("toggle", &err);
                self.toggle = before;
                false
            }
        };
        if applied {
            tracing::info!(?action, "toggled timeline");
        }
        LinkOutcome::Toggle { action, applied }
    }

    #[tracing::instrument(level = "debug", skip(self, host))]
    /// Jump to the frame in another timeline that matches the selected strip.
    pub fn on_match_frame_requested<H: Host>(
        &mut self,
        host: &mut H,
        timeline: &str,
        frame: FrameIndex,
    ) -> LinkOutcome {
        let Some(view) = host.timeline(timeline) else {
            return LinkOutcome::Ignored {
                reason: "unknown timeline",
            };
        };
        let Some(active) = view.active() else {
            return LinkOutcome::Match {
                found: None,
                applied: false,
            };
        };
        let found = find_match(active, timeline, frame, host.timelines());

        let applied = match &found {
            Some(m) => match execute_match(host, m) {
                Ok(()) => {
                    tracing::info!(timeline = %m.timeline, frame = m.frame.0, "jumped to matching frame");
                    true
                }
                Err(err) => {
                    report("match_frame", &err);
                    false
                }
            },
            None => false,
        };
        LinkOutcome::Match { found, applied }
    }

    #[tracing::instrument(level = "debug", skip(self, host))]
    /// Flip the link switch. Enabling resolves the current frame right away.
    pub fn set_link_enabled<H: Host>(
        &mut self,
        host: &mut H,
        timeline: &str,
        enabled: bool,
    ) -> LinkOutcome {
        self.config.link_enabled = enabled;
        if !enabled {
            return LinkOutcome::Link {
                enabled,
                step: None,
            };
        }
        let Some(frame) = host.timeline(timeline).map(|t| t.current_frame) else {
            return LinkOutcome::Link {
                enabled,
                step: None,
            };
        };
        let step = match self.on_frame_changed(host, timeline, frame) {
            LinkOutcome::Frame { step, .. } => Some(step),
            _ => None,
        };
        LinkOutcome::Link { enabled, step }
    }
}

fn execute_toggle<H: Host>(host: &mut H, action: &ToggleAction) -> LinkResult<bool> {
    match action {
        ToggleAction::Stay => Ok(false),
        ToggleAction::Return { timeline } => {
            host.switch_active_timeline(timeline)?;
            Ok(true)
        }
        ToggleAction::Enter { timeline, camera } => {
            host.switch_active_timeline(timeline)?;
            if let Some(camera) = camera
                && let Err(err) = host.apply_camera(timeline, camera)
            {
                // Already inside; a missing camera only loses the camera view.
                report("apply_camera", &err);
            }
            Ok(true)
        }
    }
}

fn execute_match<H: Host>(host: &mut H, m: &FrameMatch) -> LinkResult<()> {
    host.switch_active_timeline(&m.timeline)?;
    host.set_frame(&m.timeline, m.frame)?;
    // The jump already happened; selection and camera are best effort.
    if let Some(strip) = &m.strip
        && let Err(err) = host.set_active_strip(&m.timeline, strip)
    {
        report("set_active_strip", &err);
    }
    if let Some(camera) = &m.camera
        && let Err(err) = host.apply_camera(&m.timeline, camera)
    {
        report("apply_camera", &err);
    }
    Ok(())
}

fn report(op: &'static str, err: &LinkError) {
    if err.is_not_found() {
        tracing::debug!(op, %err, "skipped: reference no longer exists");
    } else {
        tracing::warn!(op, %err, "host command failed");
    }
}

impl<H: Host> LinkObserver<H> for LinkSession {
    fn on_event(&mut self, host: &mut H, event: &LinkEvent) -> LinkOutcome {
        self.dispatch(host, event)
    }
}

/// A [`LinkSession`] behind a mutex, for hosts that deliver events from more
/// than one thread. Calls are serialized in lock order.
#[derive(Clone, Debug, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<LinkSession>>,
}

impl SharedSession {
    /// Wrap a session.
    pub fn new(session: LinkSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Route one event under the lock.
    pub fn dispatch<H: Host>(&self, host: &mut H, event: &LinkEvent) -> LinkOutcome {
        self.with(|session| session.dispatch(host, event))
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut LinkSession) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<H: Host> LinkObserver<H> for SharedSession {
    fn on_event(&mut self, host: &mut H, event: &LinkEvent) -> LinkOutcome {
        self.dispatch(host, event)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/link.rs"]
mod tests;
