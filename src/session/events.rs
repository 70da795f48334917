use crate::{
    foundation::core::FrameIndex,
    host::backend::Host,
    matching::matcher::FrameMatch,
    resolve::resolver::ResolveStep,
    toggle::machine::ToggleAction,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
/// Events the host delivers to the core.
pub enum LinkEvent {
    /// The playhead of `timeline` moved to `frame`.
    FrameChanged {
        /// Displayed timeline.
        timeline: String,
        /// New playhead position.
        frame: FrameIndex,
    },
    /// The user asked to drill into or back out of a scene strip.
    ToggleRequested {
        /// Displayed timeline.
        timeline: String,
    },
    /// The user asked for the matching frame in another timeline.
    MatchFrameRequested {
        /// Displayed timeline.
        timeline: String,
        /// Playhead position on it.
        frame: FrameIndex,
    },
    /// The host flipped the "link sequencer to viewport" switch.
    LinkToggled {
        /// Displayed timeline.
        timeline: String,
        /// New switch position.
        enabled: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
/// What handling one [`LinkEvent`] did.
pub enum LinkOutcome {
    /// The event was not acted upon.
    Ignored {
        /// Short reason, for logs and the CLI.
        reason: &'static str,
    },
    /// A frame change went through the resolver.
    Frame {
        /// Resolver decision.
        step: ResolveStep,
        /// `true` when the host accepted a camera switch.
        applied: bool,
    },
    /// A toggle request went through the state machine.
    Toggle {
        /// State machine decision.
        action: ToggleAction,
        /// `true` when the host switched timelines.
        applied: bool,
    },
    /// A frame match request was served.
    Match {
        /// Match found, if any.
        found: Option<FrameMatch>,
        /// `true` when the host jumped to it.
        applied: bool,
    },
    /// The link switch changed.
    Link {
        /// New switch position.
        enabled: bool,
        /// Immediate resolution performed when the link was enabled.
        step: Option<ResolveStep>,
    },
}

impl LinkOutcome {
    /// `true` when the host state changed as a result of the event.
    pub fn applied(&self) -> bool {
        match self {
            Self::Ignored { .. } => false,
            Self::Frame { applied, .. }
            | Self::Toggle { applied, .. }
            | Self::Match { applied, .. } => *applied,
            Self::Link { step, .. } => matches!(step, Some(ResolveStep::Apply { .. })),
        }
    }
}

/// Something the host can register to receive [`LinkEvent`]s.
pub trait LinkObserver<H: Host> {
    /// Handle one event, synchronously and to completion.
    fn on_event(&mut self, host: &mut H, event: &LinkEvent) -> LinkOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
/// Handle returned by [`EventHub::subscribe`].
pub struct SubscriptionId(u64);

/// Explicit registration point between host events and observers.
///
/// Observers are called in subscription order, one event at a time.
pub struct EventHub<H: Host> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn LinkObserver<H>>)>,
}

impl<H: Host> Default for EventHub<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> EventHub<H> {
    /// Hub with no observers.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It receives every event dispatched from now on.
    pub fn subscribe(&mut self, observer: impl LinkObserver<H> + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        tracing::debug!(?id, "observer subscribed");
        id
    }

    /// Remove an observer. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        let removed = self.observers.len() != before;
        if removed {
            tracing::debug!(?id, "observer unsubscribed");
        }
        removed
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every observer in subscription order.
    pub fn dispatch(&mut self, host: &mut H, event: &LinkEvent) -> Vec<(SubscriptionId, LinkOutcome)> {
        let mut outcomes = Vec::with_capacity(self.observers.len());
        for (id, observer) in &mut self.observers {
            outcomes.push((*id, observer.on_event(host, event)));
        }
        outcomes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/events.rs"]
mod tests;
