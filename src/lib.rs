//! Scenelink keeps a host editor's camera view in step with the scene strips
//! of its timelines.
//!
//! A timeline is a list of strips on numbered channels. Scene strips name a
//! target timeline and a camera; when the playhead crosses them, the camera of
//! the winning strip becomes the active camera of that timeline.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `Timeline + FrameIndex -> ResolveStep` (which strip wins, and whether it changed)
//! 2. **Toggle**: `ToggleState + selected Strip -> ToggleAction` (drill into a scene strip, or back out)
//! 3. **Match**: `selected Strip + frame -> FrameMatch` (the same moment on another timeline)
//! 4. **Apply**: [`LinkSession`] turns each decision into [`Host`] commands
//!
//! Host events reach the core through an [`EventHub`]. Everything is
//! synchronous: one event is handled to completion before the next.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: resolution and matching are pure functions of their inputs.
//! - **Never fails the host**: handlers log and skip host commands that do not go through.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;
mod host;
mod matching;
mod resolve;
mod session;
mod timeline;
mod toggle;

pub use foundation::core::{FrameIndex, FrameRange};
pub use foundation::error::{LinkError, LinkResult};
pub use host::backend::{Host, HostCommand};
pub use host::memory::MemoryHost;
pub use matching::matcher::{FrameMatch, find_match, relative_frame};
pub use resolve::resolver::{ResolveStep, ResolvedTarget, Resolver, ResolverState};
pub use session::config::{LinkConfig, ReapplyKey, TargetMatch};
pub use session::events::{EventHub, LinkEvent, LinkObserver, LinkOutcome, SubscriptionId};
pub use session::link::{LinkSession, SharedSession};
pub use timeline::dsl::{
    DEFAULT_CAMERA_CHANNEL, TimelineBuilder, camera_strip_at, media_strip, scene_strip,
};
pub use timeline::markers::{
    CameraMarker, DEFAULT_MARKER_TAIL, MARKER_CHANNEL, strips_from_camera_markers,
};
pub use timeline::model::{
    MediaKind, MediaStrip, SceneInput, SceneStrip, Strip, StripKind, Timeline,
};
pub use timeline::project::Project;
pub use toggle::machine::{ToggleAction, ToggleState};
