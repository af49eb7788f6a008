//! Accessibility bridge between the EmberView content engine and the host
//! platform.
//!
//! The engine renders content and knows its accessibility tree; the platform
//! owns the assistive technology and its node/event model. This crate sits
//! between them:
//!
//! - [`session::SessionAccessibility`] is the per-session entry point.
//! - [`projector::NodeProjector`] turns engine node descriptors into platform
//!   node objects, one query at a time.
//! - [`actions::ActionRouter`] translates platform actions into
//!   [`engine::EngineCommand`]s.
//! - [`events::EventEmitter`] builds platform events from engine bundles and
//!   delivers them on the UI thread.
//! - [`settings::AccessibilitySettings`] derives the effective enabled state
//!   from platform state and preferences and pushes it everywhere it needs
//!   to go.
//!
//! # Threading
//!
//! Platform queries, actions and event delivery happen on the UI thread;
//! the engine runs on its own thread behind [`remote::RemoteEngine`]. Engine
//! originated events hop to the UI thread through the session's dispatch
//! queue in FIFO order.

pub mod actions;
pub mod bundle;
pub mod descriptor;
pub mod engine;
pub mod events;
pub mod focus;
mod logging;
pub mod platform;
pub mod projector;
pub mod remote;
pub mod session;
pub mod settings;

pub use bundle::Bundle;
pub use descriptor::{NodeDescriptor, NodeFlags, NO_ID};
pub use engine::{ClipboardOp, ContentEngine, Direction, EngineCommand};
pub use events::EventEmitter;
pub use focus::FocusTracker;
pub use platform::{
    Action, EventType, FocusKind, HostView, MotionEvent, NodeInfo, Platform, PlatformEvent,
};
pub use projector::NodeProjector;
pub use remote::{engine_channel, EngineEndpoint, EngineService, RemoteEngine};
pub use session::{NodeProvider, SessionAccessibility};
pub use settings::{AccessibilitySettings, SettingsSnapshot, FORCE_ACCESSIBILITY_PREF};
