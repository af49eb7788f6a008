//! Tracing targets used across the accessibility bridge.

/// Target names, one per subsystem, for selective filtering.
pub mod targets {
    pub const SESSION: &str = "emberview::a11y::session";
    pub const PROJECTOR: &str = "emberview::a11y::projector";
    pub const ACTIONS: &str = "emberview::a11y::actions";
    pub const EVENTS: &str = "emberview::a11y::events";
    pub const SETTINGS: &str = "emberview::a11y::settings";
    pub const REMOTE: &str = "emberview::a11y::remote";
}
