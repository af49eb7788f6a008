//! The host platform's accessibility surface, as seen by this layer.
//!
//! The real platform objects (the native accessible-node class, the event
//! pipeline, the OS accessibility manager, the hosting view) live outside
//! this crate; what lives here is the boundary: plain data types this layer
//! populates ([`NodeInfo`], [`PlatformEvent`]) and traits the host implements
//! ([`HostView`], [`Platform`]).
//!
//! Keeping the boundary in plain types means every projection and event rule
//! can be tested without a display server or an assistive-technology client.

mod event;
mod node;
mod view;

pub use event::{EventType, PlatformEvent};
pub use node::{
    extras, granularity, Action, InputClass, NodeInfo, CLASS_CONTENT_VIEW, CLASS_GENERIC_VIEW,
    SUPPORTED_ELEMENT_KINDS,
};
pub use view::{HostView, InputSource, MotionAction, MotionEvent};

/// A rectangle in integer coordinates (left/top inclusive corners).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Width derived from the corner delta.
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height derived from the corner delta.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which focus the platform is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusKind {
    /// Input (keyboard) focus.
    Input,
    /// Accessibility focus, owned by the assistive technology.
    Accessibility,
}

/// Optional capabilities of the running platform version.
///
/// Capabilities that are absent are silently not projected; nothing in this
/// layer errors on a missing capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformFeatures {
    /// Whether the platform node model has a context-click property.
    pub context_click: bool,
}

impl Default for PlatformFeatures {
    fn default() -> Self {
        Self { context_click: true }
    }
}

/// Host-OS accessibility services consumed by the bridge.
///
/// Implemented over the platform's accessibility manager; also the source of
/// the package identity stamped onto projected nodes and events.
pub trait Platform: Send + Sync {
    /// Whether the OS reports accessibility enabled (an AT is running).
    fn accessibility_enabled(&self) -> bool;

    /// Whether the OS reports touch exploration enabled.
    fn touch_exploration_enabled(&self) -> bool;

    /// Package identity of the hosting application.
    fn package_name(&self) -> String;

    /// Optional capabilities of this platform version.
    fn features(&self) -> PlatformFeatures {
        PlatformFeatures::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_sizes_from_corner_deltas() {
        let rect = Rect::new(10, 20, 110, 70);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
    }
}
