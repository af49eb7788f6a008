use crate::platform::{FocusKind, NodeInfo, PlatformEvent, Point};

/// Where a motion event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Touchscreen,
    Mouse,
    Keyboard,
    Other,
}

/// Motion event actions relevant to touch exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionAction {
    HoverEnter,
    HoverMove,
    HoverExit,
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer motion event as reported by the hosting view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub source: InputSource,
    pub action: MotionAction,
    /// Raw x coordinate, in screen space.
    pub raw_x: f64,
    /// Raw y coordinate, in screen space.
    pub raw_y: f64,
}

impl MotionEvent {
    /// Check whether this is a touchscreen hover movement, the only motion
    /// shape touch exploration consumes.
    pub fn is_touchscreen_hover(&self) -> bool {
        self.source == InputSource::Touchscreen
            && matches!(
                self.action,
                MotionAction::HoverEnter | MotionAction::HoverMove | MotionAction::HoverExit
            )
    }
}

/// The hosting view the bridge projects into and emits events through.
///
/// Implementations are platform-side and must be callable from the UI thread;
/// the bridge never calls a view from the engine thread.
pub trait HostView: Send + Sync {
    /// Let the view stamp its own identity (its real class, its bounds) onto
    /// a node that represents the view itself.
    fn on_init_node(&self, node: &mut NodeInfo);

    /// Ask the view to run the platform-default handling for an action the
    /// bridge has no mapping for. Returns whether the action was handled.
    fn perform_default_action(&self, _node_id: i32, _action: u32) -> bool {
        false
    }

    /// The node the platform should consider focused when the bridge has no
    /// answer of its own.
    fn find_default_focus(&self, _kind: FocusKind) -> Option<NodeInfo> {
        None
    }

    /// Whether the view is currently backed by a display surface.
    fn has_display(&self) -> bool {
        true
    }

    /// Screen-space origin of the view's client area.
    fn client_to_screen_origin(&self) -> Point {
        Point::ZERO
    }

    /// Hand a fully built event to the platform's event pipeline.
    fn deliver_event(&self, event: PlatformEvent);
}
