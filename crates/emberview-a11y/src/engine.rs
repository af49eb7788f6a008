//! The content-engine side of the bridge.
//!
//! [`ContentEngine`] is the seam the rest of this crate talks through: node
//! queries, routed commands and the native accessibility toggle. The in-tree
//! implementation is [`RemoteEngine`](crate::remote::RemoteEngine), which
//! forwards over a channel to the engine thread.

use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;

/// Direction of element or text navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Previous,
}

/// Clipboard operation on an editable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardOp {
    Cut,
    Copy,
    Paste,
}

/// A command routed to the content engine's accessibility service.
///
/// Commands address the node that currently holds the engine's virtual
/// cursor, so they carry no node identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EngineCommand {
    /// Activate the cursor node. `key_index` is set when the activation came
    /// from a braille routing key.
    Activate { key_index: Option<i32> },
    LongPress,
    ScrollForward,
    ScrollBackward,
    Select,
    /// Move the virtual cursor to the engine's focused node.
    CursorToFocused,
    /// Move the virtual cursor to the next/previous element, optionally
    /// constrained to one element kind.
    Navigate {
        direction: Direction,
        element_kind: Option<String>,
    },
    /// Move the text cursor by one granularity step.
    MoveByGranularity {
        direction: Direction,
        granularity: i32,
        extend_selection: bool,
    },
    SetSelection { start: i32, end: i32 },
    Clipboard { op: ClipboardOp },
    /// Move the virtual cursor to whatever lies under a screen point.
    ExploreByTouch { x: f64, y: f64 },
    /// Push the current accessibility settings into the engine.
    UpdateSettings { enabled: bool, touch_enabled: bool },
}

/// The content engine as seen by the accessibility bridge.
pub trait ContentEngine: Send + Sync {
    /// Fetch the descriptor bundle for one node. `None` when the engine has
    /// no such node or cannot answer.
    fn get_node_info(&self, node_id: i32) -> Option<Bundle>;

    /// Replace the text of an editable node.
    fn set_text(&self, node_id: i32, text: &str);

    /// Route a command to the engine's accessibility service.
    fn dispatch(&self, command: EngineCommand);

    /// Start or stop the engine's native accessibility support.
    fn toggle_native_accessibility(&self, enabled: bool);
}
