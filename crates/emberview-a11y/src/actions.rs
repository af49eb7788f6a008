//! Routing of platform accessibility actions into engine commands.
//!
//! Every action arrives on the UI thread from the platform's node objects.
//! The router translates each into an [`EngineCommand`], emits the platform
//! event the assistive technology expects in response, and reports back
//! whether the action was consumed.

use std::sync::Arc;

use crate::bundle::Bundle;
use crate::descriptor::{NodeDescriptor, NodeFlags, NO_ID};
use crate::engine::{ClipboardOp, Direction, EngineCommand};
use crate::events::EventEmitter;
use crate::logging::targets;
use crate::platform::{Action, EventType};
use crate::session::SessionState;

/// Braille routing keys activate by index; the engine encodes the index as
/// an offset below this base so an activation and a key press share one
/// command. Anything at or below the base is a routing-key activation.
pub const BRAILLE_CLICK_BASE_INDEX: i32 = -275_000_000;

/// Keys understood inside action argument bundles.
pub mod arg_keys {
    pub const ELEMENT_KIND: &str = "elementKind";
    pub const GRANULARITY: &str = "granularity";
    pub const EXTEND_SELECTION: &str = "extendSelection";
    pub const SELECTION_START: &str = "selectionStart";
    pub const SELECTION_END: &str = "selectionEnd";
    pub const SET_TEXT_VALUE: &str = "setTextValue";
}

/// Translates platform actions into engine commands and response events.
pub struct ActionRouter {
    state: Arc<SessionState>,
    emitter: EventEmitter,
}

impl ActionRouter {
    pub(crate) fn new(state: Arc<SessionState>, emitter: EventEmitter) -> Self {
        Self { state, emitter }
    }

    /// Perform `action` on `node_id`. Returns whether it was consumed.
    pub fn perform(&self, node_id: i32, action: Action, arguments: Option<&Bundle>) -> bool {
        tracing::debug!(target: targets::ACTIONS, node_id, ?action, "perform action");
        match action {
            Action::AccessibilityFocus => {
                self.focus_node(node_id);
                true
            }
            Action::Click => {
                self.click_node(node_id);
                true
            }
            Action::LongClick => {
                self.state.engine.dispatch(EngineCommand::LongPress);
                true
            }
            Action::ScrollForward => {
                self.state.engine.dispatch(EngineCommand::ScrollForward);
                true
            }
            Action::ScrollBackward => {
                self.state.engine.dispatch(EngineCommand::ScrollBackward);
                true
            }
            Action::Select => {
                self.state.engine.dispatch(EngineCommand::Select);
                true
            }
            Action::NextElement => {
                self.navigate(Direction::Next, arguments);
                true
            }
            Action::PreviousElement => {
                self.navigate(Direction::Previous, arguments);
                true
            }
            Action::NextAtGranularity => {
                self.move_by_granularity(Direction::Next, arguments);
                true
            }
            Action::PreviousAtGranularity => {
                self.move_by_granularity(Direction::Previous, arguments);
                true
            }
            Action::SetSelection => match arguments {
                Some(args) => {
                    self.state.engine.dispatch(EngineCommand::SetSelection {
                        start: args.get_i32_or(arg_keys::SELECTION_START, 0),
                        end: args.get_i32_or(arg_keys::SELECTION_END, 0),
                    });
                    true
                }
                None => false,
            },
            Action::Cut => {
                self.clipboard(ClipboardOp::Cut);
                true
            }
            Action::Copy => {
                self.clipboard(ClipboardOp::Copy);
                true
            }
            Action::Paste => {
                self.clipboard(ClipboardOp::Paste);
                true
            }
            Action::SetText => {
                let Some(text) = arguments.and_then(|args| args.get_str(arg_keys::SET_TEXT_VALUE))
                else {
                    return false;
                };
                if self.state.is_attached() {
                    self.state.engine.set_text(node_id, text);
                }
                true
            }
            // Clearing accessibility focus is left to the platform default;
            // the engine moves its cursor only on focus, never on clear.
            Action::ClearAccessibilityFocus => self.default_action(node_id, action),
            Action::Other(_) => self.default_action(node_id, action),
        }
    }

    /// Move accessibility focus to `node_id`.
    ///
    /// When the engine already has the node input-focused the virtual cursor
    /// follows the engine's focus instead of the requested node; the engine
    /// then emits its own focus event for the node it lands on.
    fn focus_node(&self, node_id: i32) {
        if node_id == NO_ID {
            self.emitter
                .send_event(EventType::ViewAccessibilityFocused, NO_ID, None, None);
            return;
        }
        let info = self.fetch_info(node_id);
        let flags = self.decoded_flags(info.as_ref());
        if flags.contains(NodeFlags::FOCUSED) {
            self.state.engine.dispatch(EngineCommand::CursorToFocused);
        } else {
            self.emitter.send_event(
                EventType::ViewAccessibilityFocused,
                node_id,
                None,
                info.as_ref(),
            );
        }
    }

    /// Activate `node_id` and emit the click unless the node manages its own
    /// click feedback through selection or checked-state events.
    fn click_node(&self, node_id: i32) {
        self.state
            .engine
            .dispatch(EngineCommand::Activate { key_index: None });
        let info = self.fetch_info(node_id);
        let flags = self.decoded_flags(info.as_ref());
        if !flags.intersects(NodeFlags::SELECTABLE | NodeFlags::CHECKABLE) {
            self.emitter
                .send_event(EventType::ViewClicked, node_id, None, info.as_ref());
        }
    }

    fn navigate(&self, direction: Direction, arguments: Option<&Bundle>) {
        let element_kind = arguments
            .and_then(|args| args.get_str(arg_keys::ELEMENT_KIND))
            .map(str::to_string);
        self.state
            .engine
            .dispatch(EngineCommand::Navigate { direction, element_kind });
    }

    fn move_by_granularity(&self, direction: Direction, arguments: Option<&Bundle>) {
        let granularity = arguments
            .map(|args| args.get_i32_or(arg_keys::GRANULARITY, 0))
            .unwrap_or(0);
        if granularity <= BRAILLE_CLICK_BASE_INDEX {
            self.state.engine.dispatch(EngineCommand::Activate {
                key_index: Some(BRAILLE_CLICK_BASE_INDEX - granularity),
            });
        } else if granularity > 0 {
            let extend_selection = arguments
                .map(|args| args.get_bool_or(arg_keys::EXTEND_SELECTION, false))
                .unwrap_or(false);
            self.state.engine.dispatch(EngineCommand::MoveByGranularity {
                direction,
                granularity,
                extend_selection,
            });
        }
        // A zero or absent granularity is a malformed request; consumed
        // without effect.
    }

    fn clipboard(&self, op: ClipboardOp) {
        self.state.engine.dispatch(EngineCommand::Clipboard { op });
    }

    fn default_action(&self, node_id: i32, action: Action) -> bool {
        let raw = match action {
            Action::Other(raw) => raw,
            _ => 0,
        };
        match self.state.view() {
            Some(view) => view.perform_default_action(node_id, raw),
            None => false,
        }
    }

    fn fetch_info(&self, node_id: i32) -> Option<Bundle> {
        if self.state.is_attached() {
            self.state.engine.get_node_info(node_id)
        } else {
            None
        }
    }

    fn decoded_flags(&self, info: Option<&Bundle>) -> NodeFlags {
        info.map(|b| NodeDescriptor::decode(b).flags)
            .unwrap_or_default()
    }
}
