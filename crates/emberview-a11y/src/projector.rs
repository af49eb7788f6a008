//! Projection of engine node descriptors into platform node objects.
//!
//! Every platform query builds a fresh [`NodeInfo`]: the descriptor is
//! fetched from the engine, decoded, and mapped field by field onto the
//! platform's node model. When the engine cannot answer (not attached, no
//! such node, engine gone) the projector degrades to a minimal shell node so
//! the platform always gets something coherent back.

use std::sync::Arc;

use crate::descriptor::{NodeDescriptor, NodeFlags, NO_ID};
use crate::platform::{
    extras, granularity, Action, FocusKind, InputClass, NodeInfo, Rect, CLASS_CONTENT_VIEW,
    CLASS_GENERIC_VIEW, SUPPORTED_ELEMENT_KINDS,
};
use crate::session::SessionState;

/// Per-flag plain boolean properties of the platform node model.
///
/// Accessibility-focused is tracker-driven and context-clickable is feature
/// gated, so both are handled outside this table.
static FLAG_PROPERTIES: &[(NodeFlags, fn(&mut NodeInfo, bool))] = &[
    (NodeFlags::CHECKABLE, |n, v| n.checkable = v),
    (NodeFlags::CHECKED, |n, v| n.checked = v),
    (NodeFlags::CLICKABLE, |n, v| n.clickable = v),
    (NodeFlags::CONTENT_INVALID, |n, v| n.content_invalid = v),
    (NodeFlags::EDITABLE, |n, v| n.editable = v),
    (NodeFlags::ENABLED, |n, v| n.enabled = v),
    (NodeFlags::FOCUSABLE, |n, v| n.focusable = v),
    (NodeFlags::FOCUSED, |n, v| n.focused = v),
    (NodeFlags::LONG_CLICKABLE, |n, v| n.long_clickable = v),
    (NodeFlags::MULTI_LINE, |n, v| n.multi_line = v),
    (NodeFlags::PASSWORD, |n, v| n.password = v),
    (NodeFlags::SCROLLABLE, |n, v| n.scrollable = v),
    (NodeFlags::SELECTED, |n, v| n.selected = v),
    (NodeFlags::VISIBLE_TO_USER, |n, v| n.visible_to_user = v),
    (NodeFlags::SELECTABLE, |n, v| n.selectable = v),
];

/// Builds platform node objects on demand.
pub struct NodeProjector {
    state: Arc<SessionState>,
}

impl NodeProjector {
    pub(crate) fn new(state: Arc<SessionState>) -> Self {
        Self { state }
    }

    /// Build the platform node for `id`.
    pub fn create_node(&self, id: i32) -> NodeInfo {
        let descriptor = if self.state.is_attached() {
            self.state
                .engine
                .get_node_info(id)
                .map(|info| NodeDescriptor::decode(&info))
        } else {
            None
        };

        let view = self.state.view();
        let mut node = match (&view, descriptor) {
            (Some(view), Some(descriptor)) => self.populate(view.as_ref(), id, &descriptor),
            _ => {
                // Shell node: enough identity for the platform to not choke
                // while the session is detached or the engine is silent.
                let mut node = NodeInfo::default();
                if let Some(view) = &view {
                    if view.has_display() {
                        view.on_init_node(&mut node);
                    }
                }
                node.package = self.state.platform.package_name();
                node.class_name = CLASS_CONTENT_VIEW.to_string();
                node
            }
        };
        node.accessibility_focused = self.state.focus.is_focused(id);
        node
    }

    /// Answer a platform focus query.
    ///
    /// Accessibility focus is answered from the tracker when it has one;
    /// everything else falls through to the view's default.
    pub fn find_focus(&self, kind: FocusKind) -> Option<NodeInfo> {
        if kind == FocusKind::Accessibility {
            if let Some(id) = self.state.focus.current() {
                return Some(self.create_node(id));
            }
        }
        self.state.view()?.find_default_focus(kind)
    }

    fn populate(
        &self,
        view: &dyn crate::platform::HostView,
        id: i32,
        descriptor: &NodeDescriptor,
    ) -> NodeInfo {
        let mut node = NodeInfo::default();
        let flags = descriptor.flags;

        if id == NO_ID {
            // The root impersonates the hosting view itself.
            if view.has_display() {
                view.on_init_node(&mut node);
            }
            node.add_action(Action::ScrollBackward);
            node.add_action(Action::ScrollForward);
            node.put_extra(extras::ELEMENT_KINDS, SUPPORTED_ELEMENT_KINDS);
        } else {
            node.parent = Some(descriptor.parent_id);
        }

        node.package = self.state.platform.package_name();
        node.class_name = descriptor.class_name.clone().unwrap_or_else(|| {
            let default = if id == NO_ID { CLASS_CONTENT_VIEW } else { CLASS_GENERIC_VIEW };
            default.to_string()
        });
        node.text = descriptor.text.clone().unwrap_or_default();
        node.children = descriptor.children.clone();

        node.add_action(Action::NextElement);
        node.add_action(Action::PreviousElement);
        node.add_action(Action::ClearAccessibilityFocus);
        node.add_action(Action::AccessibilityFocus);
        node.add_action(Action::PreviousAtGranularity);
        node.add_action(Action::NextAtGranularity);
        node.movement_granularities = granularity::ALL;

        if flags.contains(NodeFlags::CLICKABLE) {
            node.add_action(Action::Click);
        }
        if flags.contains(NodeFlags::EDITABLE) {
            node.add_action(Action::SetSelection);
            node.add_action(Action::Cut);
            node.add_action(Action::Copy);
            node.add_action(Action::Paste);
            node.add_action(Action::SetText);
        }

        for (flag, set) in FLAG_PROPERTIES {
            set(&mut node, flags.contains(*flag));
        }
        if self.state.platform.features().context_click {
            node.context_clickable = Some(flags.contains(NodeFlags::CONTEXT_CLICKABLE));
        }

        if let Some(bounds) = descriptor.bounds {
            node.bounds_in_screen = Some(bounds);
            // Parent-relative bounds only shift the top-left corner; the
            // platform derives the size from screen bounds.
            let origin = view.client_to_screen_origin();
            node.bounds_in_parent = Some(Rect::new(
                bounds.left - origin.x as i32,
                bounds.top - origin.y as i32,
                bounds.right,
                bounds.bottom,
            ));
        }

        if let Some(hint) = &descriptor.hint {
            node.put_extra(extras::HINT, hint.clone());
        }
        if let Some(role) = &descriptor.role {
            node.put_extra(extras::ROLE, role.clone());
        }
        if let Some(role_description) = &descriptor.role_description {
            node.put_extra(extras::ROLE_DESCRIPTION, role_description.clone());
        }

        node.range = descriptor.range.clone();
        node.collection = descriptor.collection.clone();
        node.collection_item = descriptor.collection_item.clone();
        node.input_class = descriptor
            .input_type
            .as_deref()
            .and_then(InputClass::from_input_type);

        node
    }
}
