//! Building and delivering platform accessibility events.
//!
//! Events originate on both sides of the bridge: the router emits them
//! directly on the UI thread, and the engine thread hands its own through
//! [`EventEmitter::send_event_native`], which hops to the UI thread first.
//! Delivery is gated on the platform actually having accessibility enabled,
//! unless the view is headless (engine-side tooling drives the bridge with no
//! display attached).

use emberview_core::{debug_assert_ui_thread, DispatchProxy};

use std::sync::Arc;

use crate::bundle::Bundle;
use crate::descriptor::{NodeDescriptor, NodeFlags};
use crate::logging::targets;
use crate::platform::{EventType, PlatformEvent, CLASS_GENERIC_VIEW};
use crate::session::SessionState;

/// Builds platform events and hands them to the hosting view.
#[derive(Clone)]
pub struct EventEmitter {
    state: Arc<SessionState>,
    dispatcher: DispatchProxy,
}

impl EventEmitter {
    pub(crate) fn new(state: Arc<SessionState>, dispatcher: DispatchProxy) -> Self {
        Self { state, dispatcher }
    }

    /// Build and deliver one event. UI thread only.
    ///
    /// `source_info` is the descriptor bundle of the source node, when the
    /// caller has one; `event_data` carries event-specific fields.
    pub fn send_event(
        &self,
        event_type: EventType,
        source_id: i32,
        event_data: Option<&Bundle>,
        source_info: Option<&Bundle>,
    ) {
        debug_assert_ui_thread!();
        let Some(view) = self.state.view() else {
            return;
        };
        if !self.state.settings.is_platform_enabled() && view.has_display() {
            // The engine can enable accessibility internally (devtools); only
            // a headless view justifies delivering in that state.
            return;
        }

        if event_type == EventType::ViewAccessibilityFocused {
            self.state.focus.set(source_id);
        }

        let mut event = PlatformEvent::new(event_type, source_id);
        event.package = self.state.platform.package_name();
        event.enabled = true;
        event.class_name = CLASS_GENERIC_VIEW.to_string();

        if let Some(info) = source_info {
            event.class_name = info.get_str_or("className", CLASS_GENERIC_VIEW).to_string();
            event.checked = NodeDescriptor::decode(info)
                .flags
                .contains(NodeFlags::CHECKED);
            if let Some(text) = info.get_str("text") {
                event.text.push(text.to_string());
            }
        }

        if let Some(data) = event_data {
            if let Some(text) = data.get_str("text") {
                event.text.push(text.to_string());
            }
            event.content_description = data.get_str_or("description", "").to_string();
            event.before_text = data.get_str_or("beforeText", "").to_string();
            event.added_count = data.get_i32_or("addedCount", -1);
            event.removed_count = data.get_i32_or("removedCount", -1);
            event.from_index = data.get_i32_or("fromIndex", -1);
            event.to_index = data.get_i32_or("toIndex", -1);
            event.item_count = data.get_i32_or("itemCount", -1);
            event.current_item_index = data.get_i32_or("currentItemIndex", -1);
            event.scroll_x = data.get_i32_or("scrollX", -1);
            event.scroll_y = data.get_i32_or("scrollY", -1);
            event.max_scroll_x = data.get_i32_or("maxScrollX", -1);
            event.max_scroll_y = data.get_i32_or("maxScrollY", -1);
        }

        tracing::trace!(target: targets::EVENTS, ?event_type, source_id, "deliver event");
        view.deliver_event(event);
    }

    /// Queue an engine-originated event for delivery on the UI thread.
    pub fn send_event_native(
        &self,
        event_type: EventType,
        source_id: i32,
        event_data: Option<Bundle>,
        source_info: Option<Bundle>,
    ) {
        let emitter = self.clone();
        let queued = self.dispatcher.post(move || {
            emitter.send_event(
                event_type,
                source_id,
                event_data.as_ref(),
                source_info.as_ref(),
            );
        });
        if queued.is_err() {
            tracing::warn!(
                target: targets::EVENTS,
                ?event_type,
                source_id,
                "UI dispatcher gone, dropping accessibility event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionAccessibility;
    use crate::testutil::{RecordingEngine, TestPlatform, TestView};
    use serde_json::json;

    fn session(platform: TestPlatform) -> (SessionAccessibility, Arc<TestView>) {
        let session =
            SessionAccessibility::new(Arc::new(RecordingEngine::new()), Arc::new(platform));
        let view = Arc::new(TestView::new());
        session.set_view(Some(view.clone()));
        (session, view)
    }

    #[test]
    fn test_event_built_from_both_bundles() {
        let (session, view) = session(TestPlatform::with_accessibility_enabled());

        let source_info = Bundle::from_value(&json!({
            "className": "emberview.Toggle",
            "flags": NodeFlags::CHECKED.bits(),
            "text": "Wi-Fi",
        }))
        .unwrap();
        let event_data = Bundle::from_value(&json!({
            "text": "on",
            "fromIndex": 2,
            "itemCount": 10,
            "scrollY": 40,
        }))
        .unwrap();

        session.emitter().send_event(
            EventType::WindowContentChanged,
            12,
            Some(&event_data),
            Some(&source_info),
        );

        let events = view.events.lock();
        let event = &events[0];
        assert_eq!(event.source, 12);
        assert_eq!(event.package, "org.emberview.test");
        assert_eq!(event.class_name, "emberview.Toggle");
        assert!(event.checked);
        assert!(event.enabled);
        assert_eq!(event.text, vec!["Wi-Fi".to_string(), "on".to_string()]);
        assert_eq!(event.from_index, 2);
        assert_eq!(event.item_count, 10);
        assert_eq!(event.scroll_y, 40);
        // Fields the data bundle omitted stay unset.
        assert_eq!(event.to_index, -1);
        assert_eq!(event.scroll_x, -1);
        assert!(event.before_text.is_empty());
    }

    #[test]
    fn test_defaults_without_bundles() {
        let (session, view) = session(TestPlatform::with_accessibility_enabled());
        session
            .emitter()
            .send_event(EventType::ViewHoverEnter, 3, None, None);

        let events = view.events.lock();
        assert_eq!(events[0].class_name, CLASS_GENERIC_VIEW);
        assert!(events[0].text.is_empty());
        assert!(!events[0].checked);
    }

    #[test]
    fn test_gated_when_platform_disabled_with_display() {
        let (session, view) = session(TestPlatform::new());
        session
            .emitter()
            .send_event(EventType::ViewClicked, 3, None, None);
        assert!(view.events.lock().is_empty());
    }

    #[test]
    fn test_delivered_headless_when_platform_disabled() {
        let session =
            SessionAccessibility::new(Arc::new(RecordingEngine::new()), Arc::new(TestPlatform::new()));
        let view = Arc::new(TestView::headless());
        session.set_view(Some(view.clone()));

        session
            .emitter()
            .send_event(EventType::ViewClicked, 3, None, None);
        assert_eq!(view.events.lock().len(), 1);
    }

    #[test]
    fn test_no_view_is_a_noop() {
        let session = SessionAccessibility::new(
            Arc::new(RecordingEngine::new()),
            Arc::new(TestPlatform::with_accessibility_enabled()),
        );
        // Must not panic.
        session
            .emitter()
            .send_event(EventType::ViewClicked, 3, None, None);
    }

    #[test]
    fn test_focus_event_updates_tracker() {
        let (session, _view) = session(TestPlatform::with_accessibility_enabled());
        session
            .emitter()
            .send_event(EventType::ViewAccessibilityFocused, 21, None, None);
        assert_eq!(session.focused_node_tracker().current(), Some(21));
    }

    #[test]
    fn test_native_events_hop_through_dispatcher() {
        let (session, view) = session(TestPlatform::with_accessibility_enabled());

        let mut data = Bundle::new();
        data.put_i32("scrollY", 7);
        session
            .emitter()
            .send_event_native(EventType::ViewScrolled, 5, Some(data), None);

        // Nothing delivered until the UI loop drains its queue.
        assert!(view.events.lock().is_empty());
        session.run_pending();

        let events = view.events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::ViewScrolled);
        assert_eq!(events[0].scroll_y, 7);
    }
}
