/// Kinds of accessibility events delivered to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    ViewClicked,
    ViewFocused,
    ViewAccessibilityFocused,
    ViewTextChanged,
    ViewTextSelectionChanged,
    ViewScrolled,
    ViewHoverEnter,
    WindowContentChanged,
    WindowStateChanged,
    Announcement,
}

/// One accessibility event, fully built and ready for platform delivery.
///
/// Numeric fields use `-1` for "unset", matching what the platform's event
/// object reports for fields that were never written.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformEvent {
    pub event_type: EventType,
    /// Identifier of the node the event is about.
    pub source: i32,
    pub package: String,
    pub class_name: String,
    pub enabled: bool,
    pub checked: bool,
    /// Text segments, in the order they were appended.
    pub text: Vec<String>,
    pub content_description: String,
    pub before_text: String,
    pub added_count: i32,
    pub removed_count: i32,
    pub from_index: i32,
    pub to_index: i32,
    pub item_count: i32,
    pub current_item_index: i32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub max_scroll_x: i32,
    pub max_scroll_y: i32,
}

impl PlatformEvent {
    /// Create an event with every optional field unset.
    pub fn new(event_type: EventType, source: i32) -> Self {
        Self {
            event_type,
            source,
            package: String::new(),
            class_name: String::new(),
            enabled: false,
            checked: false,
            text: Vec::new(),
            content_description: String::new(),
            before_text: String::new(),
            added_count: -1,
            removed_count: -1,
            from_index: -1,
            to_index: -1,
            item_count: -1,
            current_item_index: -1,
            scroll_x: -1,
            scroll_y: -1,
            max_scroll_x: -1,
            max_scroll_y: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_has_unset_defaults() {
        let event = PlatformEvent::new(EventType::ViewScrolled, 5);
        assert_eq!(event.source, 5);
        assert_eq!(event.scroll_x, -1);
        assert_eq!(event.item_count, -1);
        assert!(event.text.is_empty());
        assert!(event.class_name.is_empty());
        assert!(!event.enabled);
    }
}
