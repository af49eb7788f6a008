//! Accessibility-focus tracking.
//!
//! The assistive technology moves its focus through events this layer emits;
//! the tracker remembers the last node it was told about so projections can
//! report the focused state and focus queries can answer without a round trip
//! to the engine. The value is written on the UI thread and read from
//! platform query threads, hence the atomic.

use std::sync::atomic::{AtomicI32, Ordering};

/// Sentinel stored when no node holds accessibility focus.
///
/// `0` is reserved by the engine's identifier scheme and never names a real
/// node, so it is free to mean "no focus". Note the conceptual root uses
/// [`NO_ID`](crate::descriptor::NO_ID), which is a real focus target.
const NO_FOCUS: i32 = 0;

/// Remembers which node currently holds accessibility focus.
#[derive(Debug, Default)]
pub struct FocusTracker {
    node: AtomicI32,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self {
            node: AtomicI32::new(NO_FOCUS),
        }
    }

    /// Record `id` as the focused node.
    pub fn set(&self, id: i32) {
        self.node.store(id, Ordering::Relaxed);
    }

    /// Forget the focused node.
    pub fn clear(&self) {
        self.node.store(NO_FOCUS, Ordering::Relaxed);
    }

    /// Get the focused node, if any.
    pub fn current(&self) -> Option<i32> {
        let id = self.node.load(Ordering::Relaxed);
        (id != NO_FOCUS).then_some(id)
    }

    /// Check whether `id` is the focused node.
    pub fn is_focused(&self, id: i32) -> bool {
        id != NO_FOCUS && self.node.load(Ordering::Relaxed) == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::NO_ID;

    #[test]
    fn test_starts_unfocused() {
        let tracker = FocusTracker::new();
        assert_eq!(tracker.current(), None);
        assert!(!tracker.is_focused(1));
        assert!(!tracker.is_focused(NO_FOCUS));
    }

    #[test]
    fn test_set_and_clear() {
        let tracker = FocusTracker::new();
        tracker.set(17);
        assert_eq!(tracker.current(), Some(17));
        assert!(tracker.is_focused(17));
        assert!(!tracker.is_focused(18));

        tracker.clear();
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn test_root_is_a_real_focus_target() {
        let tracker = FocusTracker::new();
        tracker.set(NO_ID);
        assert_eq!(tracker.current(), Some(NO_ID));
        assert!(tracker.is_focused(NO_ID));
    }
}
