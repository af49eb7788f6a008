//! Content-engine lifecycle tracking with deferred call delivery.
//!
//! The engine passes through ordered startup milestones. Some calls into the
//! engine (accessibility toggling, for one) are only valid once the profile
//! is ready; callers that run earlier hand their call to the lifecycle, which
//! delivers it exactly once when the milestone is reached.

use parking_lot::Mutex;

use crate::logging::targets;

/// Ordered startup milestones of the content engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EngineState {
    /// The engine process/thread is starting up.
    Launching,
    /// The profile is loaded; engine-side services accept calls.
    ProfileReady,
    /// Fully running.
    Running,
    /// Shut down; no further calls are delivered.
    Exited,
}

/// A call deferred until the engine reaches a milestone.
type DeferredCall = Box<dyn FnOnce() + Send + 'static>;

struct Pending {
    threshold: EngineState,
    call: DeferredCall,
}

struct Inner {
    state: EngineState,
    pending: Vec<Pending>,
}

/// Tracks the engine's lifecycle state and queues calls until milestones.
pub struct EngineLifecycle {
    inner: Mutex<Inner>,
}

impl EngineLifecycle {
    /// Create a lifecycle tracker in the [`EngineState::Launching`] state.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: EngineState::Launching,
                pending: Vec::new(),
            }),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> EngineState {
        self.inner.lock().state
    }

    /// Check whether the engine has reached at least `state`.
    pub fn is_at_least(&self, state: EngineState) -> bool {
        self.inner.lock().state >= state
    }

    /// Run `call` now if the engine has reached `threshold`, otherwise queue
    /// it to run exactly once when [`advance`](Self::advance) gets there.
    pub fn call_when<F>(&self, threshold: EngineState, call: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let ready = {
            let mut inner = self.inner.lock();
            if inner.state >= threshold {
                true
            } else {
                inner.pending.push(Pending {
                    threshold,
                    call: Box::new(call),
                });
                return;
            }
        };
        debug_assert!(ready);
        call();
    }

    /// Advance to `state`, running any deferred calls whose threshold has now
    /// been reached, in registration order.
    ///
    /// Backwards (or repeated) transitions are ignored and return `false`.
    pub fn advance(&self, state: EngineState) -> bool {
        let matured: Vec<DeferredCall> = {
            let mut inner = self.inner.lock();
            if state <= inner.state {
                return false;
            }
            inner.state = state;
            let mut matured = Vec::new();
            let mut remaining = Vec::new();
            for pending in inner.pending.drain(..) {
                if pending.threshold <= state {
                    matured.push(pending.call);
                } else {
                    remaining.push(pending);
                }
            }
            inner.pending = remaining;
            matured
        };
        tracing::debug!(
            target: targets::LIFECYCLE,
            ?state,
            delivered = matured.len(),
            "engine lifecycle advanced"
        );
        for call in matured {
            call();
        }
        true
    }

    /// Get the number of calls still waiting on a milestone.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl Default for EngineLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_immediate_when_ready() {
        let lifecycle = EngineLifecycle::new();
        lifecycle.advance(EngineState::ProfileReady);

        let runs = Arc::new(AtomicUsize::new(0));
        let r = runs.clone();
        lifecycle.call_when(EngineState::ProfileReady, move || {
            r.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(lifecycle.pending_count(), 0);
    }

    #[test]
    fn test_deferred_runs_exactly_once() {
        let lifecycle = EngineLifecycle::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let r = runs.clone();
        lifecycle.call_when(EngineState::ProfileReady, move || {
            r.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(lifecycle.pending_count(), 1);

        lifecycle.advance(EngineState::ProfileReady);
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // Further transitions must not re-deliver.
        lifecycle.advance(EngineState::Running);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(lifecycle.pending_count(), 0);
    }

    #[test]
    fn test_skipping_milestones_delivers() {
        let lifecycle = EngineLifecycle::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let r = runs.clone();
        lifecycle.call_when(EngineState::ProfileReady, move || {
            r.fetch_add(1, Ordering::SeqCst);
        });

        // Jumping straight past the threshold still matures the call.
        lifecycle.advance(EngineState::Running);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_regression_ignored() {
        let lifecycle = EngineLifecycle::new();
        lifecycle.advance(EngineState::Running);
        assert!(!lifecycle.advance(EngineState::ProfileReady));
        assert_eq!(lifecycle.state(), EngineState::Running);
    }

    #[test]
    fn test_calls_delivered_in_registration_order() {
        let lifecycle = EngineLifecycle::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..4 {
            let order = order.clone();
            lifecycle.call_when(EngineState::ProfileReady, move || order.lock().push(i));
        }
        lifecycle.advance(EngineState::ProfileReady);
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
    }
}
