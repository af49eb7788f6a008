//! The per-session accessibility bridge.
//!
//! One [`SessionAccessibility`] connects one content-engine session to one
//! hosting view. It owns the shared session state, the UI dispatch queue,
//! the settings state machine, and hands the platform a [`NodeProvider`]
//! that answers node queries and performs actions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use emberview_core::{Dispatcher, EngineLifecycle};

use crate::actions::ActionRouter;
use crate::engine::{ContentEngine, EngineCommand};
use crate::events::EventEmitter;
use crate::focus::FocusTracker;
use crate::logging::targets;
use crate::platform::{Action, FocusKind, HostView, MotionEvent, NodeInfo, Platform};
use crate::projector::NodeProjector;
use crate::settings::AccessibilitySettings;

/// State shared by the projector, router and emitter of one session.
pub(crate) struct SessionState {
    pub(crate) engine: Arc<dyn ContentEngine>,
    pub(crate) platform: Arc<dyn Platform>,
    pub(crate) settings: Arc<AccessibilitySettings>,
    view: RwLock<Option<Arc<dyn HostView>>>,
    attached: AtomicBool,
    pub(crate) focus: FocusTracker,
}

impl SessionState {
    /// Snapshot the current view handle.
    pub(crate) fn view(&self) -> Option<Arc<dyn HostView>> {
        self.view.read().clone()
    }

    /// Whether the engine session is attached and may be queried.
    pub(crate) fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

/// Platform-facing provider of accessible nodes for one session.
///
/// The platform holds one of these per hosting view and calls it on the UI
/// thread whenever the assistive technology queries or acts.
pub struct NodeProvider {
    projector: NodeProjector,
    router: ActionRouter,
}

impl NodeProvider {
    /// Build the platform node for `id`.
    pub fn create_node(&self, id: i32) -> NodeInfo {
        self.projector.create_node(id)
    }

    /// Perform `action` on `id`. Returns whether it was consumed.
    pub fn perform_action(
        &self,
        id: i32,
        action: Action,
        arguments: Option<&crate::bundle::Bundle>,
    ) -> bool {
        self.router.perform(id, action, arguments)
    }

    /// Answer a platform focus query.
    pub fn find_focus(&self, kind: FocusKind) -> Option<NodeInfo> {
        self.projector.find_focus(kind)
    }
}

/// The accessibility bridge for one engine session.
pub struct SessionAccessibility {
    state: Arc<SessionState>,
    dispatcher: Dispatcher,
    emitter: EventEmitter,
    lifecycle: Arc<EngineLifecycle>,
    provider: Mutex<Option<Arc<NodeProvider>>>,
}

impl SessionAccessibility {
    /// Create the bridge for one session.
    ///
    /// Reads the platform's current accessibility state immediately so the
    /// engine starts with correct settings.
    pub fn new(engine: Arc<dyn ContentEngine>, platform: Arc<dyn Platform>) -> Self {
        let lifecycle = Arc::new(EngineLifecycle::new());
        let settings = Arc::new(AccessibilitySettings::new(
            platform.clone(),
            engine.clone(),
            lifecycle.clone(),
        ));
        let state = Arc::new(SessionState {
            engine,
            platform,
            settings: settings.clone(),
            view: RwLock::new(None),
            attached: AtomicBool::new(false),
            focus: FocusTracker::new(),
        });
        let dispatcher = Dispatcher::new();
        let emitter = EventEmitter::new(state.clone(), dispatcher.proxy());
        settings.update_from_platform();
        Self {
            state,
            dispatcher,
            emitter,
            lifecycle,
            provider: Mutex::new(None),
        }
    }

    /// Attach or detach the hosting view.
    ///
    /// The node provider is tied to a view, so it is discarded either way;
    /// detaching also forgets accessibility focus, which belonged to content
    /// the platform can no longer reach.
    pub fn set_view(&self, view: Option<Arc<dyn HostView>>) {
        tracing::debug!(
            target: targets::SESSION,
            attached = view.is_some(),
            "host view changed"
        );
        let detached = view.is_none();
        *self.state.view.write() = view;
        *self.provider.lock() = None;
        if detached {
            self.state.focus.clear();
        }
    }

    /// Get the currently attached view, if any.
    pub fn view(&self) -> Option<Arc<dyn HostView>> {
        self.state.view()
    }

    /// Mark the engine session attached (queryable) or detached.
    pub fn set_attached(&self, attached: bool) {
        self.state.attached.store(attached, Ordering::Release);
    }

    /// Get the node provider for the current view, creating it on first use.
    pub fn node_provider(&self) -> Arc<NodeProvider> {
        let mut provider = self.provider.lock();
        provider
            .get_or_insert_with(|| {
                Arc::new(NodeProvider {
                    projector: NodeProjector::new(self.state.clone()),
                    router: ActionRouter::new(self.state.clone(), self.emitter.clone()),
                })
            })
            .clone()
    }

    /// Feed a hosting-view motion event into touch exploration.
    ///
    /// Returns whether the event was consumed. Only touchscreen hover motion
    /// is, and only while touch exploration is enabled.
    pub fn on_motion_event(&self, event: MotionEvent) -> bool {
        if !self.state.settings.is_touch_exploration_enabled() {
            return false;
        }
        if !event.is_touchscreen_hover() {
            return false;
        }
        self.state.engine.dispatch(EngineCommand::ExploreByTouch {
            x: event.raw_x,
            y: event.raw_y,
        });
        true
    }

    /// The event emitter for this session.
    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    /// The settings state machine for this session.
    pub fn settings(&self) -> &Arc<AccessibilitySettings> {
        &self.state.settings
    }

    /// The engine lifecycle gate; the embedder advances it as the engine
    /// starts up.
    pub fn lifecycle(&self) -> &Arc<EngineLifecycle> {
        &self.lifecycle
    }

    /// The accessibility focus tracker.
    pub fn focused_node_tracker(&self) -> &FocusTracker {
        &self.state.focus
    }

    /// Drain UI-thread work queued by the engine side. The embedder calls
    /// this from its UI event loop.
    pub fn run_pending(&self) -> usize {
        self.dispatcher.run_pending()
    }

    /// The engine owns teardown of its native accessibility counterpart;
    /// this side must never initiate it.
    ///
    /// # Panics
    ///
    /// Always.
    #[cold]
    pub fn dispose_native(&self) -> ! {
        panic!("native accessibility disposal is owned by the content engine");
    }
}
