//! Accessibility settings state machine.
//!
//! The effective settings are derived from three inputs: the platform's
//! accessibility state, its touch-exploration state, and a force-enable
//! preference. Every change is pushed to the content engine, mirrored to
//! registered UI listeners, and the engine's native accessibility support is
//! toggled once the engine is ready to accept that call.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use emberview_core::{EngineLifecycle, EngineState};

use crate::engine::{ContentEngine, EngineCommand};
use crate::logging::targets;
use crate::platform::Platform;

/// Preference that force-enables accessibility regardless of platform state.
/// A negative value means forced on.
pub const FORCE_ACCESSIBILITY_PREF: &str = "accessibility.force_disabled";

/// The derived settings, as mirrored to UI listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsSnapshot {
    pub enabled: bool,
    pub touch_enabled: bool,
}

type UiListener = Box<dyn Fn(SettingsSnapshot) + Send + Sync>;

struct Flags {
    platform_enabled: bool,
    /// Raw platform touch-exploration state; the effective value is derived.
    touch_exploration: bool,
    force_enabled: bool,
}

impl Flags {
    fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            enabled: self.platform_enabled || self.force_enabled,
            touch_enabled: (self.platform_enabled && self.touch_exploration)
                || self.force_enabled,
        }
    }
}

/// Derives, stores and propagates the bridge's accessibility settings.
pub struct AccessibilitySettings {
    platform: Arc<dyn Platform>,
    engine: Arc<dyn ContentEngine>,
    lifecycle: Arc<EngineLifecycle>,
    flags: Mutex<Flags>,
    ui_listeners: Mutex<Vec<UiListener>>,
}

impl AccessibilitySettings {
    pub fn new(
        platform: Arc<dyn Platform>,
        engine: Arc<dyn ContentEngine>,
        lifecycle: Arc<EngineLifecycle>,
    ) -> Self {
        Self {
            platform,
            engine,
            lifecycle,
            flags: Mutex::new(Flags {
                platform_enabled: false,
                touch_exploration: false,
                force_enabled: false,
            }),
            ui_listeners: Mutex::new(Vec::new()),
        }
    }

    /// Re-read both platform states and propagate any resulting change.
    pub fn update_from_platform(&self) {
        let mut flags = self.flags.lock();
        let before = flags.snapshot();
        flags.platform_enabled = self.platform.accessibility_enabled();
        flags.touch_exploration = self.platform.touch_exploration_enabled();
        self.propagate_locked(&flags, before);
    }

    /// Platform callback: the OS accessibility state changed.
    pub fn on_accessibility_state_changed(&self, _enabled: bool) {
        self.update_from_platform();
    }

    /// Platform callback: the OS touch-exploration state changed.
    pub fn on_touch_exploration_state_changed(&self, _enabled: bool) {
        self.update_from_platform();
    }

    /// Preference observer callback. Only [`FORCE_ACCESSIBILITY_PREF`] is
    /// understood; other preferences are ignored.
    pub fn on_pref_value(&self, pref: &str, value: i32) {
        if pref != FORCE_ACCESSIBILITY_PREF {
            return;
        }
        let mut flags = self.flags.lock();
        let before = flags.snapshot();
        flags.force_enabled = value < 0;
        self.propagate_locked(&flags, before);
    }

    /// Whether the platform itself reports accessibility enabled. The force
    /// preference deliberately does not contribute here; event gating wants
    /// the platform's own state.
    pub fn is_platform_enabled(&self) -> bool {
        self.flags.lock().platform_enabled
    }

    /// Whether the bridge is effectively enabled.
    pub fn is_enabled(&self) -> bool {
        self.flags.lock().snapshot().enabled
    }

    /// Whether touch exploration is effectively enabled.
    pub fn is_touch_exploration_enabled(&self) -> bool {
        self.flags.lock().snapshot().touch_enabled
    }

    /// Register a listener mirroring every settings change to UI code.
    pub fn add_ui_listener<F>(&self, listener: F)
    where
        F: Fn(SettingsSnapshot) + Send + Sync + 'static,
    {
        self.ui_listeners.lock().push(Box::new(listener));
    }

    fn propagate_locked(&self, flags: &Flags, before: SettingsSnapshot) {
        let snapshot = flags.snapshot();
        if snapshot == before {
            return;
        }
        tracing::info!(
            target: targets::SETTINGS,
            enabled = snapshot.enabled,
            touch_enabled = snapshot.touch_enabled,
            "accessibility settings changed"
        );
        self.engine.dispatch(EngineCommand::UpdateSettings {
            enabled: snapshot.enabled,
            touch_enabled: snapshot.touch_enabled,
        });
        for listener in self.ui_listeners.lock().iter() {
            listener(snapshot);
        }
        let engine = self.engine.clone();
        self.lifecycle.call_when(EngineState::ProfileReady, move || {
            engine.toggle_native_accessibility(snapshot.enabled);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{RecordingEngine, TestPlatform};
    use std::sync::atomic::Ordering;

    fn fixture() -> (Arc<TestPlatform>, Arc<RecordingEngine>, AccessibilitySettings) {
        let platform = Arc::new(TestPlatform::new());
        let engine = Arc::new(RecordingEngine::new());
        let lifecycle = Arc::new(EngineLifecycle::new());
        lifecycle.advance(EngineState::ProfileReady);
        let settings =
            AccessibilitySettings::new(platform.clone(), engine.clone(), lifecycle);
        (platform, engine, settings)
    }

    #[test]
    fn test_derivation_truth_table() {
        let (platform, _engine, settings) = fixture();

        // Nothing enabled.
        settings.update_from_platform();
        assert!(!settings.is_enabled());
        assert!(!settings.is_touch_exploration_enabled());

        // Platform on, touch off.
        platform.accessibility.store(true, Ordering::SeqCst);
        settings.update_from_platform();
        assert!(settings.is_enabled());
        assert!(!settings.is_touch_exploration_enabled());

        // Platform on, touch on.
        platform.touch_exploration.store(true, Ordering::SeqCst);
        settings.update_from_platform();
        assert!(settings.is_touch_exploration_enabled());

        // Touch alone does nothing without platform accessibility.
        platform.accessibility.store(false, Ordering::SeqCst);
        settings.update_from_platform();
        assert!(!settings.is_enabled());
        assert!(!settings.is_touch_exploration_enabled());
    }

    #[test]
    fn test_force_pref_overrides_platform() {
        let (_platform, _engine, settings) = fixture();

        settings.on_pref_value(FORCE_ACCESSIBILITY_PREF, -1);
        assert!(settings.is_enabled());
        assert!(settings.is_touch_exploration_enabled());
        // The platform's own state is reported untouched.
        assert!(!settings.is_platform_enabled());

        settings.on_pref_value(FORCE_ACCESSIBILITY_PREF, 0);
        assert!(!settings.is_enabled());
    }

    #[test]
    fn test_unrelated_pref_ignored() {
        let (_platform, engine, settings) = fixture();
        settings.on_pref_value("accessibility.something_else", -1);
        assert!(!settings.is_enabled());
        assert!(engine.commands.lock().is_empty());
    }

    #[test]
    fn test_change_propagates_once() {
        let (platform, engine, settings) = fixture();
        platform.accessibility.store(true, Ordering::SeqCst);
        settings.update_from_platform();
        // A redundant refresh must not re-dispatch.
        settings.update_from_platform();

        let commands = engine.commands.lock();
        assert_eq!(
            commands.as_slice(),
            &[EngineCommand::UpdateSettings { enabled: true, touch_enabled: false }]
        );
        assert_eq!(engine.toggles.lock().as_slice(), &[true]);
    }

    #[test]
    fn test_toggle_deferred_until_profile_ready() {
        let platform = Arc::new(TestPlatform::new());
        let engine = Arc::new(RecordingEngine::new());
        let lifecycle = Arc::new(EngineLifecycle::new());
        let settings = AccessibilitySettings::new(
            platform.clone(),
            engine.clone(),
            lifecycle.clone(),
        );

        platform.accessibility.store(true, Ordering::SeqCst);
        settings.update_from_platform();

        // The settings push is immediate; the native toggle waits.
        assert_eq!(engine.commands.lock().len(), 1);
        assert!(engine.toggles.lock().is_empty());

        lifecycle.advance(EngineState::ProfileReady);
        assert_eq!(engine.toggles.lock().as_slice(), &[true]);

        lifecycle.advance(EngineState::Running);
        assert_eq!(engine.toggles.lock().len(), 1);
    }

    #[test]
    fn test_ui_listeners_mirror_changes() {
        let (platform, _engine, settings) = fixture();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        settings.add_ui_listener(move |snapshot| sink.lock().push(snapshot));

        platform.accessibility.store(true, Ordering::SeqCst);
        settings.update_from_platform();
        platform.touch_exploration.store(true, Ordering::SeqCst);
        settings.on_touch_exploration_state_changed(true);

        assert_eq!(
            seen.lock().as_slice(),
            &[
                SettingsSnapshot { enabled: true, touch_enabled: false },
                SettingsSnapshot { enabled: true, touch_enabled: true },
            ]
        );
    }
}
