//! UI-thread identity tracking and assertions.
//!
//! Platform accessible-node construction, accessibility-event delivery and
//! every other touch of a platform UI object must happen on the thread that
//! owns the hosting view. The hosting application registers that thread once
//! at startup; the bridge then verifies affinity with the macros below.
//!
//! ```ignore
//! use emberview_core::debug_assert_ui_thread;
//!
//! fn deliver_event(&self) {
//!     debug_assert_ui_thread!();
//!     // ... safe to touch platform objects ...
//! }
//! ```

use std::sync::OnceLock;
use std::thread::ThreadId;

/// Global storage for the UI thread ID.
static UI_THREAD_ID: OnceLock<ThreadId> = OnceLock::new();

/// Register the current thread as the UI thread.
///
/// Called once by the hosting application before any session is created.
/// Re-registration from the same thread is a no-op.
///
/// # Panics
///
/// Panics if a different thread was already registered.
pub fn register_ui_thread() {
    let current = std::thread::current().id();
    if UI_THREAD_ID.set(current).is_err() && UI_THREAD_ID.get() != Some(&current) {
        panic!(
            "register_ui_thread() called from a different thread than the original. \
             The UI thread can only be registered once."
        );
    }
}

/// Get the UI thread ID if it has been registered.
#[inline]
pub fn ui_thread_id() -> Option<ThreadId> {
    UI_THREAD_ID.get().copied()
}

/// Check if the current thread is the UI thread.
///
/// Returns `true` when no UI thread has been registered yet; early
/// initialization (and headless test harnesses) run before registration.
#[inline]
pub fn is_ui_thread() -> bool {
    match UI_THREAD_ID.get() {
        Some(&ui_id) => std::thread::current().id() == ui_id,
        None => true,
    }
}

/// Panics if the current thread is not the UI thread.
///
/// Always active. Use [`debug_assert_ui_thread!`](crate::debug_assert_ui_thread)
/// for checks that should only run in debug builds.
#[macro_export]
macro_rules! assert_ui_thread {
    () => {
        $crate::assert_ui_thread!("operation must be performed on the UI thread")
    };
    ($msg:expr) => {
        if !$crate::ui_thread::is_ui_thread() {
            $crate::ui_thread::panic_not_ui_thread($msg, file!(), line!());
        }
    };
}

/// Debug-only assertion that panics if not on the UI thread.
///
/// A no-op in release builds, suitable for liberal use on hot paths.
#[macro_export]
macro_rules! debug_assert_ui_thread {
    () => {
        #[cfg(debug_assertions)]
        $crate::assert_ui_thread!()
    };
    ($msg:expr) => {
        #[cfg(debug_assertions)]
        $crate::assert_ui_thread!($msg)
    };
}

/// Internal function generating the panic message for thread violations.
#[cold]
#[inline(never)]
#[doc(hidden)]
pub fn panic_not_ui_thread(msg: &str, file: &str, line: u32) -> ! {
    let current = std::thread::current();
    let current_name = current.name().unwrap_or("<unnamed>").to_string();
    let registered = match ui_thread_id() {
        Some(id) => format!("{id:?}"),
        None => "not yet registered".to_string(),
    };
    panic!(
        "UI THREAD VIOLATION: {msg}\n\
         Location: {file}:{line}\n\
         Current thread: \"{current_name}\" ({:?})\n\
         UI thread: {registered}\n\
         Marshal the operation with DispatchProxy::post() instead.",
        current.id(),
    )
}
