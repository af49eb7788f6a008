//! Execution-context plumbing for EmberView.
//!
//! EmberView hosts a content engine on its own dedicated thread while the
//! hosting application drives everything platform-facing from its UI thread.
//! This crate provides the pieces both sides rely on to stay on the right
//! thread and in the right order:
//!
//! - **UI-thread identity**: registration and assertion helpers for the one
//!   thread allowed to touch platform objects
//! - **Dispatch queue**: FIFO marshaling of closures onto the UI thread, with
//!   optional blocking posts for callers that must observe completion
//! - **Engine lifecycle**: an ordered state machine for the content engine's
//!   startup milestones, with calls deferred until a milestone is reached
//!
//! # Dispatch Example
//!
//! ```
//! use emberview_core::Dispatcher;
//!
//! let dispatcher = Dispatcher::new();
//! let proxy = dispatcher.proxy();
//!
//! // Any thread may post; the closure runs when the UI thread drains.
//! proxy.post(|| println!("on the UI thread")).unwrap();
//!
//! // On the UI thread:
//! dispatcher.run_pending();
//! ```
//!
//! # Lifecycle Example
//!
//! ```
//! use emberview_core::{EngineLifecycle, EngineState};
//!
//! let lifecycle = EngineLifecycle::new();
//!
//! // Runs later, exactly once, when the engine reaches ProfileReady.
//! lifecycle.call_when(EngineState::ProfileReady, || println!("profile ready"));
//!
//! lifecycle.advance(EngineState::ProfileReady);
//! ```

mod dispatch;
mod error;
mod lifecycle;
pub mod logging;
pub mod ui_thread;

pub use dispatch::{
    completion_pair, CompletionHandle, CompletionWaiter, DispatchProxy, Dispatcher,
};
pub use error::{CoreError, Result};
pub use lifecycle::{EngineLifecycle, EngineState};
pub use ui_thread::{is_ui_thread, register_ui_thread, ui_thread_id};
