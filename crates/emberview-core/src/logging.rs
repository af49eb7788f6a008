//! Logging facilities for EmberView.
//!
//! EmberView uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the hosting application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core plumbing target.
    pub const CORE: &str = "emberview_core";
    /// UI-thread dispatch queue target.
    pub const DISPATCH: &str = "emberview_core::dispatch";
    /// Engine lifecycle target.
    pub const LIFECYCLE: &str = "emberview_core::lifecycle";
}
