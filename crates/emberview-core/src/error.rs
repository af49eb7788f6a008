//! Error types for EmberView core.

use std::fmt;

/// The error type for EmberView core operations.
///
/// Most of the accessibility bridge is deliberately infallible at its outer
/// boundary; the only internal operation that can fail is handing work to a
/// dispatch queue whose consumer is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The dispatcher has been dropped; posted work was discarded.
    DispatcherClosed,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DispatcherClosed => {
                write!(f, "Dispatch queue is closed; the UI-thread consumer was dropped")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// A specialized Result type for EmberView core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
