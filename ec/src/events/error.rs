//! Event channel errors

use thiserror::Error;

/// Errors observed by `once` awaiters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The channel (or its listener list) was dropped before the event fired
    #[error("Event channel closed before the event fired")]
    Closed,
}
