//! Error types

use std::time::Duration;

/// Errors from polling a condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
    /// The condition never held within the bound.
    #[error("Condition not met within {0:?}")]
    Timeout(Duration),

    /// The wait was abandoned because its owner was torn down.
    #[error("Wait cancelled")]
    Cancelled,
}

/// Errors raised by a collapse wrapper instance.
///
/// Only [`CollapseError::InvalidUpdate`] reaches the host from normal
/// processing. `Timeout` and `MissingElement` describe skipped transitions
/// and are reported inside [`crate::Outcome::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum CollapseError {
    /// An update broke the caller contract (e.g. no `id`).
    #[error("Invalid update: {reason}")]
    InvalidUpdate { reason: String },

    /// The container was not committed in time.
    #[error("Element '#{id}' was not committed within {timeout:?}")]
    Timeout { id: String, timeout: Duration },

    /// The container disappeared between the commit and the lookup.
    #[error("Element '#{id}' is not live")]
    MissingElement { id: String },

    /// The instance no longer accepts updates.
    #[error("Wrapper instance is unmounted")]
    Unmounted,

    /// The instance task panicked or was aborted.
    #[error("Wrapper task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CollapseError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidUpdate {
            reason: reason.into(),
        }
    }

    /// True for conditions the wrapper absorbs instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::MissingElement { .. })
    }
}
