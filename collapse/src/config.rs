//! Wrapper configuration.

use std::time::Duration;

use crate::waiter::POLL_INTERVAL;

/// Timing and consumption behaviour of a wrapper instance.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use collapse::WrapperConfig;
///
/// let config = WrapperConfig::default()
///     .commit_timeout(Duration::from_millis(500))
///     .coalesce_pending(true);
/// assert_eq!(config.poll_interval, Duration::from_millis(20));
/// ```
#[derive(Debug, Clone)]
pub struct WrapperConfig {
    /// How often to check whether the container has been committed.
    pub poll_interval: Duration,
    /// How long to wait for the commit before skipping the transition.
    pub commit_timeout: Duration,
    /// Drop queued updates in favour of the newest before processing.
    pub coalesce_pending: bool,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            commit_timeout: Duration::from_millis(1000),
            coalesce_pending: false,
        }
    }
}

impl WrapperConfig {
    /// Sets the commit poll interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the commit timeout.
    pub fn commit_timeout(mut self, timeout: Duration) -> Self {
        self.commit_timeout = timeout;
        self
    }

    /// Enables or disables coalescing of queued updates.
    pub fn coalesce_pending(mut self, enabled: bool) -> Self {
        self.coalesce_pending = enabled;
        self
    }
}
