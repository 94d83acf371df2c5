//! Poll-until-true with a timeout.
//!
//! Bridges the gap between handing a description to a render target and
//! the node actually existing: the target offers no commit callback, so the
//! waiter looks for the node on a fixed interval instead.

use std::time::Duration;

use log::trace;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::error::WaitError;

/// Default polling interval.
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Poll `predicate` every [`POLL_INTERVAL`] until it holds or `timeout` passes.
pub async fn wait_until(
    predicate: impl FnMut() -> bool,
    timeout: Duration,
) -> Result<(), WaitError> {
    poll_until(predicate, timeout, POLL_INTERVAL).await
}

/// Poll `predicate` every `every` until it holds or `timeout` passes.
///
/// The first check happens one interval after the call, never immediately.
/// A check that fails once `timeout` has elapsed ends the wait with
/// [`WaitError::Timeout`]. The timer lives inside the returned future, so
/// it stops as soon as the future completes or is dropped.
pub async fn poll_until(
    mut predicate: impl FnMut() -> bool,
    timeout: Duration,
    every: Duration,
) -> Result<(), WaitError> {
    let every = every.max(Duration::from_millis(1));
    let started = Instant::now();
    let mut ticker = interval_at(started + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if predicate() {
            trace!("condition met after {:?}", started.elapsed());
            return Ok(());
        }
        if started.elapsed() >= timeout {
            return Err(WaitError::Timeout(timeout));
        }
    }
}

/// [`poll_until`], abandoned with [`WaitError::Cancelled`] once `cancel` fires.
pub async fn poll_until_cancelled(
    predicate: impl FnMut() -> bool,
    timeout: Duration,
    every: Duration,
    cancel: &CancellationToken,
) -> Result<(), WaitError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WaitError::Cancelled),
        result = poll_until(predicate, timeout, every) => result,
    }
}
