//! Spawned wrapper instances.

use std::sync::Arc;

use futures::stream;
use log::info;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::component::Component;
use crate::error::CollapseError;
use crate::state::InstanceState;
use crate::surface::RenderTarget;
use crate::update::PropertyUpdate;
use crate::wrapper::CollapseWrapper;

impl<C: Component> CollapseWrapper<C> {
    /// Mount an instance on its own task, fed through the returned handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<T: RenderTarget>(&self, target: Arc<T>, baseline: Option<bool>) -> Mounted {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let instance = self
            .instance(target, baseline)
            .with_cancellation(cancel.clone());
        let state = instance.subscribe();

        let updates = stream::poll_fn(move |cx| rx.poll_recv(cx));
        let task = tokio::spawn(instance.run(updates));
        info!("mounted collapse instance (baseline {baseline:?})");

        Mounted {
            updates: tx,
            state,
            guard: cancel.clone().drop_guard(),
            cancel,
            task,
        }
    }
}

/// Handle to a mounted instance.
///
/// Dropping it tears the instance down, cancelling any pending commit wait
/// or frame.
pub struct Mounted {
    updates: mpsc::UnboundedSender<PropertyUpdate>,
    state: watch::Receiver<InstanceState>,
    cancel: CancellationToken,
    guard: DropGuard,
    task: JoinHandle<Result<(), CollapseError>>,
}

impl Mounted {
    /// Queue an update. Invalid updates are rejected here, before queueing.
    pub fn update(&self, update: PropertyUpdate) -> Result<(), CollapseError> {
        update.validate()?;
        self.updates
            .send(update)
            .map_err(|_| CollapseError::Unmounted)
    }

    pub fn state(&self) -> InstanceState {
        self.state.borrow().clone()
    }

    /// A receiver that reports only changes made after this call.
    pub fn subscribe(&self) -> watch::Receiver<InstanceState> {
        let mut state = self.state.clone();
        state.mark_unchanged();
        state
    }

    /// Wait until at least `count` updates have been processed.
    pub async fn processed(&self, count: u64) -> Result<InstanceState, CollapseError> {
        let mut state = self.state.clone();
        let reached = state
            .wait_for(|s| s.processed >= count)
            .await
            .map_err(|_| CollapseError::Unmounted)?;
        Ok(reached.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// End the update sequence and wait for the queued updates to drain.
    pub async fn finish(self) -> Result<(), CollapseError> {
        let Mounted {
            updates,
            task,
            guard,
            ..
        } = self;
        drop(updates);
        let result = task.await?;
        drop(guard);
        result
    }

    /// Tear the instance down now, abandoning any update in flight.
    pub async fn unmount(self) -> Result<(), CollapseError> {
        self.cancel.cancel();
        self.task.await?
    }
}
