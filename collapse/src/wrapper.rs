//! The collapse wrapper and its per-mount state machine.

use std::sync::Arc;

use futures::{FutureExt, Stream, StreamExt};
use livedom::Element;
use livedom::stylesheet::{COLLAPSED, COLLAPSIBLE};
use log::{debug, info, warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::component::Component;
use crate::config::WrapperConfig;
use crate::error::{CollapseError, WaitError};
use crate::state::{InstanceState, Phase};
use crate::surface::RenderTarget;
use crate::transition::{collapse, expand};
use crate::update::{Props, PropertyUpdate};
use crate::waiter::poll_until_cancelled;

/// Wrap `component` so it can be collapsed and expanded with a height
/// transition.
pub fn wrap<C: Component>(component: C) -> CollapseWrapper<C> {
    CollapseWrapper {
        component: Arc::new(component),
        config: WrapperConfig::default(),
    }
}

/// Whether a container should start out pinned at zero height.
///
/// Only when the update asks to be collapsed and the instance was already
/// collapsed, i.e. a re-render in the collapsed state. No remembered value
/// counts as a match, so a first update that is collapsed starts collapsed.
pub fn start_collapsed(remembered: Option<bool>, collapsed: bool) -> bool {
    collapsed && remembered.is_none_or(|previous| previous == collapsed)
}

/// A component wrapped for collapse/expand animation.
///
/// Holds the component by reference; any number of instances can be
/// mounted from one wrapper.
pub struct CollapseWrapper<C> {
    component: Arc<C>,
    config: WrapperConfig,
}

impl<C> Clone for CollapseWrapper<C> {
    fn clone(&self) -> Self {
        Self {
            component: Arc::clone(&self.component),
            config: self.config.clone(),
        }
    }
}

impl<C: Component> CollapseWrapper<C> {
    pub fn with_config(mut self, config: WrapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// The container description for one update.
    pub fn describe(&self, id: &str, props: &Props, start_collapsed: bool) -> Element {
        Element::div()
            .id(id)
            .class(COLLAPSIBLE)
            .class_if(start_collapsed, COLLAPSED)
            .child(self.component.render(props))
    }

    /// Create an instance driving `target`.
    ///
    /// `baseline` is the `collapsed` value the instance starts out
    /// remembering; `None` means nothing is remembered yet.
    pub fn instance<T: RenderTarget>(
        &self,
        target: Arc<T>,
        baseline: Option<bool>,
    ) -> Instance<C, T> {
        Instance::new(self.clone(), target, baseline)
    }
}

/// What processing one update did to the live element.
#[derive(Debug)]
pub enum Outcome {
    Collapsed,
    Expanded,
    /// The transition was skipped; the remembered state still advanced.
    Skipped(CollapseError),
    /// The instance was torn down mid-update.
    Cancelled,
}

/// One mounted usage of a wrapped component.
///
/// Processes updates strictly one at a time: the transition for an update
/// finishes (or is skipped) before the next update is looked at.
pub struct Instance<C, T> {
    wrapper: CollapseWrapper<C>,
    target: Arc<T>,
    cancel: CancellationToken,
    state: watch::Sender<InstanceState>,
}

impl<C: Component, T: RenderTarget> Instance<C, T> {
    pub fn new(wrapper: CollapseWrapper<C>, target: Arc<T>, baseline: Option<bool>) -> Self {
        let (state, _) = watch::channel(InstanceState {
            collapsed: baseline,
            ..Default::default()
        });
        Self {
            wrapper,
            target,
            cancel: CancellationToken::new(),
            state,
        }
    }

    /// Tear the instance down when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn state(&self) -> InstanceState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<InstanceState> {
        self.state.subscribe()
    }

    fn set_phase(&self, phase: Phase) {
        self.state.send_modify(|state| state.phase = phase);
    }

    /// Render, wait for the commit, then collapse or expand.
    ///
    /// Fails only on an invalid update. A commit that never shows up or a
    /// node that vanishes after it did is reported as
    /// [`Outcome::Skipped`].
    pub async fn process(&mut self, update: PropertyUpdate) -> Result<Outcome, CollapseError> {
        let id = match update.validate() {
            Ok(id) => id.to_string(),
            Err(e) => {
                warn!("rejecting update: {e}");
                return Err(e);
            }
        };
        let collapsed = update.collapsed;
        let remembered = self.state.borrow().collapsed;
        let start = start_collapsed(remembered, collapsed);

        let description = self.wrapper.describe(&id, &update.props, start);
        self.target.submit(description);
        self.set_phase(Phase::Rendering);
        debug!("#{id}: rendering (collapsed={collapsed}, start_collapsed={start})");

        let config = &self.wrapper.config;
        let target = &self.target;
        let committed = poll_until_cancelled(
            || target.query(&id).is_some(),
            config.commit_timeout,
            config.poll_interval,
            &self.cancel,
        )
        .await;

        let outcome = match committed {
            Err(WaitError::Cancelled) => {
                debug!("#{id}: torn down while waiting for commit");
                self.set_phase(Phase::Idle);
                return Ok(Outcome::Cancelled);
            }
            Err(WaitError::Timeout(timeout)) => {
                debug!("#{id}: not committed within {timeout:?}, skipping transition");
                Outcome::Skipped(CollapseError::Timeout {
                    id: id.clone(),
                    timeout,
                })
            }
            Ok(()) => {
                self.set_phase(Phase::Transitioning);
                match self.target.query(&id) {
                    None => {
                        debug!("#{id}: gone after commit, skipping transition");
                        Outcome::Skipped(CollapseError::MissingElement { id: id.clone() })
                    }
                    Some(node) if collapsed => {
                        tokio::select! {
                            biased;
                            _ = self.cancel.cancelled() => {
                                debug!("#{id}: torn down mid-collapse");
                                self.set_phase(Phase::Idle);
                                return Ok(Outcome::Cancelled);
                            }
                            _ = collapse(Some(&node), self.target.as_ref()) => Outcome::Collapsed,
                        }
                    }
                    Some(node) => {
                        expand(Some(&node));
                        Outcome::Expanded
                    }
                }
            }
        };

        self.state.send_modify(|state| {
            state.id = Some(id);
            state.collapsed = Some(collapsed);
            state.phase = Phase::Idle;
            state.processed += 1;
        });
        Ok(outcome)
    }

    /// Consume `updates` until the sequence ends or the instance is torn
    /// down. Stops at the first invalid update and returns its error.
    pub async fn run<S>(mut self, updates: S) -> Result<(), CollapseError>
    where
        S: Stream<Item = PropertyUpdate> + Unpin,
    {
        let mut updates = updates.fuse();
        info!("collapse instance started");

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                next = updates.next() => next,
            };
            let Some(mut update) = next else {
                break;
            };

            if self.wrapper.config.coalesce_pending {
                let mut skipped = 0;
                while let Some(Some(newer)) = updates.next().now_or_never() {
                    update = newer;
                    skipped += 1;
                }
                if skipped > 0 {
                    debug!("coalesced {skipped} queued updates");
                }
            }

            if let Outcome::Cancelled = self.process(update).await? {
                break;
            }
        }

        let state = self.state();
        info!(
            "collapse instance {} stopped after {} updates",
            state.id.as_deref().unwrap_or("<unnamed>"),
            state.processed
        );
        Ok(())
    }
}
