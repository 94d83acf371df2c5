//! Observable per-instance state.

/// Where an instance is in its per-update cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next update.
    #[default]
    Idle,
    /// Description submitted, waiting for the commit.
    Rendering,
    /// Commit observed, mutating the live element.
    Transitioning,
}

/// Snapshot of a wrapper instance, published after every phase change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceState {
    /// Id of the most recent update.
    pub id: Option<String>,
    /// Last applied `collapsed` value (`None` until the first update, unless
    /// the instance was given a baseline).
    pub collapsed: Option<bool>,
    pub phase: Phase,
    /// Updates fully processed so far.
    pub processed: u64,
}
