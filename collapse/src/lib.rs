//! Collapse/expand animation wrapper.
//!
//! [`wrap`] turns any [`Component`] into a stateful, collapsible one. Each
//! mounted instance consumes a sequence of [`PropertyUpdate`]s, renders the
//! wrapped component inside a container, waits for the render target to
//! commit that container, then drives a height transition on the live node.

pub mod component;
pub mod config;
pub mod error;
pub mod mount;
pub mod state;
pub mod surface;
pub mod transition;
pub mod update;
pub mod waiter;
pub mod wrapper;

pub use component::Component;
pub use config::WrapperConfig;
pub use error::{CollapseError, WaitError};
pub use mount::Mounted;
pub use state::{InstanceState, Phase};
pub use surface::{FrameScheduler, LiveElement, RenderTarget};
pub use transition::{TransitionGuard, collapse, expand};
pub use update::{Props, PropertyUpdate};
pub use waiter::{POLL_INTERVAL, poll_until, poll_until_cancelled, wait_until};
pub use wrapper::{CollapseWrapper, Instance, Outcome, start_collapsed, wrap};
