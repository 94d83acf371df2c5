//! The render target the wrapper drives.
//!
//! A target accepts element descriptions, commits them at some later point
//! of its own choosing, and hands out live handles to committed nodes by id.
//! [`livedom::Renderer`] is the stock implementation.

use async_trait::async_trait;
use livedom::{Element, Height, LiveNode, Renderer, TransitionTiming};

/// A read/write view onto a committed node.
///
/// The node is owned by the render target; implementations must tolerate it
/// vanishing between calls.
pub trait LiveElement: Send + Sync {
    fn id(&self) -> &str;

    /// Full content height, independent of any height override.
    fn scroll_height(&self) -> u16;

    /// The element's inline transition declaration.
    fn transition(&self) -> TransitionTiming;

    fn set_transition(&self, timing: TransitionTiming);

    fn set_height(&self, height: Height);
}

/// Source of animation-frame boundaries.
#[async_trait]
pub trait FrameScheduler: Send + Sync {
    /// Resolve at the next frame boundary.
    async fn next_frame(&self);
}

pub trait RenderTarget: FrameScheduler + 'static {
    type Node: LiveElement;

    /// Hand a description to the target for a later commit.
    fn submit(&self, description: Element);

    /// The live node for `id`, if one is committed right now.
    fn query(&self, id: &str) -> Option<Self::Node>;
}

impl LiveElement for LiveNode {
    fn id(&self) -> &str {
        LiveNode::id(self)
    }

    fn scroll_height(&self) -> u16 {
        LiveNode::scroll_height(self)
    }

    fn transition(&self) -> TransitionTiming {
        LiveNode::transition(self)
    }

    fn set_transition(&self, timing: TransitionTiming) {
        LiveNode::set_transition(self, timing);
    }

    fn set_height(&self, height: Height) {
        LiveNode::set_height(self, height);
    }
}

#[async_trait]
impl FrameScheduler for Renderer {
    async fn next_frame(&self) {
        Renderer::next_frame(self).await;
    }
}

impl RenderTarget for Renderer {
    type Node = LiveNode;

    fn submit(&self, description: Element) {
        Renderer::submit(self, description);
    }

    fn query(&self, id: &str) -> Option<LiveNode> {
        Renderer::query(self, id)
    }
}
