#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use collapse::{FrameScheduler, LiveElement, RenderTarget};
use livedom::{Element, Height, TransitionTiming};

/// Everything a transition can do to an element, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    ReadExtent,
    ReadTransition,
    SetTransition(TransitionTiming),
    SetHeight(Height),
    Frame,
}

/// A fake element and frame source that records every call.
#[derive(Debug)]
pub struct Recorder {
    pub extent: u16,
    pub timing: Mutex<TransitionTiming>,
    pub ops: Mutex<Vec<Op>>,
}

impl Recorder {
    pub fn new(extent: u16) -> Self {
        Self {
            extent,
            timing: Mutex::new(TransitionTiming::Inherit),
            ops: Mutex::new(Vec::new()),
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }
}

impl LiveElement for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn scroll_height(&self) -> u16 {
        self.record(Op::ReadExtent);
        self.extent
    }

    fn transition(&self) -> TransitionTiming {
        self.record(Op::ReadTransition);
        *self.timing.lock().unwrap()
    }

    fn set_transition(&self, timing: TransitionTiming) {
        self.record(Op::SetTransition(timing));
        *self.timing.lock().unwrap() = timing;
    }

    fn set_height(&self, height: Height) {
        self.record(Op::SetHeight(height));
    }
}

#[async_trait]
impl FrameScheduler for Recorder {
    async fn next_frame(&self) {
        self.record(Op::Frame);
        tokio::task::yield_now().await;
    }
}

/// A frame source that never produces a frame.
pub struct Frozen;

#[async_trait]
impl FrameScheduler for Frozen {
    async fn next_frame(&self) {
        std::future::pending::<()>().await;
    }
}

/// Shared handle to a [`Recorder`], usable as a target's node type.
#[derive(Debug, Clone)]
pub struct Handle(pub Arc<Recorder>);

impl LiveElement for Handle {
    fn id(&self) -> &str {
        self.0.id()
    }

    fn scroll_height(&self) -> u16 {
        self.0.scroll_height()
    }

    fn transition(&self) -> TransitionTiming {
        self.0.transition()
    }

    fn set_transition(&self, timing: TransitionTiming) {
        self.0.set_transition(timing);
    }

    fn set_height(&self, height: Height) {
        self.0.set_height(height);
    }
}

/// A render target whose node answers the first `live_queries` lookups and
/// is gone afterwards.
pub struct ScriptedTarget {
    pub element: Arc<Recorder>,
    pub live_queries: usize,
    pub queries: AtomicUsize,
    pub submitted: Mutex<Vec<Element>>,
    pub frames_frozen: bool,
}

impl ScriptedTarget {
    pub fn new(extent: u16, live_queries: usize) -> Self {
        Self {
            element: Arc::new(Recorder::new(extent)),
            live_queries,
            queries: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            frames_frozen: false,
        }
    }

    /// Never produce another frame.
    pub fn with_frozen_frames(mut self) -> Self {
        self.frames_frozen = true;
        self
    }
}

#[async_trait]
impl FrameScheduler for ScriptedTarget {
    async fn next_frame(&self) {
        if self.frames_frozen {
            Frozen.next_frame().await;
        } else {
            self.element.next_frame().await;
        }
    }
}

impl RenderTarget for ScriptedTarget {
    type Node = Handle;

    fn submit(&self, description: Element) {
        self.submitted.lock().unwrap().push(description);
    }

    fn query(&self, _id: &str) -> Option<Handle> {
        let n = self.queries.fetch_add(1, Ordering::SeqCst);
        (n < self.live_queries).then(|| Handle(Arc::clone(&self.element)))
    }
}
