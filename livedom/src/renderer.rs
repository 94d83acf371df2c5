//! Frame-driven renderer over a shared [`Document`].
//!
//! Descriptions handed to [`Renderer::submit`] are not live straight away:
//! they commit on a later frame, so whoever submitted them has to wait for
//! the node to show up before touching it. Frames are produced either by
//! calling [`Renderer::tick`] directly or by running [`Renderer::run`].

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, trace};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::document::Document;
use crate::element::Element;
use crate::layout::Metrics;
use crate::stylesheet::Stylesheet;
use crate::transitions::TransitionTiming;
use crate::types::Height;

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Time between frames when running the frame loop.
    pub frame_interval: Duration,
    /// Frames between submitting a description and it becoming live.
    pub commit_latency: u64,
    pub metrics: Metrics,
    /// Apply height changes instantly instead of transitioning.
    pub reduced_motion: bool,
    pub stylesheet: Stylesheet,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            commit_latency: 1,
            metrics: Metrics::default(),
            reduced_motion: false,
            stylesheet: Stylesheet::collapsible(),
        }
    }
}

impl RendererConfig {
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn commit_latency(mut self, frames: u64) -> Self {
        self.commit_latency = frames;
        self
    }

    pub fn line_height(mut self, px: u16) -> Self {
        self.metrics.line_height = px;
        self
    }

    pub fn viewport_width(mut self, columns: u16) -> Self {
        self.metrics.viewport_width = columns;
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    pub fn stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

#[derive(Debug)]
struct Pending {
    description: Element,
    due: u64,
}

#[derive(Debug)]
struct Inner {
    document: Arc<Mutex<Document>>,
    pending: Mutex<VecDeque<Pending>>,
    frame: AtomicU64,
    frames: watch::Sender<u64>,
    commits_paused: AtomicBool,
    frame_interval: Duration,
    commit_latency: u64,
}

/// Shared handle to a document and its frame clock. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Renderer {
    inner: Arc<Inner>,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        let mut document = Document::new(config.stylesheet, config.metrics);
        document.set_reduced_motion(config.reduced_motion);
        let (frames, _) = watch::channel(0);

        Self {
            inner: Arc::new(Inner {
                document: Arc::new(Mutex::new(document)),
                pending: Mutex::new(VecDeque::new()),
                frame: AtomicU64::new(0),
                frames,
                commits_paused: AtomicBool::new(false),
                frame_interval: config.frame_interval,
                commit_latency: config.commit_latency.max(1),
            }),
        }
    }

    /// Queue a description for commit on a later frame.
    pub fn submit(&self, description: Element) {
        let due = self.frame() + self.inner.commit_latency;
        trace!("queued #{} for frame {due}", description.id);
        lock(&self.inner.pending).push_back(Pending { description, due });
    }

    /// Hold every queued description back until resumed.
    pub fn set_commits_paused(&self, paused: bool) {
        self.inner.commits_paused.store(paused, Ordering::SeqCst);
    }

    /// Number of the last completed frame.
    pub fn frame(&self) -> u64 {
        self.inner.frame.load(Ordering::SeqCst)
    }

    /// Produce one frame: commit what is due, advance transitions, then
    /// wake everything waiting in [`Renderer::next_frame`].
    pub fn tick(&self) -> u64 {
        let frame = self.inner.frame.fetch_add(1, Ordering::SeqCst) + 1;

        let due: Vec<Element> = if self.inner.commits_paused.load(Ordering::SeqCst) {
            Vec::new()
        } else {
            let mut pending = lock(&self.inner.pending);
            let mut due = Vec::new();
            while pending.front().is_some_and(|p| p.due <= frame) {
                if let Some(p) = pending.pop_front() {
                    due.push(p.description);
                }
            }
            due
        };

        {
            let mut document = self.document();
            for description in due {
                document.commit(description);
            }
            document.step(Instant::now().into_std());
        }

        trace!("frame {frame}");
        self.inner.frames.send_replace(frame);
        frame
    }

    /// Resolve at the next frame boundary.
    ///
    /// Never resolves unless something is ticking the renderer.
    pub async fn next_frame(&self) -> u64 {
        let mut frames = self.inner.frames.subscribe();
        match frames.changed().await {
            Ok(()) => *frames.borrow(),
            Err(_) => self.frame(),
        }
    }

    /// Tick at the configured frame interval until cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = interval(self.inner.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("frame loop started ({:?} per frame)", self.inner.frame_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.tick();
                }
            }
        }

        info!("frame loop stopped at frame {}", self.frame());
    }

    /// Run the frame loop on a tokio task.
    pub fn spawn(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let renderer = self.clone();
        tokio::spawn(async move { renderer.run(cancel).await })
    }

    /// Find the live node for `id`, if it has been committed.
    pub fn query(&self, id: &str) -> Option<LiveNode> {
        let key = self.document().node_key(id)?;
        Some(LiveNode {
            id: id.to_string(),
            key,
            document: Arc::clone(&self.inner.document),
        })
    }

    pub fn remove(&self, id: &str) -> bool {
        self.document().remove(id)
    }

    /// Lock the document for direct inspection.
    pub fn document(&self) -> MutexGuard<'_, Document> {
        lock(&self.inner.document)
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.document().render_lines()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to one committed node.
///
/// Holds no reference to the node itself: every access looks it up by id
/// and checks it is still the same node it was resolved as. Once the node
/// is removed or replaced, reads return zero/defaults and writes do nothing.
#[derive(Debug, Clone)]
pub struct LiveNode {
    id: String,
    key: u64,
    document: Arc<Mutex<Document>>,
}

impl LiveNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_live(&self) -> bool {
        lock(&self.document).node_key(&self.id) == Some(self.key)
    }

    fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> Option<R> {
        let mut document = lock(&self.document);
        if document.node_key(&self.id) != Some(self.key) {
            debug!("stale handle for #{} ignored", self.id);
            return None;
        }
        Some(f(&mut document))
    }

    pub fn scroll_height(&self) -> u16 {
        self.with_document(|d| d.scroll_height(&self.id))
            .flatten()
            .unwrap_or(0)
    }

    pub fn rendered_height(&self) -> u16 {
        self.with_document(|d| d.rendered_height(&self.id))
            .flatten()
            .unwrap_or(0)
    }

    pub fn height(&self) -> Option<Height> {
        self.with_document(|d| d.find(&self.id).and_then(|el| el.style.height))
            .flatten()
    }

    pub fn set_height(&self, height: Height) {
        self.with_document(|d| d.set_height(&self.id, height));
    }

    pub fn transition(&self) -> TransitionTiming {
        self.with_document(|d| d.transition(&self.id))
            .flatten()
            .unwrap_or_default()
    }

    pub fn set_transition(&self, timing: TransitionTiming) {
        self.with_document(|d| d.set_transition(&self.id, timing));
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.with_document(|d| d.find(&self.id).is_some_and(|el| el.has_class(class)))
            .unwrap_or(false)
    }
}
