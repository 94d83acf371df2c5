//! The demo page: a click counter that toggles a collapsible paragraph.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use collapse::{InstanceState, Mounted, PropertyUpdate, WrapperConfig, wrap};
use livedom::{Element, Renderer, RendererConfig};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::cli::Args;
use crate::components::{TITLE, text_button, text_paragraph};

pub const PARAGRAPH_ID: &str = "identifyme";
const HEADER_ID: &str = "header";
const BUTTON_ID: &str = "clicker";

pub struct App {
    renderer: Arc<Renderer>,
    paragraph: Mounted,
    count: u32,
    collapsed: bool,
    sent: u64,
}

impl App {
    /// Render the page once and mount the collapsible paragraph.
    pub fn mount(renderer: Arc<Renderer>, config: WrapperConfig) -> Result<Self> {
        let paragraph = wrap(text_paragraph)
            .with_config(config)
            .mount(Arc::clone(&renderer), None);
        let mut app = Self {
            renderer,
            paragraph,
            count: 0,
            collapsed: true,
            sent: 0,
        };
        app.render()?;
        Ok(app)
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.submit(
            Element::div()
                .id(HEADER_ID)
                .child(Element::text(TITLE))
                .child(text_button(BUTTON_ID, self.count)),
        );
        self.paragraph
            .update(PropertyUpdate::new(PARAGRAPH_ID, self.collapsed))
            .context("Failed to update paragraph")?;
        self.sent += 1;
        Ok(())
    }

    pub fn click(&mut self) -> Result<()> {
        self.collapsed = !self.collapsed;
        self.count += 1;
        debug!("click {} (collapsed={})", self.count, self.collapsed);
        self.render()
    }

    /// Wait until the paragraph has handled every update sent so far.
    pub async fn settle(&self) -> Result<InstanceState> {
        Ok(self.paragraph.processed(self.sent).await?)
    }

    pub async fn unmount(self) -> Result<()> {
        Ok(self.paragraph.unmount().await?)
    }
}

/// Wait for the transition kicked off by the last update to finish.
pub async fn settle_transitions(renderer: &Renderer) {
    // A collapse only starts animating on the frame after its last write.
    for _ in 0..2 {
        renderer.next_frame().await;
    }
    while renderer.document().has_active_transitions() {
        renderer.next_frame().await;
    }
}

fn print_page(renderer: &Renderer, heading: &str) {
    println!("--- {heading} ---");
    for line in renderer.render_lines() {
        println!("{line}");
    }
    println!();
}

pub async fn run(args: &Args) -> Result<()> {
    let renderer = Arc::new(Renderer::new(
        RendererConfig::default()
            .frame_interval(Duration::from_millis(args.frame_ms.max(1)))
            .reduced_motion(args.reduced_motion),
    ));
    let frames = CancellationToken::new();
    let frame_loop = renderer.spawn(frames.clone());

    let config =
        WrapperConfig::default().commit_timeout(Duration::from_millis(args.commit_timeout_ms));
    let mut app = App::mount(Arc::clone(&renderer), config)?;
    app.settle().await?;
    settle_transitions(&renderer).await;
    print_page(&renderer, "initial");

    for _ in 0..args.clicks {
        tokio::time::sleep(Duration::from_millis(args.interval_ms)).await;
        app.click()?;
        let state = app.settle().await?;
        settle_transitions(&renderer).await;
        info!(
            "click {}: paragraph {}",
            app.count(),
            if state.collapsed == Some(true) { "collapsed" } else { "expanded" }
        );
        print_page(&renderer, &format!("after click {}", app.count()));
    }

    app.unmount().await?;
    frames.cancel();
    frame_loop.await.context("Frame loop panicked")?;
    Ok(())
}
