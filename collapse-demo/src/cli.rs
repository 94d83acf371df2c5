use std::path::PathBuf;

use clap::Parser;
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "collapse-demo")]
#[command(about = "Click a button a few times and watch a paragraph collapse and expand")]
pub struct Args {
    /// Number of simulated clicks
    #[arg(long, short = 'n', env = "COLLAPSE_DEMO_CLICKS", default_value = "4")]
    pub clicks: u32,

    /// Pause between clicks, in milliseconds
    #[arg(long, env = "COLLAPSE_DEMO_INTERVAL_MS", default_value = "1000")]
    pub interval_ms: u64,

    /// Frame interval of the renderer, in milliseconds
    #[arg(long, env = "COLLAPSE_DEMO_FRAME_MS", default_value = "16")]
    pub frame_ms: u64,

    /// How long to wait for the paragraph to be committed, in milliseconds
    #[arg(long, env = "COLLAPSE_DEMO_COMMIT_TIMEOUT_MS", default_value = "1000")]
    pub commit_timeout_ms: u64,

    /// Apply height changes instantly
    #[arg(long)]
    pub reduced_motion: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "COLLAPSE_DEMO_LOG", default_value = "info")]
    pub log_level: LevelFilter,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "COLLAPSE_DEMO_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
