//! Command-line argument parsing for Hopline.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, SweepPolicy};

/// Hopline command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hopline", about = "Hopline side-scrolling platformer")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Course seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pace frames against the wall clock.
    #[arg(long)]
    pub realtime: Option<bool>,

    /// Swept-collision offset policy.
    #[arg(long, value_enum)]
    pub sweep_policy: Option<SweepPolicy>,

    /// Log level (error, warn, info, debug, trace) or a full filter string.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Trace every collision decision and population change.
    #[arg(long)]
    pub trace_scene: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(frames) = args.frames {
            self.debug.frames = frames;
        }
        if let Some(seed) = args.seed {
            self.course.seed = seed;
        }
        if let Some(realtime) = args.realtime {
            self.debug.realtime = realtime;
        }
        if let Some(policy) = args.sweep_policy {
            self.scene.sweep_policy = policy;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
