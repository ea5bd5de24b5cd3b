//! Hopline headless driver.
//!
//! Loads `config.ron` (creating it on first run), applies CLI overrides,
//! builds a procedurally generated course and runs the scene loop with an
//! autopilot at the controls. Draw calls are counted, not rasterized.
//!
//! Run with: `cargo run -p hopline-game -- --frames 1200 --seed 3`

mod autopilot;
mod course;
mod runner;
mod stats;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hopline_config::{CliArgs, Config};
use tracing::{error, info};

const APP_NAME: &str = "hopline";

/// `<os config dir>/hopline`, or the `--config` override.
fn config_dir(args: &CliArgs) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| dirs::config_dir().map(|base| base.join(APP_NAME)))
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let dir = config_dir(&args);

    let loaded = match &dir {
        Some(dir) => Config::load_or_create(dir),
        None => Ok(Config::default()),
    };
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);
    if args.trace_scene {
        config.debug.log_level = hopline_log::SCENE_TRACE_FILTER.to_string();
    }

    let log_dir = dir.as_ref().map(|dir| dir.join("logs"));
    hopline_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Some(e) = load_error {
        error!("Failed to load config: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    info!("Hopline");
    info!(
        "Viewport: {}x{} | Seed: {} | Frames: {}",
        config.window.width, config.window.height, config.course.seed, config.debug.frames
    );

    let summary = runner::run(&config);
    info!("Run finished\n{summary}");
    ExitCode::SUCCESS
}
