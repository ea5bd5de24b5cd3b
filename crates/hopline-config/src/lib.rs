//! Hopline settings: window, scene rules, player tuning, course generation
//! and debug options.
//!
//! Everything lives in one [`Config`] persisted as `config.ron`. Missing
//! sections and fields fall back to defaults, unknown fields are ignored, and
//! [`CliArgs`] overrides individual values at startup.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BlockConfig, Config, CourseConfig, DebugConfig, PlayerConfig, SceneConfig, SweepPolicy,
    WindowConfig,
};
pub use error::ConfigError;
