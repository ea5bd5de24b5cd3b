//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Frame loop, collision and culling settings.
    pub scene: SceneConfig,
    /// Player movement tuning.
    pub player: PlayerConfig,
    /// Block behavior.
    pub block: BlockConfig,
    /// Procedural course generation.
    pub course: CourseConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration. The scene only uses the size to place the camera
/// anchor; no window is opened by the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    pub title: String,
}

/// How the swept-collision offset behaves across frames.
///
/// While the player falls, its comparison rectangle is extended upward by
/// the distance travelled this frame so thin platforms are not skipped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum SweepPolicy {
    /// Recompute the extension from this frame's travel only.
    #[default]
    PerFrame,
    /// Keep adding each falling frame's travel to the carried-over extension
    /// and never reset it.
    Accumulate,
}

/// Scene driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Objects further than this behind the camera (world units) are culled.
    pub cull_distance: f32,
    /// A block overlap shallower than this counts as "just touching the top".
    pub landing_threshold: f32,
    /// Swept-collision offset policy.
    pub sweep_policy: SweepPolicy,
    /// Where the camera position sits on screen, as fractions of the
    /// viewport size.
    pub camera_anchor: (f32, f32),
}

/// Player movement tuning. Units are pixels and seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Upward speed applied by a jump in px/s.
    pub jump_speed: f32,
    /// Jumps available between landings (2 = double jump).
    pub max_jumps: u32,
    /// Horizontal speed in px/s.
    pub run_speed: f32,
    /// Terminal falling speed in px/s.
    pub max_fall_speed: f32,
}

/// Block behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlockConfig {
    /// Seconds a destructible block survives after being stepped on.
    pub crumble_seconds: f32,
    /// Frames a scheduled block survives at most, whatever the clock does.
    pub crumble_frame_limit: u32,
}

/// Procedural course generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CourseConfig {
    /// RNG seed. Identical seeds produce identical courses.
    pub seed: u64,
    /// Ground line of the first platform.
    pub base_y: f32,
    pub block_width: f32,
    pub block_height: f32,
    pub min_segment_blocks: u32,
    pub max_segment_blocks: u32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Largest height change between consecutive platforms.
    pub max_step: f32,
    /// Chance (0.0 - 1.0) that a block is destructible.
    pub destructible_chance: f64,
    /// Chance (0.0 - 1.0) that a collectable floats above a block.
    pub collectable_chance: f64,
    /// How far ahead of the camera the course is kept generated.
    pub spawn_ahead: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "hopline::collision=debug").
    pub log_level: String,
    /// Frames to simulate in a headless run.
    pub frames: u32,
    /// Pace frames against the wall clock instead of a stepped clock.
    pub realtime: bool,
    /// Frame duration in milliseconds for stepped or paced runs.
    pub frame_millis: u64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            title: "Hopline".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cull_distance: 3000.0,
            landing_threshold: 16.0,
            sweep_policy: SweepPolicy::default(),
            camera_anchor: (0.3, 0.5),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            gravity: 2400.0,
            jump_speed: 900.0,
            max_jumps: 2,
            run_speed: 300.0,
            max_fall_speed: 1500.0,
        }
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            crumble_seconds: 0.35,
            crumble_frame_limit: 240,
        }
    }
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            base_y: 400.0,
            block_width: 64.0,
            block_height: 24.0,
            min_segment_blocks: 3,
            max_segment_blocks: 8,
            min_gap: 64.0,
            max_gap: 160.0,
            max_step: 64.0,
            destructible_chance: 0.2,
            collectable_chance: 0.4,
            spawn_ahead: 1600.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 3600,
            realtime: false,
            frame_millis: 16,
        }
    }
}

// --- Validation ---

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

impl Config {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scene.cull_distance <= 0.0 {
            return Err(invalid("scene.cull_distance", "must be positive"));
        }
        if self.scene.landing_threshold <= 0.0 {
            return Err(invalid("scene.landing_threshold", "must be positive"));
        }
        if self.player.width <= 0.0 || self.player.height <= 0.0 {
            return Err(invalid("player.width/height", "must be positive"));
        }
        if self.player.max_jumps == 0 {
            return Err(invalid("player.max_jumps", "at least one jump is required"));
        }
        if self.block.crumble_seconds < 0.0 {
            return Err(invalid("block.crumble_seconds", "must not be negative"));
        }
        if self.block.crumble_frame_limit == 0 {
            return Err(invalid("block.crumble_frame_limit", "must be at least one frame"));
        }
        if self.course.min_segment_blocks == 0
            || self.course.min_segment_blocks > self.course.max_segment_blocks
        {
            return Err(invalid(
                "course.min_segment_blocks",
                format!(
                    "need 1 <= min ({}) <= max ({})",
                    self.course.min_segment_blocks, self.course.max_segment_blocks
                ),
            ));
        }
        if self.course.block_width <= 0.0 || self.course.block_height <= 0.0 {
            return Err(invalid("course.block_width/height", "must be positive"));
        }
        if self.course.max_step < 0.0 {
            return Err(invalid("course.max_step", "must not be negative"));
        }
        if self.course.min_gap < 0.0 || self.course.min_gap > self.course.max_gap {
            return Err(invalid("course.min_gap", "need 0 <= min_gap <= max_gap"));
        }
        for (field, chance) in [
            ("course.destructible_chance", self.course.destructible_chance),
            ("course.collectable_chance", self.course.collectable_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(invalid(field, format!("{chance} is not a probability")));
            }
        }
        if self.debug.frame_millis == 0 {
            return Err(invalid("debug.frame_millis", "must be positive"));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
