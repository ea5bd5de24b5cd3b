//! Headless frame loop.

use std::fmt;
use std::time::Duration;

use hopline_config::Config;
use hopline_math::Vec2;
use hopline_scene::{
    Camera, Clock, ManualClock, Player, Scene, SceneLog, ScoreLabel, SystemClock, TracingLog,
};
use tracing::{debug, info};

use crate::autopilot::Autopilot;
use crate::course::CourseGenerator;
use crate::stats::{DrawStats, StatsSurface};

pub const POINTS_PER_COLLECTABLE: u32 = 50;
const SCORE_POSITION: Vec2 = Vec2::new(16.0, 16.0);
/// Seconds of running the autopilot looks ahead for ground.
const LOOKAHEAD_SECONDS: f32 = 0.1;
const PROGRESS_EVERY: u64 = 600;

/// How frames are timed.
enum Pacing {
    /// Manual clock stepped by a fixed amount before each frame.
    Stepped { clock: ManualClock, step: u64 },
    /// Wall clock, sleeping between frames.
    Realtime { frame: Duration },
}

impl Pacing {
    fn from_config(config: &Config) -> (Self, Box<dyn Clock>) {
        let step = config.debug.frame_millis;
        if config.debug.realtime {
            let pacing = Pacing::Realtime {
                frame: Duration::from_millis(step),
            };
            (pacing, Box::new(SystemClock))
        } else {
            let clock = ManualClock::starting_at(1_000);
            let pacing = Pacing::Stepped {
                clock: clock.clone(),
                step,
            };
            (pacing, Box::new(clock))
        }
    }

    fn before_frame(&self, frame: u64) {
        match self {
            Pacing::Stepped { clock, step } => {
                if frame > 0 {
                    clock.advance(*step);
                }
            }
            Pacing::Realtime { frame: duration } => {
                if frame > 0 {
                    std::thread::sleep(*duration);
                }
            }
        }
    }
}

/// Outcome of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: String,
    pub points: u32,
    pub collected: u32,
    pub distance: f32,
    pub jumps: u32,
    pub game_over: bool,
    pub live_objects: usize,
    pub segments: u32,
    pub draw: DrawStats,
    pub peak_rects: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames:       {}", self.frames)?;
        writeln!(f, "score:        {} ({})", self.points, self.score)?;
        writeln!(f, "collected:    {}", self.collected)?;
        writeln!(f, "distance:     {:.0}px", self.distance)?;
        writeln!(f, "jumps:        {}", self.jumps)?;
        writeln!(f, "game over:    {}", self.game_over)?;
        writeln!(f, "live objects: {}", self.live_objects)?;
        writeln!(f, "segments:     {}", self.segments)?;
        write!(
            f,
            "draw calls:   {} rects (peak {}/frame), {} texts",
            self.draw.rects, self.peak_rects, self.draw.texts
        )
    }
}

/// Build a scene with the player on the course runway.
pub fn build_scene(
    config: &Config,
    clock: Box<dyn Clock>,
    log: Box<dyn SceneLog>,
) -> (Scene, CourseGenerator) {
    let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
    let mut course = CourseGenerator::new(config.course.clone(), config.block.clone(), viewport);
    let spawn = course.spawn_point(config.player.height);

    let mut scene = Scene::new(config.scene.clone(), clock, log);
    scene.set_camera(Camera::new(
        spawn,
        viewport,
        Vec2::from(config.scene.camera_anchor),
    ));
    scene.set_player(Player::new(spawn, &config.player));
    scene.set_score(ScoreLabel::new(SCORE_POSITION, POINTS_PER_COLLECTABLE));
    course.lay_runway(&mut scene);
    (scene, course)
}

/// Run up to `config.debug.frames` frames, stopping early on game over.
pub fn run(config: &Config) -> RunSummary {
    let (pacing, clock) = Pacing::from_config(config);
    let (mut scene, mut course) = build_scene(config, clock, Box::new(TracingLog));
    let mut pilot = Autopilot::new(config.player.run_speed * LOOKAHEAD_SECONDS);
    let mut surface = StatsSurface::new();

    info!(
        frames = config.debug.frames,
        seed = config.course.seed,
        realtime = config.debug.realtime,
        sweep = ?config.scene.sweep_policy,
        "starting run"
    );

    for frame in 0..u64::from(config.debug.frames) {
        pacing.before_frame(frame);
        course.advance(&mut scene);
        pilot.steer(&mut scene);
        surface.begin_frame();
        scene.render(&mut surface);

        if scene.frame_count() % PROGRESS_EVERY == 0 {
            debug!(
                frame = scene.frame_count(),
                x = scene.player().position().x,
                objects = scene.len(),
                rects = surface.frame().rects,
                frontier = course.frontier(),
                score = surface.last_text().unwrap_or_default(),
                "progress"
            );
        }
        if scene.is_game_over() {
            info!(frame = scene.frame_count(), "player hit a hazard");
            break;
        }
    }

    let label = scene.score_label();
    RunSummary {
        frames: scene.frame_count(),
        score: scene.score(),
        points: label.points(),
        collected: scene.player().collected_count(),
        distance: scene.player().position().x,
        jumps: pilot.jumps(),
        game_over: scene.is_game_over(),
        live_objects: scene.len(),
        segments: course.segments(),
        draw: surface.total(),
        peak_rects: surface.peak_rects(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopline_scene::{GameObject, MemoryLog, RecordingSurface, Tag};

    fn short_run(frames: u32) -> Config {
        let mut config = Config::default();
        config.debug.frames = frames;
        config
    }

    #[test]
    fn test_build_scene_places_player_on_runway() {
        let config = Config::default();
        let (scene, _) = build_scene(
            &config,
            Box::new(ManualClock::starting_at(1_000)),
            Box::new(MemoryLog::new()),
        );
        assert_eq!(scene.player().bounds().bottom, config.course.base_y);
        assert_eq!(scene.camera().position(), scene.player().position());
        let hazards = scene.objects().filter(|(_, o)| o.tag() == Tag::Death).count();
        assert_eq!(hazards, 1);
    }

    #[test]
    fn test_player_settles_on_runway() {
        let config = Config::default();
        let clock = ManualClock::starting_at(1_000);
        let (mut scene, _) = build_scene(&config, Box::new(clock.clone()), Box::new(MemoryLog::new()));
        let mut surface = RecordingSurface::new();
        for _ in 0..10 {
            clock.advance(16);
            scene.render(&mut surface);
        }
        assert!(scene.player().is_colliding());
        assert_eq!(scene.player().bounds().bottom, config.course.base_y);
        assert!(!scene.is_game_over());
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = short_run(240);
        let first = run(&config);
        let second = run(&config);
        assert_eq!(first, second);
        assert!(first.frames <= 240);
        assert!(first.frames > 0);
        assert!(first.draw.rects > 0);
        assert_eq!(first.draw.texts, first.frames);
    }

    #[test]
    fn test_run_makes_progress() {
        let summary = run(&short_run(120));
        assert!(summary.distance > 0.0);
        assert!(summary.segments > 0);
        assert!(summary.live_objects > 3);
    }

    #[test]
    fn test_summary_display() {
        let summary = run(&short_run(1));
        let text = summary.to_string();
        assert!(text.starts_with("frames:       1\n"));
        assert!(text.contains("game over:    false"));
    }
}
