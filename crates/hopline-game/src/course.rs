//! Procedural course: platform segments spawned ahead of the camera.

use hopline_config::{BlockConfig, CourseConfig};
use hopline_math::Vec2;
use hopline_scene::{Block, Collectable, GameObject, Hazard, ObjectId, Scene};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Solid blocks laid under the spawn point before the first frame.
const RUNWAY_BLOCKS: u32 = 8;
const COLLECTABLE_SIZE: f32 = 16.0;
/// Height of a collectable's top edge above the platform it hovers over.
const COLLECTABLE_LIFT: f32 = 72.0;
/// Distance from the lowest possible platform down to the fall-out strip.
const STRIP_DEPTH: f32 = 480.0;
const STRIP_HEIGHT: f32 = 64.0;

/// Seeded generator of platforms and collectables.
///
/// Segments are a run of adjacent blocks followed by a gap. Each segment's
/// top edge steps up or down from the previous one by at most
/// `max_step`, and stays within a band around `base_y`. The same seed
/// always yields the same course.
pub struct CourseGenerator {
    course: CourseConfig,
    block: BlockConfig,
    rng: ChaCha8Rng,
    /// World x where the next block goes.
    next_x: f32,
    /// Top edge of the current segment.
    top: f32,
    viewport: Vec2,
    fall_strip: Option<ObjectId>,
    segments: u32,
}

impl CourseGenerator {
    pub fn new(course: CourseConfig, block: BlockConfig, viewport: Vec2) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(course.seed);
        Self {
            next_x: -2.0 * course.block_width,
            top: course.base_y,
            course,
            block,
            rng,
            viewport,
            fall_strip: None,
            segments: 0,
        }
    }

    /// Where the player should start: standing on the runway at x = 0.
    pub fn spawn_point(&self, player_height: f32) -> Vec2 {
        Vec2::new(0.0, self.course.base_y - player_height)
    }

    /// Add the runway and the fall-out hazard strip. Call once, before the
    /// first frame.
    pub fn lay_runway(&mut self, scene: &mut Scene) {
        for _ in 0..RUNWAY_BLOCKS {
            scene.add_object(Block::solid(
                Vec2::new(self.next_x, self.top),
                self.block_size(),
            ));
            self.next_x += self.course.block_width;
        }

        let width = self.viewport.x * 3.0;
        let strip = Hazard::new(
            Vec2::new(-width / 2.0, self.strip_y()),
            Vec2::new(width, STRIP_HEIGHT),
        );
        self.fall_strip = Some(scene.add_object(strip));
    }

    /// Queue segments until the course reaches `spawn_ahead` past the camera,
    /// then keep the fall-out strip centered under the camera. Returns the
    /// number of objects queued.
    pub fn advance(&mut self, scene: &mut Scene) -> usize {
        let horizon = scene.scroll_x() + self.course.spawn_ahead;
        let mut queued = 0;
        while self.next_x < horizon {
            queued += self.spawn_segment(scene);
        }
        self.follow_camera(scene);
        queued
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// World x just past the last generated block.
    pub fn frontier(&self) -> f32 {
        self.next_x
    }

    fn spawn_segment(&mut self, scene: &mut Scene) -> usize {
        let course = &self.course;
        let gap = self.rng.random_range(course.min_gap..=course.max_gap);
        let step = self.rng.random_range(-course.max_step..=course.max_step);
        let blocks = self
            .rng
            .random_range(course.min_segment_blocks..=course.max_segment_blocks);

        let (highest, lowest) = self.top_band();
        self.top = (self.top + step).clamp(highest, lowest);
        self.next_x += gap;

        let mut queued = 0;
        for _ in 0..blocks {
            let position = Vec2::new(self.next_x, self.top);
            let block = if self.rng.random_bool(self.course.destructible_chance) {
                Block::destructible(position, self.block_size(), &self.block)
            } else {
                Block::solid(position, self.block_size())
            };
            scene.delayed_add_object(block);
            queued += 1;

            if self.rng.random_bool(self.course.collectable_chance) {
                let at = Vec2::new(
                    self.next_x + (self.course.block_width - COLLECTABLE_SIZE) / 2.0,
                    self.top - COLLECTABLE_LIFT,
                );
                scene.delayed_add_object(Collectable::new(at, Vec2::splat(COLLECTABLE_SIZE)));
                queued += 1;
            }
            self.next_x += self.course.block_width;
        }

        self.segments += 1;
        debug!(
            segment = self.segments,
            blocks,
            gap,
            top = self.top,
            "queued course segment"
        );
        queued
    }

    fn follow_camera(&self, scene: &mut Scene) {
        let Some(id) = self.fall_strip else {
            return;
        };
        let scroll_x = scene.scroll_x();
        if let Some(strip) = scene.get_mut(id) {
            let width = strip.body().size.x;
            strip.body_mut().position.x = scroll_x - width / 2.0;
        }
    }

    /// Allowed range for platform tops: `(highest, lowest)`.
    fn top_band(&self) -> (f32, f32) {
        let base = self.course.base_y;
        let step = self.course.max_step;
        (base - 2.0 * step, base + step)
    }

    fn strip_y(&self) -> f32 {
        self.top_band().1 + STRIP_DEPTH
    }

    fn block_size(&self) -> Vec2 {
        Vec2::new(self.course.block_width, self.course.block_height)
    }
}
