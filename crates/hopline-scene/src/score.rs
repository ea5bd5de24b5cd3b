//! Screen-space score overlay.

use hopline_math::{Vec2, ViewTransform};

use crate::object::{Body, GameObject};
use crate::surface::{Color, Surface};

/// World pixels per distance point.
const PIXELS_PER_POINT: f32 = 10.0;

/// Text overlay showing the run's score.
///
/// Its position is in screen pixels. The scene feeds it the player's
/// progress once per frame through [`ScoreLabel::record`].
#[derive(Clone, Debug)]
pub struct ScoreLabel {
    body: Body,
    points_per_collectable: u32,
    collected: u32,
    best_x: f32,
}

impl ScoreLabel {
    pub fn new(position: Vec2, points_per_collectable: u32) -> Self {
        Self {
            body: Body::new(position, Vec2::ZERO),
            points_per_collectable,
            collected: 0,
            best_x: 0.0,
        }
    }

    /// Note the player's collected count and horizontal position. Distance
    /// only counts the furthest point reached.
    pub fn record(&mut self, collected: u32, x: f32) {
        self.collected = collected;
        self.best_x = self.best_x.max(x);
    }

    pub fn distance(&self) -> u32 {
        (self.best_x / PIXELS_PER_POINT) as u32
    }

    pub fn points(&self) -> u32 {
        self.collected * self.points_per_collectable + self.distance()
    }

    pub fn score(&self) -> String {
        format!("Score: {}", self.points())
    }
}

impl GameObject for ScoreLabel {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.set_transform(ViewTransform::IDENTITY);
        surface.draw_text(&self.score(), self.body.position, Color::WHITE);
    }
}
