//! Objects the player touches rather than stands on.

use hopline_math::Vec2;

use crate::object::{Body, GameObject};
use crate::surface::{Color, Surface};

/// Item that increments the player's collected count once, then leaves the
/// scene.
#[derive(Clone, Debug)]
pub struct Collectable {
    body: Body,
}

impl Collectable {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::new(position, size),
        }
    }
}

impl GameObject for Collectable {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), Color::COLLECTABLE);
    }
}

/// Lethal region. A hazard is never culled, so a strip that follows the
/// camera can sit behind the player indefinitely.
#[derive(Clone, Debug)]
pub struct Hazard {
    body: Body,
}

impl Hazard {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::new(position, size),
        }
    }
}

impl GameObject for Hazard {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), Color::HAZARD);
    }
}
