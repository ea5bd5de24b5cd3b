//! The view onto the world.

use hopline_math::{Rect, Vec2, ViewTransform};

use crate::object::{Body, GameObject};
use crate::surface::Surface;

/// A zero-size object whose position is the world point shown at the
/// viewport's anchor.
///
/// The scene calls [`Camera::track`] once per frame with the player's
/// position. Horizontal tracking only moves forward, so the scroll position
/// is a monotone high-water mark the culling pass can rely on.
#[derive(Clone, Debug)]
pub struct Camera {
    body: Body,
    viewport: Vec2,
    /// Fraction of the viewport, `(0.3, 0.5)` puts the target a third of the
    /// way in from the left and vertically centered.
    anchor: Vec2,
}

impl Camera {
    pub fn new(position: Vec2, viewport: Vec2, anchor: Vec2) -> Self {
        Self {
            body: Body::new(position, Vec2::ZERO),
            viewport,
            anchor,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Follow `target`. x never decreases; y follows freely.
    pub fn track(&mut self, target: Vec2) {
        let position = &mut self.body.position;
        position.x = position.x.max(target.x);
        position.y = target.y;
    }

    /// World-to-screen transform for everything except screen-space overlays.
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform::looking_at(self.body.position, self.viewport * self.anchor)
    }

    /// World rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let origin = self.body.position - self.viewport * self.anchor;
        Rect::from_origin_size(origin, self.viewport)
    }
}

impl GameObject for Camera {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render(&self, _surface: &mut dyn Surface) {}
}
