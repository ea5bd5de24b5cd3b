//! Camera view transform: a pure translation from world to screen space.

use glam::{Mat3, Vec2};

use crate::Rect;

/// Maps world coordinates to screen coordinates.
///
/// Only translation is supported; the camera never rotates or zooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Added to every world-space point.
    pub translation: Vec2,
}

impl ViewTransform {
    /// Leaves coordinates untouched. Used for screen-space overlays.
    pub const IDENTITY: ViewTransform = ViewTransform {
        translation: Vec2::ZERO,
    };

    pub fn from_translation(translation: Vec2) -> Self {
        Self { translation }
    }

    /// Builds the transform that places `world_anchor` at `screen_anchor`.
    pub fn looking_at(world_anchor: Vec2, screen_anchor: Vec2) -> Self {
        Self {
            translation: screen_anchor - world_anchor,
        }
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        point + self.translation
    }

    pub fn apply_rect(&self, rect: &Rect) -> Rect {
        rect.translate(self.translation)
    }

    /// Homogeneous 3x3 matrix for backends that take a matrix.
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_translation(self.translation)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
