//! 2D screen-space geometry for Hopline: rectangles, view transforms and the
//! glam vector types everything else is built on.
//!
//! Coordinates follow screen convention: `y` grows downward, so for every
//! [`Rect`] `top <= bottom`.

mod rect;
mod transform;

pub use glam::Vec2;
pub use rect::Rect;
pub use transform::ViewTransform;
