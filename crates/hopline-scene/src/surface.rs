//! Drawing target abstraction.
//!
//! The scene never talks to a graphics backend directly. It sets a view
//! transform and lets each object draw primitives onto a [`Surface`].

use hopline_math::{Rect, Vec2, ViewTransform};

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const PLAYER: Color = Color::rgb(66, 135, 245);
    pub const BLOCK: Color = Color::rgb(120, 84, 48);
    pub const CRUMBLING: Color = Color::rgb(190, 140, 90);
    pub const COLLECTABLE: Color = Color::rgb(250, 210, 40);
    pub const HAZARD: Color = Color::rgb(220, 40, 40);
}

/// An opaque drawable target.
pub trait Surface {
    /// Replace the current world-to-screen transform. Subsequent draw calls
    /// take world coordinates.
    fn set_transform(&mut self, transform: ViewTransform);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetTransform(ViewTransform),
    FillRect { rect: Rect, color: Color },
    Text { text: String, position: Vec2, color: Color },
}

/// Surface that records every call, for tests and headless tooling.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles drawn, in draw order.
    pub fn rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Text drawn, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_transform(&mut self, transform: ViewTransform) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color,
        });
    }
}
