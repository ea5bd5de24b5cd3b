//! A drawing surface that only counts what it is asked to draw.

use hopline_math::{Rect, Vec2, ViewTransform};
use hopline_scene::{Color, Surface};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub rects: u64,
    pub texts: u64,
    pub transforms: u64,
}

/// Headless [`Surface`]: counts primitives per frame and over the run.
#[derive(Debug, Default)]
pub struct StatsSurface {
    frame: DrawStats,
    total: DrawStats,
    peak_rects: u64,
    last_text: Option<String>,
}

impl StatsSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the previous frame's counters.
    pub fn begin_frame(&mut self) {
        self.frame = DrawStats::default();
    }

    pub fn frame(&self) -> DrawStats {
        self.frame
    }

    pub fn total(&self) -> DrawStats {
        self.total
    }

    /// Most rectangles drawn in a single frame.
    pub fn peak_rects(&self) -> u64 {
        self.peak_rects
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }
}

impl Surface for StatsSurface {
    fn set_transform(&mut self, _transform: ViewTransform) {
        self.frame.transforms += 1;
        self.total.transforms += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.frame.rects += 1;
        self.total.rects += 1;
        self.peak_rects = self.peak_rects.max(self.frame.rects);
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, _color: Color) {
        self.frame.texts += 1;
        self.total.texts += 1;
        self.last_text = Some(text.to_owned());
    }
}
