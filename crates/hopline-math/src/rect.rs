use glam::Vec2;

/// Axis-aligned rectangle in screen space (`y` grows downward).
///
/// Invariant: `left <= right` and `top <= bottom`. Constructors that take an
/// origin and a size expect a non-negative size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from its top-left corner and its size.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        debug_assert!(
            size.x >= 0.0 && size.y >= 0.0,
            "negative rectangle size {size:?}"
        );
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.x,
            bottom: origin.y + size.y,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.left + self.width() * 0.5,
            self.top + self.height() * 0.5,
        )
    }

    /// Returns true if the two rectangles share interior area.
    ///
    /// Touching edges do not count: a player resting exactly on top of a
    /// block does not overlap it.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Returns the overlapping region, or `None` when [`intersects`](Self::intersects)
    /// is false.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        })
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Returns a copy moved by `offset`.
    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }

    /// Returns a copy whose top edge is raised by `amount` (moved toward
    /// negative `y`). The bottom edge is untouched.
    pub fn extend_top(&self, amount: f32) -> Rect {
        Rect {
            top: self.top - amount,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_from_origin_size() {
        let r = rect(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(r.width(), 30.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.size(), Vec2::new(30.0, 40.0));
        assert_eq!(r.origin(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_intersect_overlapping() {
        let player = rect(0.0, -8.0, 32.0, 32.0);
        let block = rect(0.0, 16.0, 64.0, 8.0);
        let hit = player.intersect(&block).unwrap();
        assert_eq!(hit, rect(0.0, 16.0, 32.0, 8.0));
        assert_eq!(hit.bottom, player.bottom);
    }

    #[test]
    fn test_intersect_is_symmetric() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let player = rect(0.0, 0.0, 32.0, 32.0);
        let block_below = rect(0.0, 32.0, 64.0, 8.0);
        let block_right = rect(32.0, 0.0, 8.0, 8.0);
        assert!(!player.intersects(&block_below));
        assert!(!player.intersects(&block_right));
        assert_eq!(player.intersect(&block_below), None);
    }

    #[test]
    fn test_disjoint() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(100.0, 100.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contained_rect_intersection_is_inner() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(10.0, 10.0, 5.0, 5.0);
        assert_eq!(outer.intersect(&inner), Some(inner));
    }

    #[test]
    fn test_translate() {
        let r = rect(0.0, 0.0, 4.0, 4.0).translate(Vec2::new(2.0, -3.0));
        assert_eq!(r, Rect::new(2.0, -3.0, 6.0, 1.0));
    }

    #[test]
    fn test_extend_top_keeps_bottom() {
        let r = rect(0.0, 10.0, 4.0, 4.0).extend_top(6.0);
        assert_eq!(r.top, 4.0);
        assert_eq!(r.bottom, 14.0);
        assert_eq!(r.height(), 10.0);
    }

    #[test]
    fn test_center_and_contains() {
        let r = rect(0.0, 0.0, 10.0, 20.0);
        assert_eq!(r.center(), Vec2::new(5.0, 10.0));
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(!r.contains_point(Vec2::new(10.5, 20.0)));
    }
}
