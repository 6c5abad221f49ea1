#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are list-local: the origin is the top-left corner of the
//! list's visible area, `y` grows downward.

use serde::{Deserialize, Serialize};

/// A pointer position in list coordinates (sub-pixel precision).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A rectangle for row bounds, hover overlays, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero or negative area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom edges exclusive, so
    /// vertically stacked rows never both claim the same point.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x as f32
            && point.x < self.right() as f32
            && point.y >= self.y as f32
            && point.y < self.bottom() as f32
    }

    /// Same size, moved so its top-left corner sits at `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn offset_to(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }

    /// Same size, moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Interpolate every edge between `self` and `to`.
    ///
    /// `fraction` is clamped to `[0.0, 1.0]`; edges truncate toward `self`
    /// the way integer bound evaluators do.
    #[must_use]
    pub fn lerp(&self, to: &Rect, fraction: f32) -> Rect {
        let t = fraction.clamp(0.0, 1.0);
        let lerp = |start: i32, end: i32| start + (t * (end - start) as f32) as i32;
        let left = lerp(self.left(), to.left());
        let top = lerp(self.top(), to.top());
        let right = lerp(self.right(), to.right());
        let bottom = lerp(self.bottom(), to.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.9, 7.9)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn stacked_rows_do_not_share_a_boundary() {
        let upper = Rect::new(0, 0, 100, 40);
        let lower = Rect::new(0, 40, 100, 40);
        let boundary = Point::new(10.0, 40.0);
        assert!(!upper.contains(boundary));
        assert!(lower.contains(boundary));
    }

    #[test]
    fn offset_to_keeps_size() {
        let rect = Rect::new(5, 6, 30, 10);
        assert_eq!(rect.offset_to(0, 100), Rect::new(0, 100, 30, 10));
        assert_eq!(rect.translated(-5, 4), Rect::new(0, 10, 30, 10));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let from = Rect::new(0, 0, 100, 40);
        let to = Rect::new(0, 200, 100, 40);
        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
        assert_eq!(from.lerp(&to, 0.5), Rect::new(0, 100, 100, 40));
        assert_eq!(from.lerp(&to, 7.0), to);
    }

    #[test]
    fn empty_rects() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0, 0, 10, -1).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }
}
