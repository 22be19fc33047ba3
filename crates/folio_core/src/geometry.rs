//! Geometry primitives
//!
//! Viewport-space points and rectangles as reported by the host. A rect
//! with zero width or height has not been laid out yet; callers that
//! divide by a dimension check [`Rect::is_measured`] first and skip the
//! frame otherwise.

use serde::{Deserialize, Serialize};

/// A point in viewport pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset from `other` to `self`
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in viewport pixels (like a DOM bounding rect)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect anchored at the origin with the given size
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True once layout has produced a non-degenerate box
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Overlapping region of two rects, or `None` if they don't touch
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Fraction of this rect's area inside `viewport` (0.0 to 1.0).
    ///
    /// Returns `None` for an unmeasured rect.
    pub fn visible_ratio(&self, viewport: &Rect) -> Option<f32> {
        if !self.is_measured() {
            return None;
        }

        let visible = self
            .intersection(viewport)
            .map(|r| r.area())
            .unwrap_or(0.0);

        Some((visible / self.area()).clamp(0.0, 1.0))
    }

    /// Same rect shifted by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_unmeasured_rect() {
        assert!(!Rect::new(0.0, 0.0, 0.0, 100.0).is_measured());
        assert!(!Rect::new(0.0, 0.0, 100.0, 0.0).is_measured());
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_measured());
        assert_eq!(
            Rect::default().visible_ratio(&Rect::new(0.0, 0.0, 800.0, 600.0)),
            None
        );
    }

    #[test]
    fn test_visible_ratio() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        // Fully inside
        let inside = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(inside.visible_ratio(&viewport), Some(1.0));

        // Half below the fold
        let half = Rect::new(0.0, 500.0, 100.0, 200.0);
        assert_eq!(half.visible_ratio(&viewport), Some(0.5));

        // Entirely off screen
        let below = Rect::new(0.0, 900.0, 100.0, 100.0);
        assert_eq!(below.visible_ratio(&viewport), Some(0.0));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(11.0, 5.0)));
    }
}
