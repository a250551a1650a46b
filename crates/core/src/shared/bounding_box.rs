use crate::shared::point::Point;

/// Inclusive rectangle covering every opaque pixel of an image.
///
/// When no pixel is opaque the box is the sentinel produced by
/// [`BoundingBox::empty`]: `top_left = (width, height)` and
/// `bottom_right = (-1, -1)`. The sentinel is inverted on both axes, so it can
/// never be confused with a real 1×1 box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoundingBox {
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// The "nothing found" box for an image of the given dimensions.
    ///
    /// Also the starting value of every scan: extending it with a point
    /// collapses it onto that point.
    pub const fn empty(width: i64, height: i64) -> Self {
        Self::new(Point::new(width, height), Point::new(-1, -1))
    }

    pub fn is_empty(&self) -> bool {
        self.top_left.x > self.bottom_right.x || self.top_left.y > self.bottom_right.y
    }

    /// Grows the box to include `point`.
    pub fn extend(&mut self, point: Point) {
        self.top_left.x = self.top_left.x.min(point.x);
        self.top_left.y = self.top_left.y.min(point.y);
        self.bottom_right.x = self.bottom_right.x.max(point.x);
        self.bottom_right.y = self.bottom_right.y.max(point.y);
    }

    /// Inclusive width; zero for empty boxes.
    pub fn width(&self) -> i64 {
        (self.bottom_right.x - self.top_left.x + 1).max(0)
    }

    /// Inclusive height; zero for empty boxes.
    pub fn height(&self) -> i64 {
        (self.bottom_right.y - self.top_left.y + 1).max(0)
    }
}
