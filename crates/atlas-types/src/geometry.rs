use serde::{Deserialize, Serialize};

/// A point in the asset's coordinate space, expressed as percentages of the
/// rendered bounding box. Resolution-independent: the same point means the
/// same map location across viewports of different pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a pixel position within a rendered bounding box into
    /// percentage coordinates.
    pub fn from_pixels(px: f64, py: f64, width: f64, height: f64) -> Self {
        Self {
            x: (px / width) * 100.0,
            y: (py / height) * 100.0,
        }
    }

    /// Clamp both coordinates into the valid `[0, 100]` range.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }
}

/// A normalized rectangle in percentage coordinates.
///
/// Invariant: `x1 <= x2` and `y1 <= y2` always, regardless of the drag
/// direction the rectangle was created from. Construct via
/// [`RectBounds::from_corners`] to uphold this.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectBounds {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RectBounds {
    /// Build a normalized rectangle from two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Width in percentage units.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height in percentage units.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns `true` if the point lies within the rectangle (inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Returns `true` if the corner ordering invariant holds.
    pub fn is_normalized(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }
}
