use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates.
///
/// A rect with non-positive width or height is the canonical "nothing found"
/// value ([`Rect::ZERO`]); callers test with [`Rect::is_empty`] rather than
/// matching on an error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The "nothing found" sentinel.
    pub const ZERO: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a corner box `[x1, y1, x2, y2]` with exclusive `x2`/`y2`.
    pub fn from_corner_box(b: [i32; 4]) -> Self {
        Self {
            x: b[0],
            y: b[1],
            width: b[2] - b[0],
            height: b[3] - b[1],
        }
    }

    /// Corner box `[x1, y1, x2, y2]` with `x2 = x + width` (exclusive).
    pub fn corner_box(&self) -> [i32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Width over height. Only meaningful for non-empty rects.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Intersection-over-union with another rect.
    ///
    /// 0.0 when the rects are disjoint or either is degenerate.
    pub fn iou(&self, other: &Rect) -> f32 {
        let a = self.corner_box();
        let b = other.corner_box();

        let xa = a[0].max(b[0]);
        let ya = a[1].max(b[1]);
        let xb = a[2].min(b[2]);
        let yb = a[3].min(b[3]);

        let inter = (xb - xa).max(0) as i64 * (yb - ya).max(0) as i64;
        let union = self.area() + other.area() - inter;
        if union <= 0 {
            return 0.0;
        }
        inter as f32 / union as f32
    }
}
