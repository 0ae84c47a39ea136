use crate::foundation::core::{Point, Rect, Size};

/// A rectangle described by its center point rather than a corner.
///
/// Scene nodes are positioned by their center, while frames are reported as
/// corner-origin [`Rect`]s. `RectRegion` converts between the two so callers
/// can write `node.set_position(RectRegion::from_rect(frame).origin)`.
///
/// The y axis points up: the "lower left" corner has the smallest y.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectRegion {
    /// Center of the rectangle.
    pub origin: Point,
    /// Width and height, both >= 0.
    pub size: Size,
}

impl RectRegion {
    /// Region centered on `origin`. Negative extents are folded to their magnitude.
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            origin,
            size: Size::new(size.width.abs(), size.height.abs()),
        }
    }

    /// Region covering a corner-origin rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        let size = rect.size();
        Self {
            origin: Point::new(
                rect.x0 + size.width / 2.0,
                rect.y0 + size.height / 2.0,
            ),
            size,
        }
    }

    pub fn lower_left_corner(&self) -> Point {
        Point::new(self.min_x(), self.min_y())
    }

    pub fn upper_left_corner(&self) -> Point {
        Point::new(self.min_x(), self.max_y())
    }

    /// Equivalent corner-origin rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.lower_left_corner(), self.size)
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x - self.size.width / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y - self.size.height / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }
}

impl From<Rect> for RectRegion {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<RectRegion> for Rect {
    fn from(region: RectRegion) -> Self {
        region.rect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
