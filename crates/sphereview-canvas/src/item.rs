//! Canvas items.

use std::fmt;

use crate::color::CanvasColor;
use crate::projection::PixelPoint;

/// Identifier of an item on one canvas. Never reused by that canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A circle drawn in pixel space.
///
/// New circles are black-on-black until a color is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleItem {
    pub center: PixelPoint,
    pub radius: f64,
    pub fill: CanvasColor,
    pub outline: CanvasColor,
}

impl CircleItem {
    pub fn new(center: PixelPoint, radius: f64) -> Self {
        Self {
            center,
            radius,
            fill: CanvasColor::BLACK,
            outline: CanvasColor::BLACK,
        }
    }

    /// Bounding box as (x1, y1, x2, y2) in pixels.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    /// Whether a pixel position lies inside the circle.
    pub fn contains(&self, point: PixelPoint) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    pub fn is_visible(&self) -> bool {
        !(self.fill.is_transparent() && self.outline.is_transparent())
    }
}
