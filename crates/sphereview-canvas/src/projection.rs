//! Projection between normalized environment coordinates and canvas pixels.
//!
//! Normalized coordinates span [-1, +1] on each axis. The projection maps that
//! square onto a pixel square whose side is the smaller canvas dimension (the
//! span), drops the z coordinate, and flips y so that up is positive from the
//! caller's point of view.

use serde::{Deserialize, Serialize};
use sphereview_core::Position;
use std::fmt;

use crate::canvas::Canvas;

/// Where the normalized square sits on a non-square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The square is centered on the canvas.
    #[default]
    Center,
    /// The square starts at the canvas origin (top-left corner).
    TopLeft,
}

/// A point in canvas pixel space. (0, 0) is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Normalized-to-pixel mapping for one canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: f64,
    height: f64,
    anchor: Anchor,
    y_up: bool,
}

impl Projection {
    /// Creates a centered, y-up projection for the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            anchor: Anchor::Center,
            y_up: true,
        }
    }

    /// Creates a default projection matching a canvas' current dimensions.
    pub fn for_canvas(canvas: &Canvas) -> Self {
        let (width, height) = canvas.dimensions();
        Self::new(width, height)
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets whether positive y points up the screen.
    pub fn with_y_up(mut self, y_up: bool) -> Self {
        self.y_up = y_up;
        self
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn y_up(&self) -> bool {
        self.y_up
    }

    /// Side length of the normalized square, in pixels.
    pub fn span(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Pixel position of the normalized origin.
    pub fn origin(&self) -> PixelPoint {
        let half = self.span() / 2.0;
        match self.anchor {
            Anchor::Center => PixelPoint::new(self.width / 2.0, self.height / 2.0),
            Anchor::TopLeft => PixelPoint::new(half, half),
        }
    }

    /// Converts a normalized position to pixel coordinates, ignoring z.
    ///
    /// Formula:
    /// ```text
    /// pixel_x = origin_x + x * span / 2
    /// pixel_y = origin_y - y * span / 2   // y up; `+` when y points down
    /// ```
    pub fn to_pixel(&self, position: &Position) -> PixelPoint {
        let origin = self.origin();
        let scale = self.span() / 2.0;
        let dy = position.y * scale;
        PixelPoint::new(
            origin.x + position.x * scale,
            if self.y_up { origin.y - dy } else { origin.y + dy },
        )
    }

    /// Converts pixel coordinates back to normalized (x, y).
    pub fn to_normalized(&self, pixel: PixelPoint) -> (f64, f64) {
        let origin = self.origin();
        let scale = self.span() / 2.0;
        let x = (pixel.x - origin.x) / scale;
        let y = (pixel.y - origin.y) / scale;
        (x, if self.y_up { -y } else { y })
    }

    /// Converts a normalized radius to pixels. A radius of one touches the
    /// edges of the normalized square.
    pub fn radius_to_pixels(&self, radius: f64) -> f64 {
        radius * self.span() / 2.0
    }

    pub fn pixels_to_radius(&self, pixels: f64) -> f64 {
        pixels * 2.0 / self.span()
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Span: {:.1}px | Anchor: {:?} | Y: {}",
            self.span(),
            self.anchor,
            if self.y_up { "up" } else { "down" }
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(600, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_canvas_center() {
        let projection = Projection::new(600, 600);
        let pixel = projection.to_pixel(&Position::ORIGIN);
        assert_eq!(pixel, PixelPoint::new(300.0, 300.0));
    }

    #[test]
    fn test_corners() {
        let projection = Projection::new(600, 600);
        let top_left = projection.to_pixel(&Position::new(-1.0, 1.0, 0.0));
        assert_eq!(top_left, PixelPoint::new(0.0, 0.0));
        let bottom_right = projection.to_pixel(&Position::new(1.0, -1.0, 0.0));
        assert_eq!(bottom_right, PixelPoint::new(600.0, 600.0));
    }

    #[test]
    fn test_top_left_anchor_on_wide_canvas() {
        let centered = Projection::new(800, 600);
        let anchored = Projection::new(800, 600).with_anchor(Anchor::TopLeft);
        assert_eq!(centered.to_pixel(&Position::ORIGIN), PixelPoint::new(400.0, 300.0));
        assert_eq!(anchored.to_pixel(&Position::ORIGIN), PixelPoint::new(300.0, 300.0));
    }

    #[test]
    fn test_y_down() {
        let projection = Projection::new(600, 600).with_y_up(false);
        let pixel = projection.to_pixel(&Position::new(0.0, 0.5, 0.0));
        assert_eq!(pixel.y, 450.0);
    }

    #[test]
    fn test_radius() {
        let projection = Projection::new(800, 600);
        assert_eq!(projection.radius_to_pixels(1.0), 300.0);
        assert_eq!(projection.pixels_to_radius(30.0), 0.1);
    }
}
