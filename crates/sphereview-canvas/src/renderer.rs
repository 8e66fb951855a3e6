//! Canvas renderer
//! Rasterises canvas items into an image buffer using tiny-skia.
//!
//! Items are painted back to front in stacking order: fill first, then the
//! outline stroke. Transparent fills and outlines are skipped entirely.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use sphereview_core::{ResourceError, Result};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use crate::canvas::Canvas;
use crate::color::CanvasColor;

fn skia_color(color: CanvasColor) -> Option<Color> {
    match color {
        CanvasColor::Transparent => None,
        CanvasColor::Solid([r, g, b]) => Some(Color::from_rgba8(r, g, b, 255)),
    }
}

/// Render the canvas to an image buffer of the canvas' dimensions.
pub fn render_canvas(canvas: &Canvas) -> Result<RgbImage> {
    let (width, height) = canvas.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or(ResourceError::Surface { width, height })?;

    if let Some(background) = skia_color(canvas.background()) {
        pixmap.fill(background);
    }

    let stroke = Stroke {
        width: canvas.outline_width(),
        ..Default::default()
    };

    let mut painted = 0usize;
    for (_, item) in canvas.items() {
        if !item.is_visible() {
            continue;
        }
        // Zero or negative radii produce no path.
        let Some(path) = PathBuilder::from_circle(
            item.center.x as f32,
            item.center.y as f32,
            item.radius as f32,
        ) else {
            continue;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;

        if let Some(fill) = skia_color(item.fill) {
            paint.set_color(fill);
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        if let Some(outline) = skia_color(item.outline) {
            if stroke.width > 0.0 {
                paint.set_color(outline);
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        painted += 1;
    }
    debug!(width, height, painted, "canvas rendered");

    // Convert Pixmap to RgbImage
    let data = pixmap.data();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let idx = (y as usize * width as usize + x as usize) * 4;
        // Background and items are opaque, so premultiplied == straight.
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    }))
}

/// Render the canvas and write it as a PNG file.
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let image = render_canvas(canvas)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| ResourceError::Export {
            reason: format!("{}: {}", path.display(), e),
        })?;
    debug!(path = %path.display(), "canvas exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PixelPoint;

    #[test]
    fn test_background_only() {
        let canvas = Canvas::new(20, 10);
        let image = render_canvas(&canvas).unwrap();
        assert_eq!(image.dimensions(), (20, 10));
        assert_eq!(image.get_pixel(5, 5), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_filled_circle() {
        let mut canvas = Canvas::new(40, 40);
        let id = canvas.create_circle(PixelPoint::new(20.0, 20.0), 10.0);
        canvas.set_color(id, CanvasColor::rgb(0, 0, 255)).unwrap();

        let image = render_canvas(&canvas).unwrap();
        assert_eq!(image.get_pixel(20, 20), &Rgb([0, 0, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_wide_canvas_far_corner_pixels() {
        let mut canvas = Canvas::new(30, 12);
        let id = canvas.create_circle(PixelPoint::new(25.0, 8.0), 3.0);
        canvas.set_color(id, CanvasColor::rgb(255, 0, 0)).unwrap();

        let image = render_canvas(&canvas).unwrap();
        assert_eq!(image.get_pixel(25, 8), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(29, 11), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(29, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_zero_size_canvas_is_an_error() {
        let canvas = Canvas::new(0, 10);
        let err = render_canvas(&canvas).unwrap_err();
        assert!(err.is_resource_error());
    }
}
