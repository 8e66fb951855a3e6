//! Rendering, projection and export behaviour of the canvas crate

use image::Rgb;
use proptest::prelude::*;
use sphereview_canvas::{render_canvas, save_png, Anchor, Canvas, CanvasColor, PixelPoint, Projection};
use sphereview_core::{Position, Rgba};
use tempfile::TempDir;

fn sphere_on(canvas: &mut Canvas, position: Position, radius: f64, color: Rgba) -> sphereview_canvas::ItemId {
    let projection = Projection::for_canvas(canvas);
    let id = canvas.create_circle(projection.to_pixel(&position), projection.radius_to_pixels(radius));
    canvas.set_color(id, CanvasColor::from_rgba(&color)).unwrap();
    id
}

proptest! {
    #[test]
    fn z_never_changes_the_pixel_position(
        x in -1.0f64..=1.0,
        y in -1.0f64..=1.0,
        z1 in -10.0f64..10.0,
        z2 in -10.0f64..10.0,
    ) {
        let projection = Projection::new(800, 600);
        prop_assert_eq!(
            projection.to_pixel(&Position::new(x, y, z1)),
            projection.to_pixel(&Position::new(x, y, z2))
        );
    }

    #[test]
    fn pixel_round_trip(x in -1.0f64..=1.0, y in -1.0f64..=1.0) {
        for anchor in [Anchor::Center, Anchor::TopLeft] {
            let projection = Projection::new(640, 480).with_anchor(anchor);
            let (nx, ny) = projection.to_normalized(projection.to_pixel(&Position::new(x, y, 0.0)));
            prop_assert!((nx - x).abs() < 1e-9);
            prop_assert!((ny - y).abs() < 1e-9);
        }
    }
}

#[test]
fn test_positive_y_is_drawn_higher_on_screen() {
    let projection = Projection::new(600, 600);
    let low = projection.to_pixel(&Position::new(0.0, -0.5, 0.0));
    let high = projection.to_pixel(&Position::new(0.0, 0.5, 0.0));
    assert!(high.y < low.y);
}

#[test]
fn test_opaque_sphere_is_drawn_and_translucent_is_not() {
    let mut canvas = Canvas::new(600, 600);
    sphere_on(
        &mut canvas,
        Position::new(-0.5, 0.0, 0.0),
        0.1,
        Rgba::opaque(1.0, 0.0, 0.0).unwrap(),
    );
    sphere_on(
        &mut canvas,
        Position::new(0.5, 0.0, 0.0),
        0.1,
        Rgba::new(1.0, 0.0, 0.0, 0.5).unwrap(),
    );

    let image = render_canvas(&canvas).unwrap();
    assert_eq!(image.get_pixel(150, 300), &Rgb([255, 0, 0]));
    assert_eq!(image.get_pixel(450, 300), &Rgb([0, 0, 0]));
}

#[test]
fn test_stacking_order_decides_overlap() {
    let mut canvas = Canvas::new(600, 600);
    let blue = sphere_on(&mut canvas, Position::ORIGIN, 0.2, Rgba::opaque(0.0, 0.0, 1.0).unwrap());
    let green = sphere_on(&mut canvas, Position::ORIGIN, 0.1, Rgba::opaque(0.0, 1.0, 0.0).unwrap());

    let image = render_canvas(&canvas).unwrap();
    assert_eq!(image.get_pixel(300, 300), &Rgb([0, 255, 0]));

    canvas.raise(blue).unwrap();
    let image = render_canvas(&canvas).unwrap();
    assert_eq!(image.get_pixel(300, 300), &Rgb([0, 0, 255]));

    canvas.lower(blue).unwrap();
    assert_eq!(canvas.stacking_order(), &[blue, green]);
}

#[test]
fn test_background_color() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_background("#336699".parse().unwrap());
    let image = render_canvas(&canvas).unwrap();
    assert_eq!(image.get_pixel(0, 0), &Rgb([0x33, 0x66, 0x99]));
}

#[test]
fn test_hit_testing_uses_pixel_geometry() {
    let mut canvas = Canvas::new(600, 600);
    let id = sphere_on(&mut canvas, Position::new(0.5, 0.5, 0.0), 0.1, Rgba::WHITE);
    assert_eq!(canvas.item_at(PixelPoint::new(450.0, 150.0)), Some(id));
    assert_eq!(canvas.item_at(PixelPoint::new(300.0, 300.0)), None);
}

#[test]
fn test_save_png() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("frame.png");

    let mut canvas = Canvas::new(64, 48);
    sphere_on(&mut canvas, Position::ORIGIN, 0.5, Rgba::WHITE);
    save_png(&canvas, &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (64, 48));
    assert_eq!(decoded.get_pixel(32, 24), &Rgb([255, 255, 255]));
}

#[test]
fn test_save_png_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("frame.png");
    let err = save_png(&Canvas::new(4, 4), &path).unwrap_err();
    assert!(err.is_resource_error());
}
