//! # sphereview Canvas
//!
//! A small retained-mode drawing surface for circles, plus the pure adapters
//! that translate the spheres vocabulary into canvas terms.
//!
//! ## Architecture
//!
//! ```text
//! Canvas (item store + stacking order + revision counter)
//!   ├── CircleItem (pixel center, pixel radius, fill, outline)
//!   ├── Projection (normalized [-1, +1] <-> pixels, z dropped)
//!   ├── CanvasColor (RGBA floats -> #RRGGBB or transparent)
//!   └── Renderer (tiny-skia raster -> RgbImage / PNG)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sphereview_canvas::{Canvas, CanvasColor, Projection};
//! use sphereview_core::Position;
//!
//! let mut canvas = Canvas::new(600, 600);
//! let projection = Projection::for_canvas(&canvas);
//! let id = canvas.create_circle(projection.to_pixel(&Position::ORIGIN), 30.0);
//! canvas.set_fill(id, CanvasColor::rgb(0, 0, 255)).unwrap();
//! let image = sphereview_canvas::render_canvas(&canvas).unwrap();
//! assert_eq!(image.dimensions(), (600, 600));
//! ```

pub mod canvas;
pub mod color;
pub mod item;
pub mod projection;
pub mod renderer;

pub use canvas::Canvas;
pub use color::CanvasColor;
pub use item::{CircleItem, ItemId};
pub use projection::{Anchor, PixelPoint, Projection};
pub use renderer::{render_canvas, save_png};
