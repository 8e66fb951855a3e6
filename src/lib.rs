//! # sphereview
//!
//! A 2D canvas that draws a 3D spheres environment as colored circles.
//!
//! ## Architecture
//!
//! sphereview is organized as a workspace with multiple crates:
//!
//! 1. **sphereview-core** - Error types, positions, colors, snapshots
//! 2. **sphereview-canvas** - Circle canvas, projection, color adapter, rasteriser
//! 3. **sphereview-settings** - Window, canvas and sphere default configuration
//! 4. **sphereview-environment** - Spheres, the environment container and its window
//! 5. **sphereview** - Command-line binary that integrates all crates
//!
//! Positions and radii use normalized coordinates in [-1, +1]. Only x and y
//! reach the canvas; colors are drawn when fully opaque and hidden otherwise.

pub mod demo;

pub use sphereview_canvas::{
    render_canvas, save_png, Anchor, Canvas, CanvasColor, CircleItem, ItemId, PixelPoint,
    Projection,
};
pub use sphereview_core::{
    Error, LookupError, Position, ResourceError, Result, Rgba, SphereSnapshot, ValidationError,
};
pub use sphereview_environment::{Environment, Gui, ShapeSync, Sphere, StackDirection};
pub use sphereview_settings::{
    CanvasSettings, Config, DuplicatePolicy, SettingsError, SphereDefaults, WindowSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for command output
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
