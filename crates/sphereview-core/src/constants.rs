//! Constants shared across the workspace.

/// Properties reported for every sphere snapshot, in display order.
pub const OBJECT_PROPERTIES: [&str; 2] = ["position", "radius"];

/// Default window size in pixels (width, height).
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (800, 600);

/// Default canvas size in pixels (width, height).
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (600, 600);

/// Default sphere radius, in normalized units.
pub const DEFAULT_RADIUS: f64 = 1.0;
