//! Top-level window owning the drawing canvas.
//!
//! The window is a headless model: it has a title and dimensions and holds
//! the canvas until it is destroyed. Destruction is explicit or happens on
//! drop, and releases the canvas exactly once.

use sphereview_canvas::Canvas;
use sphereview_core::{ResourceError, Result};
use sphereview_settings::{CanvasSettings, WindowSettings};
use tracing::{info, warn};

/// A window with a single canvas.
#[derive(Debug)]
pub struct Gui {
    title: String,
    dimensions: (u32, u32),
    canvas: Option<Canvas>,
}

impl Gui {
    pub fn new(window: &WindowSettings, canvas: &CanvasSettings) -> Self {
        let mut surface = Canvas::new(canvas.width, canvas.height);
        surface.set_background(canvas.background);
        surface.set_outline_width(canvas.outline_width);

        info!(
            title = %window.title,
            width = window.width,
            height = window.height,
            "window created"
        );

        Self {
            title: window.title.clone(),
            dimensions: (window.width, window.height),
            canvas: Some(surface),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Window size in pixels (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub fn is_destroyed(&self) -> bool {
        self.canvas.is_none()
    }

    /// The canvas, or a resource error once the window is gone.
    pub fn canvas(&self) -> Result<&Canvas> {
        Ok(self.canvas.as_ref().ok_or_else(|| self.destroyed())?)
    }

    pub fn canvas_mut(&mut self) -> Result<&mut Canvas> {
        let destroyed = self.destroyed();
        Ok(self.canvas.as_mut().ok_or(destroyed)?)
    }

    /// Releases the canvas. Returns false when it was already released.
    pub fn destroy(&mut self) -> bool {
        match self.canvas.take() {
            Some(canvas) => {
                info!(title = %self.title, items = canvas.len(), "window destroyed");
                true
            }
            None => {
                warn!(title = %self.title, "window already destroyed");
                false
            }
        }
    }

    fn destroyed(&self) -> ResourceError {
        ResourceError::WindowDestroyed {
            title: self.title.clone(),
        }
    }
}

impl Drop for Gui {
    fn drop(&mut self) {
        if !self.is_destroyed() {
            self.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sphereview_canvas::CanvasColor;

    fn gui() -> Gui {
        Gui::new(&WindowSettings::default(), &CanvasSettings::default())
    }

    #[test]
    fn test_new_window_uses_settings() {
        let gui = gui();
        assert_eq!(gui.dimensions(), (800, 600));
        let canvas = gui.canvas().unwrap();
        assert_eq!(canvas.dimensions(), (600, 600));
        assert_eq!(canvas.background(), CanvasColor::BLACK);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_destroy_releases_once() {
        let mut gui = gui();
        assert!(gui.destroy());
        assert!(gui.is_destroyed());
        assert!(!gui.destroy());
    }

    #[test]
    fn test_canvas_access_after_destroy_fails() {
        let mut gui = gui();
        gui.destroy();
        let err = gui.canvas().unwrap_err();
        assert!(err.is_resource_error());
        assert!(err.to_string().contains("Spheres Environment"));
        assert!(gui.canvas_mut().is_err());
    }
}
