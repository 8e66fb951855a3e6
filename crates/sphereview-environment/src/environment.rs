//! Named collection of spheres drawn on one window's canvas.

use std::collections::HashMap;
use std::path::Path;

use image::RgbImage;
use sphereview_canvas::{render_canvas, save_png, Canvas, ItemId, Projection};
use sphereview_core::{
    EnvironmentSnapshot, Error, LookupError, ResourceError, Result, Rgba, SphereSnapshot,
    ValidationError,
};
use sphereview_settings::{Config, DuplicatePolicy, SettingsResult, SphereDefaults};
use tracing::{debug, info, warn};

use crate::gui::Gui;
use crate::sphere::{RestackClock, ShapeSync, Sphere, StackDirection};

/// A spheres environment rendered as circles.
///
/// Spheres are kept in insertion order. Attribute changes stay on the
/// spheres until [`Environment::update`] pushes them to the canvas.
#[derive(Debug)]
pub struct Environment {
    gui: Gui,
    projection: Projection,
    defaults: SphereDefaults,
    duplicate_policy: DuplicatePolicy,
    order: Vec<String>,
    spheres: HashMap<String, Sphere>,
    clock: RestackClock,
}

impl Environment {
    /// Creates an environment with the default configuration.
    pub fn new() -> Self {
        Self::build(&Config::default())
    }

    /// Creates an environment from a validated configuration.
    pub fn with_config(config: &Config) -> SettingsResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &Config) -> Self {
        let projection = config.canvas.projection();
        debug!(%projection, policy = %config.duplicate_policy, "environment created");
        Self {
            gui: Gui::new(&config.window, &config.canvas),
            projection,
            defaults: config.defaults,
            duplicate_policy: config.duplicate_policy,
            order: Vec::new(),
            spheres: HashMap::new(),
            clock: RestackClock::default(),
        }
    }

    pub fn gui(&self) -> &Gui {
        &self.gui
    }

    /// The canvas, or a resource error once the environment is destroyed.
    pub fn canvas(&self) -> Result<&Canvas> {
        self.gui.canvas()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn defaults(&self) -> &SphereDefaults {
        &self.defaults
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Names of the properties reported by [`Environment::get`].
    pub fn object_properties(&self) -> &'static [&'static str] {
        Sphere::object_properties()
    }

    /// Creates a sphere with the configured defaults and a backing circle.
    ///
    /// An existing name is rejected or replaced according to the duplicate
    /// policy. A replaced sphere loses its circle and the new one is
    /// enumerated last.
    pub fn initialize_object(&mut self, name: &str) -> Result<&mut Sphere> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.gui.canvas()?;

        if self.spheres.contains_key(name) {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(LookupError::DuplicateName {
                        name: name.to_string(),
                    }
                    .into());
                }
                DuplicatePolicy::Replace => {
                    warn!(sphere = %name, "replacing existing sphere");
                    self.destroy_object(name)?;
                }
            }
        }

        let canvas = self.gui.canvas_mut()?;
        let item = canvas.create_circle(
            self.projection.to_pixel(&self.defaults.position),
            self.projection.radius_to_pixels(self.defaults.radius),
        );
        let mut sphere = Sphere::new(name, item, &self.defaults, self.clock.clone());
        sphere.apply(canvas, &self.projection)?;

        debug!(sphere = %name, item = %item, "sphere initialized");
        self.order.push(name.to_string());
        Ok(self.spheres.entry(name.to_string()).or_insert(sphere))
    }

    /// Snapshot of the named sphere's position and radius.
    pub fn get(&self, name: &str) -> Result<SphereSnapshot> {
        Ok(self.sphere(name)?.snapshot())
    }

    pub fn sphere(&self, name: &str) -> Result<&Sphere> {
        self.gui.canvas()?;
        self.spheres
            .get(name)
            .ok_or_else(|| Error::unknown_object(name))
    }

    pub fn sphere_mut(&mut self, name: &str) -> Result<&mut Sphere> {
        self.gui.canvas()?;
        self.spheres
            .get_mut(name)
            .ok_or_else(|| Error::unknown_object(name))
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> Result<&[String]> {
        self.gui.canvas()?;
        Ok(&self.order)
    }

    /// Spheres in insertion order.
    pub fn iter(&self) -> Result<impl Iterator<Item = (&str, &Sphere)>> {
        self.gui.canvas()?;
        Ok(self
            .order
            .iter()
            .filter_map(move |name| self.spheres.get(name).map(|sphere| (name.as_str(), sphere))))
    }

    pub fn len(&self) -> Result<usize> {
        self.gui.canvas()?;
        Ok(self.order.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        self.gui.canvas()?;
        Ok(self.spheres.contains_key(name))
    }

    /// Name to state view of every sphere, in insertion order.
    pub fn snapshot(&self) -> Result<EnvironmentSnapshot> {
        Ok(self
            .iter()?
            .map(|(name, sphere)| (name.to_string(), sphere.snapshot()))
            .collect())
    }

    /// Removes a sphere and deletes its circle.
    pub fn destroy_object(&mut self, name: &str) -> Result<()> {
        let canvas = self.gui.canvas_mut()?;
        let sphere = self
            .spheres
            .remove(name)
            .ok_or_else(|| Error::unknown_object(name))?;
        self.order.retain(|other| other != name);
        canvas.delete(sphere.item())?;
        debug!(sphere = %name, "sphere destroyed");
        Ok(())
    }

    /// Pushes pending changes to the canvas.
    ///
    /// Geometry and color go first, one sphere at a time. Stacking requests
    /// are then applied in the order they were made, so the latest request
    /// decides which circle ends up on top or bottom.
    pub fn update(&mut self) -> Result<()> {
        let canvas = self.gui.canvas_mut()?;
        let mut flushed = 0usize;
        let mut restacks: Vec<(u64, ItemId, StackDirection)> = Vec::new();

        for name in &self.order {
            let Some(sphere) = self.spheres.get_mut(name) else {
                continue;
            };
            if !sphere.has_pending() {
                continue;
            }
            if sphere.apply(canvas, &self.projection)? {
                flushed += 1;
            }
            if let Some(restack) = sphere.take_restack() {
                restacks.push((restack.ticket, sphere.item(), restack.direction));
            }
        }

        restacks.sort_by_key(|(ticket, _, _)| *ticket);
        let mut restacked = 0usize;
        for (_, item, direction) in restacks {
            let moved = match direction {
                StackDirection::Foreground => canvas.raise(item)?,
                StackDirection::Background => canvas.lower(item)?,
            };
            if moved {
                restacked += 1;
            }
        }

        if flushed > 0 || restacked > 0 {
            debug!(flushed, restacked, revision = canvas.revision(), "canvas updated");
        }
        Ok(())
    }

    /// The color the named sphere is drawn with. Transparent circles read as
    /// alpha 0.0.
    pub fn rendered_color(&self, name: &str) -> Result<Rgba> {
        let sphere = self.sphere(name)?;
        let canvas = self.gui.canvas()?;
        canvas
            .item(sphere.item())
            .map(|item| item.fill.to_rgba())
            .ok_or_else(|| {
                ResourceError::UnknownItem {
                    id: sphere.item().value(),
                }
                .into()
            })
    }

    /// Rasterises the canvas as it currently stands.
    pub fn render(&self) -> Result<RgbImage> {
        render_canvas(self.gui.canvas()?)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        save_png(self.gui.canvas()?, path)
    }

    pub fn is_destroyed(&self) -> bool {
        self.gui.is_destroyed()
    }

    /// Drops every sphere and releases the window. Calling it again only
    /// logs a warning.
    pub fn destroy(&mut self) {
        if self.gui.is_destroyed() {
            warn!(title = %self.gui.title(), "environment already destroyed");
            return;
        }
        info!(spheres = self.order.len(), "destroying environment");
        self.spheres.clear();
        self.order.clear();
        self.gui.destroy();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        if !self.gui.is_destroyed() {
            self.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sphereview_canvas::CanvasColor;

    #[test]
    fn test_new_environment_is_empty() {
        let env = Environment::new();
        assert!(env.is_empty().unwrap());
        assert_eq!(env.gui().dimensions(), (800, 600));
        assert_eq!(env.canvas().unwrap().dimensions(), (600, 600));
        assert_eq!(env.object_properties(), ["position", "radius"]);
    }

    #[test]
    fn test_initialize_object_draws_defaults() {
        let mut env = Environment::new();
        let item = env.initialize_object("sphere").unwrap().item();

        let circle = env.canvas().unwrap().item(item).unwrap();
        assert_eq!(circle.radius, 300.0);
        assert_eq!(circle.fill, CanvasColor::WHITE);
        assert_eq!(circle.outline, CanvasColor::WHITE);
        assert!(!env.sphere("sphere").unwrap().has_pending());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut env = Environment::new();
        assert!(env.initialize_object("").unwrap_err().is_validation_error());
    }

    #[test]
    fn test_unknown_name_is_lookup_error() {
        let mut env = Environment::new();
        assert!(env.get("missing").unwrap_err().is_lookup_error());
        assert!(env.sphere_mut("missing").unwrap_err().is_lookup_error());
        assert!(env.destroy_object("missing").unwrap_err().is_lookup_error());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut env = Environment::new();
        env.initialize_object("sphere").unwrap();
        env.destroy();
        assert!(env.is_destroyed());
        assert!(env.is_empty().unwrap_err().is_resource_error());
        env.destroy();
        assert!(env.is_destroyed());
    }
}
