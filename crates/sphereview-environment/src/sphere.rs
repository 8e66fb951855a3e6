//! Sphere wrapper around a canvas circle.
//!
//! A sphere caches its attributes in normalized units and records which of
//! them changed. Nothing reaches the canvas until the owning environment
//! flushes the sphere through [`ShapeSync::apply`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use sphereview_canvas::{Canvas, CanvasColor, ItemId, Projection};
use sphereview_core::constants::OBJECT_PROPERTIES;
use sphereview_core::{Position, Result, Rgba, SphereSnapshot, ValidationError};
use sphereview_settings::SphereDefaults;
use tracing::debug;

/// Pushes cached attribute changes to the backing canvas shape.
pub trait ShapeSync {
    /// Whether any change is waiting for the next flush.
    fn has_pending(&self) -> bool;

    /// Writes pending geometry and color to the canvas.
    ///
    /// Returns whether the canvas changed. Stacking requests are not applied
    /// here; the environment orders them across all shapes.
    fn apply(&mut self, canvas: &mut Canvas, projection: &Projection) -> Result<bool>;
}

/// Direction of a stacking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackDirection {
    Foreground,
    Background,
}

/// A pending stacking request stamped with its position in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Restack {
    pub(crate) ticket: u64,
    pub(crate) direction: StackDirection,
}

/// Monotonic counter shared by the spheres of one environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct RestackClock(Rc<Cell<u64>>);

impl RestackClock {
    fn next(&self) -> u64 {
        let ticket = self.0.get() + 1;
        self.0.set(ticket);
        ticket
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    position: bool,
    radius: bool,
    color: bool,
}

impl Pending {
    fn all() -> Self {
        Self {
            position: true,
            radius: true,
            color: true,
        }
    }

    fn any(&self) -> bool {
        self.position || self.radius || self.color
    }
}

/// One environment object, drawn as a circle.
#[derive(Debug)]
pub struct Sphere {
    name: String,
    item: ItemId,
    position: Position,
    radius: f64,
    color: Rgba,
    pending: Pending,
    restack: Option<Restack>,
    clock: RestackClock,
}

impl Sphere {
    /// Wraps a freshly created canvas item. Every attribute starts pending so
    /// the first flush brings the item in line with the defaults.
    pub(crate) fn new(
        name: impl Into<String>,
        item: ItemId,
        defaults: &SphereDefaults,
        clock: RestackClock,
    ) -> Self {
        Self {
            name: name.into(),
            item,
            position: defaults.position,
            radius: defaults.radius,
            color: defaults.color,
            pending: Pending::all(),
            restack: None,
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing canvas item.
    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Sets the position. Every coordinate must be finite; z is kept but
    /// never drawn.
    pub fn set_position(&mut self, position: impl Into<Position>) -> Result<()> {
        let position = position.into();
        position.validate()?;
        self.position = position;
        self.pending.position = true;
        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        if !radius.is_finite() {
            return Err(ValidationError::NonFiniteRadius { value: radius }.into());
        }
        if radius < 0.0 {
            return Err(ValidationError::NegativeRadius { value: radius }.into());
        }
        self.radius = radius;
        self.pending.radius = true;
        Ok(())
    }

    /// The color as last set, not as drawn.
    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
        self.pending.color = true;
    }

    /// Sets the color from raw components, each of which must lie in [0, 1].
    pub fn set_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) -> Result<()> {
        self.set_color(Rgba::new(r, g, b, a)?);
        Ok(())
    }

    /// Requests that the circle be drawn above every other sphere.
    pub fn to_foreground(&mut self) {
        self.request_restack(StackDirection::Foreground);
    }

    /// Requests that the circle be drawn below every other sphere.
    pub fn to_background(&mut self) {
        self.request_restack(StackDirection::Background);
    }

    /// The pending stacking request, if any.
    pub fn pending_restack(&self) -> Option<StackDirection> {
        self.restack.map(|restack| restack.direction)
    }

    pub fn snapshot(&self) -> SphereSnapshot {
        SphereSnapshot {
            position: self.position,
            radius: self.radius,
        }
    }

    /// Names of the properties reported by [`Sphere::snapshot`].
    pub fn object_properties() -> &'static [&'static str] {
        &OBJECT_PROPERTIES
    }

    pub(crate) fn take_restack(&mut self) -> Option<Restack> {
        self.restack.take()
    }

    fn request_restack(&mut self, direction: StackDirection) {
        let ticket = self.clock.next();
        debug!(sphere = %self.name, ?direction, ticket, "restack requested");
        self.restack = Some(Restack { ticket, direction });
    }
}

impl ShapeSync for Sphere {
    fn has_pending(&self) -> bool {
        self.pending.any() || self.restack.is_some()
    }

    fn apply(&mut self, canvas: &mut Canvas, projection: &Projection) -> Result<bool> {
        let mut changed = false;

        if self.pending.position {
            changed |= canvas.move_to(self.item, projection.to_pixel(&self.position))?;
            self.pending.position = false;
        }

        if self.pending.radius {
            changed |= canvas.set_radius(self.item, projection.radius_to_pixels(self.radius))?;
            self.pending.radius = false;
        }

        if self.pending.color {
            changed |= canvas.set_color(self.item, CanvasColor::from_rgba(&self.color))?;
            self.pending.color = false;
        }

        if changed {
            debug!(
                sphere = %self.name,
                position = %self.position,
                radius = self.radius,
                color = %self.color,
                "sphere flushed"
            );
        }
        Ok(changed)
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}
