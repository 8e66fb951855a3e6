//! Canvas state managing circle items and their stacking order.

use std::collections::HashMap;

use sphereview_core::{ResourceError, Result};
use tracing::trace;

use crate::color::CanvasColor;
use crate::item::{CircleItem, ItemId};
use crate::projection::PixelPoint;

/// A retained-mode drawing surface.
///
/// Items are stored by id; `stacking` holds the ids back to front. Every
/// mutation that changes what would be drawn bumps `revision`, so callers can
/// tell whether anything visible happened between two points in time.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: CanvasColor,
    outline_width: f32,
    items: HashMap<ItemId, CircleItem>,
    stacking: Vec<ItemId>,
    next_id: u64,
    revision: u64,
}

impl Canvas {
    /// Creates an empty canvas with a black background.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: CanvasColor::BLACK,
            outline_width: 1.0,
            items: HashMap::new(),
            stacking: Vec::new(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Gets the canvas dimensions (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resizes the canvas. Items keep their pixel geometry.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.touch();
        }
    }

    pub fn background(&self) -> CanvasColor {
        self.background
    }

    pub fn set_background(&mut self, color: CanvasColor) {
        if color != self.background {
            self.background = color;
            self.touch();
        }
    }

    /// Outline stroke width in pixels.
    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    pub fn set_outline_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if width != self.outline_width {
            self.outline_width = width;
            self.touch();
        }
    }

    /// Counter of visible mutations since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the number of items on the canvas.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Creates a circle on top of every existing item.
    pub fn create_circle(&mut self, center: PixelPoint, radius: f64) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, CircleItem::new(center, radius));
        self.stacking.push(id);
        self.touch();
        trace!(item = %id, x = center.x, y = center.y, radius, "circle created");
        id
    }

    /// Removes an item, returning its last state.
    pub fn delete(&mut self, id: ItemId) -> Result<CircleItem> {
        let item = self
            .items
            .remove(&id)
            .ok_or(ResourceError::UnknownItem { id: id.0 })?;
        self.stacking.retain(|other| *other != id);
        self.touch();
        trace!(item = %id, "circle deleted");
        Ok(item)
    }

    /// Gets a reference to an item by id.
    pub fn item(&self, id: ItemId) -> Option<&CircleItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Item ids from back to front.
    pub fn stacking_order(&self) -> &[ItemId] {
        &self.stacking
    }

    /// Items from back to front.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &CircleItem)> {
        self.stacking
            .iter()
            .filter_map(move |id| self.items.get(id).map(|item| (*id, item)))
    }

    /// Topmost item containing the pixel position.
    pub fn item_at(&self, point: PixelPoint) -> Option<ItemId> {
        self.stacking
            .iter()
            .rev()
            .find(|id| self.items.get(id).is_some_and(|item| item.contains(point)))
            .copied()
    }

    /// Moves the circle center. Returns whether anything changed.
    pub fn move_to(&mut self, id: ItemId, center: PixelPoint) -> Result<bool> {
        let item = self.item_mut(id)?;
        if item.center == center {
            return Ok(false);
        }
        item.center = center;
        self.touch();
        trace!(item = %id, x = center.x, y = center.y, "circle moved");
        Ok(true)
    }

    /// Sets the circle radius in pixels. Returns whether anything changed.
    pub fn set_radius(&mut self, id: ItemId, radius: f64) -> Result<bool> {
        let item = self.item_mut(id)?;
        if item.radius == radius {
            return Ok(false);
        }
        item.radius = radius;
        self.touch();
        trace!(item = %id, radius, "circle resized");
        Ok(true)
    }

    pub fn set_fill(&mut self, id: ItemId, color: CanvasColor) -> Result<bool> {
        let item = self.item_mut(id)?;
        if item.fill == color {
            return Ok(false);
        }
        item.fill = color;
        self.touch();
        trace!(item = %id, fill = %color, "circle fill changed");
        Ok(true)
    }

    pub fn set_outline(&mut self, id: ItemId, color: CanvasColor) -> Result<bool> {
        let item = self.item_mut(id)?;
        if item.outline == color {
            return Ok(false);
        }
        item.outline = color;
        self.touch();
        trace!(item = %id, outline = %color, "circle outline changed");
        Ok(true)
    }

    /// Sets fill and outline together.
    pub fn set_color(&mut self, id: ItemId, color: CanvasColor) -> Result<bool> {
        let fill = self.set_fill(id, color)?;
        let outline = self.set_outline(id, color)?;
        Ok(fill || outline)
    }

    /// Moves an item above every other item.
    pub fn raise(&mut self, id: ItemId) -> Result<bool> {
        let index = self.stacking_index(id)?;
        if index + 1 == self.stacking.len() {
            return Ok(false);
        }
        self.stacking.remove(index);
        self.stacking.push(id);
        self.touch();
        trace!(item = %id, "circle raised");
        Ok(true)
    }

    /// Moves an item below every other item.
    pub fn lower(&mut self, id: ItemId) -> Result<bool> {
        let index = self.stacking_index(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.stacking.remove(index);
        self.stacking.insert(0, id);
        self.touch();
        trace!(item = %id, "circle lowered");
        Ok(true)
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.stacking.clear();
            self.touch();
        }
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut CircleItem> {
        Ok(self
            .items
            .get_mut(&id)
            .ok_or(ResourceError::UnknownItem { id: id.0 })?)
    }

    fn stacking_index(&self, id: ItemId) -> Result<usize> {
        Ok(self
            .stacking
            .iter()
            .position(|other| *other == id)
            .ok_or(ResourceError::UnknownItem { id: id.0 })?)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(600, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_items_stack_on_top() {
        let mut canvas = Canvas::new(100, 100);
        let a = canvas.create_circle(PixelPoint::new(10.0, 10.0), 5.0);
        let b = canvas.create_circle(PixelPoint::new(20.0, 20.0), 5.0);
        assert_eq!(canvas.stacking_order(), &[a, b]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_raise_and_lower() {
        let mut canvas = Canvas::new(100, 100);
        let a = canvas.create_circle(PixelPoint::new(50.0, 50.0), 10.0);
        let b = canvas.create_circle(PixelPoint::new(50.0, 50.0), 10.0);

        assert_eq!(canvas.item_at(PixelPoint::new(50.0, 50.0)), Some(b));
        assert!(canvas.raise(a).unwrap());
        assert_eq!(canvas.item_at(PixelPoint::new(50.0, 50.0)), Some(a));
        assert!(!canvas.raise(a).unwrap());
        assert!(canvas.lower(a).unwrap());
        assert_eq!(canvas.stacking_order(), &[a, b]);
    }

    #[test]
    fn test_unchanged_values_do_not_bump_revision() {
        let mut canvas = Canvas::new(100, 100);
        let id = canvas.create_circle(PixelPoint::new(1.0, 1.0), 1.0);
        let revision = canvas.revision();

        assert!(!canvas.move_to(id, PixelPoint::new(1.0, 1.0)).unwrap());
        assert!(!canvas.set_radius(id, 1.0).unwrap());
        assert!(!canvas.set_color(id, CanvasColor::BLACK).unwrap());
        assert_eq!(canvas.revision(), revision);

        assert!(canvas.set_radius(id, 2.0).unwrap());
        assert_eq!(canvas.revision(), revision + 1);
    }

    #[test]
    fn test_unknown_item() {
        let mut canvas = Canvas::new(100, 100);
        let id = canvas.create_circle(PixelPoint::new(1.0, 1.0), 1.0);
        canvas.delete(id).unwrap();

        let err = canvas.set_radius(id, 3.0).unwrap_err();
        assert!(err.is_resource_error());
        assert!(canvas.delete(id).is_err());
        assert!(canvas.is_empty());
    }
}
