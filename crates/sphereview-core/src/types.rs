//! Value types of the spheres vocabulary.
//!
//! Positions and radii are expressed in normalized coordinates, where each
//! axis spans [-1, +1]. Colors are RGBA floats in [0, 1].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::ValidationError;

/// Three dimensional position in normalized coordinates.
///
/// Only `x` and `y` are drawn; `z` is recorded and reported back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// The environment origin.
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rejects NaN and infinite coordinates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (axis, value) in [('x', self.x), ('y', self.y), ('z', self.z)] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinitePosition { axis, value });
            }
        }
        Ok(())
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// RGBA color with every component in [0, 1].
///
/// Construction validates the components, so a value of this type is always
/// in range. Serialized as a four element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rgba {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Creates a color, rejecting components outside [0, 1].
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Result<Self, ValidationError> {
        for (component, value) in [('r', r), ('g', g), ('b', b), ('a', a)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ColorComponentOutOfRange { component, value });
            }
        }
        Ok(Self { r, g, b, a })
    }

    /// Creates a fully opaque color.
    pub fn opaque(r: f64, g: f64, b: f64) -> Result<Self, ValidationError> {
        Self::new(r, g, b, 1.0)
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    /// Whether the color is drawn at all. Only an alpha of exactly 1.0 is.
    pub fn is_opaque(&self) -> bool {
        self.a == 1.0
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<[f64; 4]> for Rgba {
    type Error = ValidationError;

    fn try_from([r, g, b, a]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(r, g, b, a)
    }
}

impl TryFrom<(f64, f64, f64, f64)> for Rgba {
    type Error = ValidationError;

    fn try_from((r, g, b, a): (f64, f64, f64, f64)) -> Result<Self, Self::Error> {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [f64; 4] {
    fn from(color: Rgba) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Inspection record of one sphere: its position and radius.
///
/// Displays as the JSON object `{"position":{"x":..,"y":..,"z":..},"radius":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereSnapshot {
    pub position: Position,
    pub radius: f64,
}

impl fmt::Display for SphereSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// State of a whole environment: sphere snapshots keyed by name, in
/// insertion order.
///
/// Serializes and displays as a JSON object, `{}` when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentSnapshot {
    entries: Vec<(String, SphereSnapshot)>,
}

impl EnvironmentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, replacing the snapshot of an existing name in place.
    pub fn insert(&mut self, name: impl Into<String>, snapshot: SphereSnapshot) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = snapshot,
            None => self.entries.push((name, snapshot)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SphereSnapshot> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, snapshot)| snapshot)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SphereSnapshot)> {
        self.entries
            .iter()
            .map(|(name, snapshot)| (name.as_str(), snapshot))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SphereSnapshot)> for EnvironmentSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, SphereSnapshot)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, sphere) in iter {
            snapshot.insert(name, sphere);
        }
        snapshot
    }
}

impl Serialize for EnvironmentSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, snapshot) in &self.entries {
            map.serialize_entry(name, snapshot)?;
        }
        map.end()
    }
}

impl fmt::Display for EnvironmentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
