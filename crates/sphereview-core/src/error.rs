//! Error handling for sphereview
//!
//! Provides error types for every layer of the canvas adapter:
//! - Validation errors (attribute values out of range)
//! - Lookup errors (unknown or duplicate object names)
//! - Resource errors (window/canvas already released, unknown canvas items)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Validation error type
///
/// Raised at the point of assignment when an attribute value is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Radius below zero
    #[error("Radius must be non-negative, got {value}")]
    NegativeRadius {
        /// The rejected radius.
        value: f64,
    },

    /// Radius is NaN or infinite
    #[error("Radius must be finite, got {value}")]
    NonFiniteRadius {
        /// The rejected radius.
        value: f64,
    },

    /// A color component outside [0, 1]
    #[error("Color component '{component}' must lie in [0, 1], got {value}")]
    ColorComponentOutOfRange {
        /// The component name (r, g, b or a).
        component: char,
        /// The rejected value.
        value: f64,
    },

    /// A position coordinate is NaN or infinite
    #[error("Position coordinate '{axis}' must be finite, got {value}")]
    NonFinitePosition {
        /// The axis name (x, y or z).
        axis: char,
        /// The rejected value.
        value: f64,
    },

    /// Object names must not be empty
    #[error("Object name must not be empty")]
    EmptyName,
}

/// Lookup error type
///
/// Raised at access time when a name does not resolve as expected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No object registered under the name
    #[error("Unknown object: {name}")]
    UnknownObject {
        /// The requested name.
        name: String,
    },

    /// An object is already registered under the name
    #[error("Duplicate object name: {name}")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
}

/// Resource error type
///
/// Raised when the window or canvas cannot service a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The window (and its canvas) has already been destroyed
    #[error("Window '{title}' has been destroyed")]
    WindowDestroyed {
        /// Title of the destroyed window.
        title: String,
    },

    /// The canvas holds no item with this id
    #[error("Canvas item {id} does not exist")]
    UnknownItem {
        /// The missing item id.
        id: u64,
    },

    /// The canvas could not allocate a raster surface
    #[error("Cannot allocate a {width}x{height} raster surface")]
    Surface {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Writing an exported image failed
    #[error("Image export failed: {reason}")]
    Export {
        /// The reason reported by the encoder.
        reason: String,
    },
}

/// Main error type for sphereview
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Resource error
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl Error {
    /// Shorthand for an unknown-object lookup failure.
    pub fn unknown_object(name: impl Into<String>) -> Self {
        LookupError::UnknownObject { name: name.into() }.into()
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a lookup error
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }

    /// Check if this is a resource error
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Error::Resource(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::NegativeRadius { value: -0.5 };
        assert_eq!(err.to_string(), "Radius must be non-negative, got -0.5");

        let err = ValidationError::ColorComponentOutOfRange {
            component: 'g',
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "Color component 'g' must lie in [0, 1], got 1.5"
        );
    }

    #[test]
    fn test_lookup_error_display() {
        let err = Error::unknown_object("cursor");
        assert_eq!(err.to_string(), "Unknown object: cursor");
        assert!(err.is_lookup_error());
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ResourceError::WindowDestroyed {
            title: "spheres".to_string(),
        }
        .into();
        assert!(err.is_resource_error());
        assert!(!err.is_validation_error());

        let err: Error = ValidationError::EmptyName.into();
        assert!(err.is_validation_error());
    }
}
