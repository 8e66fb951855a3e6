//! # sphereview Core
//!
//! Core types and error handling shared by every sphereview crate.
//! Provides the value types of the spheres vocabulary (positions, colors,
//! snapshots) and the error taxonomy surfaced to callers.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, LookupError, ResourceError, Result, ValidationError};
pub use types::{EnvironmentSnapshot, Position, Rgba, SphereSnapshot};
