//! sphereview Settings Crate
//!
//! Handles window, canvas and sphere default configuration, with JSON and
//! TOML persistence.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, DuplicatePolicy, SphereDefaults, WindowSettings};
pub use error::{SettingsError, SettingsResult};
