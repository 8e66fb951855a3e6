//! # sphereview Environment
//!
//! A spheres environment whose objects are drawn as circles on a 2D canvas.
//! Positions and radii are given in normalized coordinates; the z
//! coordinate is stored but never drawn.
//!
//! ## Usage
//!
//! ```rust
//! use sphereview_environment::Environment;
//!
//! let mut environment = Environment::new();
//! let sphere = environment.initialize_object("cursor").unwrap();
//! sphere.set_rgba(0.0, 0.0, 1.0, 1.0).unwrap();
//! sphere.set_position((-0.25, 0.25, 1.0)).unwrap();
//! sphere.set_radius(0.1).unwrap();
//! environment.update().unwrap();
//!
//! let snapshot = environment.get("cursor").unwrap();
//! assert_eq!(snapshot.radius, 0.1);
//! assert_eq!(snapshot.position.z, 1.0);
//! ```

pub mod environment;
pub mod gui;
pub mod sphere;

pub use environment::Environment;
pub use gui::Gui;
pub use sphere::{ShapeSync, Sphere, StackDirection};
