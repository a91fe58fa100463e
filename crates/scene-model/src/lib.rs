//! SmoothCam Scene Model
//!
//! Defines the data contracts consumed by the camera world:
//! - **Point2D:** World-space coordinates and vectors
//! - **PointOfInterest:** Static influence zones with inner/outer radii
//! - **Subject:** The tracked actor (position, normalized velocity)
//! - **Scene:** Serializable scene descriptions used by drivers
//!
//! Coordinates are plain world units; nothing here assumes a screen or
//! a physics engine.

pub mod point;
pub mod poi;
pub mod scene;
pub mod subject;

pub use point::*;
pub use poi::*;
pub use scene::*;
pub use subject::*;
