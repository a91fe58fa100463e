//! SmoothCam Common Utilities
//!
//! Shared infrastructure for all SmoothCam crates:
//! - Error types and result aliases
//! - Fixed-step frame clock for driving the camera world
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
