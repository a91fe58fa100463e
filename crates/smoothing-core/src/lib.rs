//! SmoothCam Core — camera target blending
//!
//! Computes a 2D camera focal point every frame from one moving subject and
//! a set of static points of interest:
//! - **World:** Anticipatory offset plus weighted point-of-interest pull
//! - **Overlay:** Data snapshot for external debug renderers
//! - **Track:** Fixed-step driver that replays a scripted subject path
//!
//! This crate is pure computation — no I/O, no engine dependencies.
//! All inputs are data; all outputs are data.

pub mod overlay;
pub mod track;
pub mod world;

pub use overlay::DebugOverlay;
pub use track::{simulate_track, CameraFrame, SimulationConfig};
pub use world::{BlendSample, SmoothingWorld};
