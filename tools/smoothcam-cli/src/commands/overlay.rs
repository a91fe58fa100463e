//! Print the debug overlay snapshot at a point in time.

use std::path::PathBuf;

use smoothcam_common::SimulationDefaults;
use smoothcam_core::track::{simulate_track, SimulationConfig};
use smoothcam_core::{DebugOverlay, SmoothingWorld};

pub fn run(path: PathBuf, defaults: &SimulationDefaults, time: f64) -> anyhow::Result<()> {
    let scene = super::load_scene(&path)?;
    let mut world = SmoothingWorld::from_scene(&scene)?;

    // Replay up to `time` so the velocity, and with it the target, match a
    // live run at that moment.
    let config = SimulationConfig {
        max_speed: scene.subject.max_speed.or(Some(defaults.max_speed)),
        duration_secs: Some(time),
        ..SimulationConfig::from_defaults(defaults)
    };
    simulate_track(&mut world, &scene.track, &config)?;

    let overlay = DebugOverlay::capture(&world);
    println!("{}", overlay.to_json()?);

    Ok(())
}
