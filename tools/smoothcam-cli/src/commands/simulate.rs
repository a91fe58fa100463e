//! Replay a scene's track through the camera world.

use std::path::PathBuf;

use smoothcam_common::SimulationDefaults;
use smoothcam_core::track::{frames_to_jsonl, max_target_step, simulate_track, SimulationConfig};
use smoothcam_core::SmoothingWorld;

/// Command-line overrides for a simulation run.
pub struct SimulateOptions {
    pub fps: Option<u32>,
    pub max_speed: Option<f64>,
    pub duration: Option<f64>,
    pub jsonl: bool,
    pub every: usize,
    pub output: Option<PathBuf>,
}

pub fn run(
    path: PathBuf,
    defaults: &SimulationDefaults,
    options: SimulateOptions,
) -> anyhow::Result<()> {
    let scene = super::load_scene(&path)?;
    let mut world = SmoothingWorld::from_scene(&scene)?;

    let config = SimulationConfig {
        fps: f64::from(options.fps.unwrap_or(defaults.fps)),
        max_speed: options
            .max_speed
            .or(scene.subject.max_speed)
            .or(Some(defaults.max_speed)),
        duration_secs: options.duration,
    };
    tracing::debug!(?config, "Starting simulation");

    let frames = simulate_track(&mut world, &scene.track, &config)?;

    if let Some(output) = &options.output {
        std::fs::write(output, frames_to_jsonl(&frames)?)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;
        tracing::info!(path = %output.display(), frames = frames.len(), "Wrote frames");
    }

    if options.jsonl {
        print!("{}", frames_to_jsonl(&frames)?);
        return Ok(());
    }

    println!(
        "{:>6} {:>8} {:>10} {:>10} {:>7} {:>7} {:>10} {:>10} {:>7}",
        "frame", "time", "subj_x", "subj_y", "vel_x", "vel_y", "target_x", "target_y", "weight"
    );
    let every = options.every.max(1);
    let last_index = frames.len().saturating_sub(1);
    for (i, f) in frames.iter().enumerate() {
        if i % every != 0 && i != last_index {
            continue;
        }
        println!(
            "{:>6} {:>8.3} {:>10.2} {:>10.2} {:>7.3} {:>7.3} {:>10.2} {:>10.2} {:>7.3}",
            f.frame,
            f.time_secs,
            f.subject.x,
            f.subject.y,
            f.velocity.x,
            f.velocity.y,
            f.target.x,
            f.target.y,
            f.total_weight
        );
    }

    println!();
    println!("Simulated {} frames at {} fps", frames.len(), config.fps);
    println!("  Max target step: {:.3}", max_target_step(&frames));

    Ok(())
}
