//! Fixed-step replay of a scripted subject path.
//!
//! Stands in for the embedding application's frame loop: every frame it
//! writes the subject's position and normalized velocity, calls
//! [`SmoothingWorld::update`], and records the resulting target.

use serde::Serialize;
use smoothcam_common::{FrameClock, SimulationDefaults, SmoothCamError, SmoothCamResult};
use smoothcam_scene::{Point2D, SubjectTrack};

use crate::world::SmoothingWorld;

/// Longest replay the driver will run, in frames (about 4.6 hours at 60 fps).
pub const MAX_FRAMES: u64 = 1_000_000;

/// Driver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Frames per second. Must be at least 1.
    pub fps: f64,

    /// Speed mapped to a normalized velocity of 1.0. `None` uses the
    /// track's own peak segment speed.
    pub max_speed: Option<f64>,

    /// How long to run from the first waypoint. `None` runs to the last
    /// waypoint; longer runs hold the subject at the end of the track.
    pub duration_secs: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_speed: None,
            ..Self::from_defaults(&SimulationDefaults::default())
        }
    }
}

impl SimulationConfig {
    /// Config seeded from application defaults.
    pub fn from_defaults(defaults: &SimulationDefaults) -> Self {
        Self {
            fps: f64::from(defaults.fps),
            max_speed: Some(defaults.max_speed),
            duration_secs: None,
        }
    }

    fn validate(&self) -> SmoothCamResult<()> {
        if !self.fps.is_finite() || self.fps < 1.0 {
            return Err(SmoothCamError::simulation(format!(
                "fps must be at least 1, got {}",
                self.fps
            )));
        }
        if let Some(max_speed) = self.max_speed {
            if !max_speed.is_finite() || max_speed <= 0.0 {
                return Err(SmoothCamError::simulation(format!(
                    "max speed must be positive, got {max_speed}"
                )));
            }
        }
        if let Some(duration) = self.duration_secs {
            if !duration.is_finite() || duration < 0.0 {
                return Err(SmoothCamError::simulation(format!(
                    "duration must be a non-negative number of seconds, got {duration}"
                )));
            }
        }
        Ok(())
    }
}

/// One simulated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraFrame {
    pub frame: u64,
    pub time_secs: f64,
    /// Subject position written this frame.
    pub subject: Point2D,
    /// Normalized velocity written this frame.
    pub velocity: Point2D,
    /// Camera target produced by the update.
    pub target: Point2D,
    pub total_weight: f64,
}

/// Replay `track` through `world`, one update per frame, including both
/// the first and the last frame.
pub fn simulate_track(
    world: &mut SmoothingWorld,
    track: &SubjectTrack,
    config: &SimulationConfig,
) -> SmoothCamResult<Vec<CameraFrame>> {
    config.validate()?;
    track
        .validate()
        .map_err(|e| SmoothCamError::simulation(e.to_string()))?;

    let max_speed = config.max_speed.unwrap_or_else(|| {
        let peak = track.max_speed();
        if peak > 0.0 {
            peak
        } else {
            1.0
        }
    });

    let mut clock = FrameClock::new(config.fps);
    let start = track.start_secs();
    let duration = config.duration_secs.unwrap_or_else(|| track.duration_secs());
    if duration * clock.fps() > MAX_FRAMES as f64 {
        return Err(SmoothCamError::simulation(format!(
            "{duration} s at {} fps exceeds the limit of {MAX_FRAMES} frames",
            clock.fps()
        )));
    }
    let total_frames = clock.frames_for(duration);
    let velocity_scale = 1.0 / (clock.step_secs() * max_speed);

    let mut previous = track
        .position_at(start)
        .ok_or_else(|| SmoothCamError::simulation("track has no waypoints"))?;
    let mut frames = Vec::with_capacity(total_frames as usize + 1);

    loop {
        let time_secs = start + clock.elapsed_secs();
        let position = track.position_at(time_secs).unwrap_or(previous);
        let velocity = (position - previous) * velocity_scale;

        let subject = world.subject_mut();
        subject.set_position(position.x, position.y);
        subject.set_velocity(velocity.x, velocity.y);
        let target = world.update();
        let total_weight = world.last_blend().map_or(0.0, |b| b.total_weight);

        frames.push(CameraFrame {
            frame: clock.frame(),
            time_secs,
            subject: position,
            velocity,
            target,
            total_weight,
        });

        previous = position;
        if clock.frame() >= total_frames {
            break;
        }
        clock.tick();
    }

    tracing::debug!(
        frames = frames.len(),
        fps = clock.fps(),
        max_speed,
        max_target_step = max_target_step(&frames),
        "Simulated track"
    );

    Ok(frames)
}

/// Largest distance the target moved between two consecutive frames.
pub fn max_target_step(frames: &[CameraFrame]) -> f64 {
    frames
        .windows(2)
        .map(|pair| pair[0].target.distance_to(&pair[1].target))
        .fold(0.0, f64::max)
}

/// Serialize frames as JSON Lines.
pub fn frames_to_jsonl(frames: &[CameraFrame]) -> serde_json::Result<String> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
