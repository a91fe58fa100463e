//! Fixed-step frame clock.
//!
//! The camera world is updated once per rendered frame. Drivers that replay
//! a scripted subject path step this clock instead of reading wall time, so
//! a replay at a given frame rate is fully deterministic.

/// A clock that advances in whole frames of `1 / fps` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    fps: f64,
    frame: u64,
}

impl FrameClock {
    /// Create a clock at frame zero. `fps` is clamped to at least 1.
    pub fn new(fps: f64) -> Self {
        Self {
            fps: if fps.is_finite() { fps.max(1.0) } else { 1.0 },
            frame: 0,
        }
    }

    /// Advance by one frame and return the new frame index.
    pub fn tick(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Current frame index.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Duration of one frame in seconds.
    pub fn step_secs(&self) -> f64 {
        1.0 / self.fps
    }

    /// Seconds elapsed at the current frame.
    pub fn elapsed_secs(&self) -> f64 {
        self.frame_to_secs(self.frame)
    }

    /// Convert a frame index to seconds.
    ///
    /// Computed from the index rather than accumulated, so long replays
    /// do not drift.
    pub fn frame_to_secs(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    /// Number of whole frames needed to cover `duration_secs`.
    pub fn frames_for(&self, duration_secs: f64) -> u64 {
        (duration_secs.max(0.0) * self.fps).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_time() {
        let mut clock = FrameClock::new(60.0);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed_secs(), 0.0);

        for _ in 0..60 {
            clock.tick();
        }
        assert_eq!(clock.frame(), 60);
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_fps_is_clamped() {
        assert_eq!(FrameClock::new(0.0).fps(), 1.0);
        assert_eq!(FrameClock::new(f64::NAN).fps(), 1.0);
    }

    #[test]
    fn test_frames_for_duration() {
        let clock = FrameClock::new(30.0);
        assert_eq!(clock.frames_for(2.0), 60);
        assert_eq!(clock.frames_for(-1.0), 0);
    }
}
