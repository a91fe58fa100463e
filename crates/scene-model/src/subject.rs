//! The tracked subject.

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// The actor the camera follows.
///
/// Position and velocity are written by the driver every frame. Velocity is
/// expected to be pre-normalized to `[-1, 1]` per axis by the caller; values
/// outside that range are kept as given and produce a proportionally larger
/// anticipatory offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Subject {
    position: Point2D,
    velocity: Point2D,
    velocity_radius: f64,
}

impl Subject {
    /// Create a subject at rest at the origin.
    ///
    /// `velocity_radius` is how far the camera shifts ahead of the subject
    /// at a normalized velocity of 1.0.
    pub fn new(velocity_radius: f64) -> Self {
        Self {
            position: Point2D::ZERO,
            velocity: Point2D::ZERO,
            velocity_radius,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point2D::new(x, y);
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.velocity = Point2D::new(vx, vy);
    }

    pub fn set_velocity_radius(&mut self, velocity_radius: f64) {
        self.velocity_radius = velocity_radius;
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn velocity(&self) -> Point2D {
        self.velocity
    }

    pub fn velocity_x(&self) -> f64 {
        self.velocity.x
    }

    pub fn velocity_y(&self) -> f64 {
        self.velocity.y
    }

    pub fn velocity_radius(&self) -> f64 {
        self.velocity_radius
    }

    /// Look-at point shifted ahead along the velocity:
    /// `position + velocity * velocity_radius`.
    pub fn anticipated_position(&self) -> Point2D {
        self.position + self.velocity * self.velocity_radius
    }

    /// Whether velocity is inside the normalized `[-1, 1]` range on both axes.
    pub fn velocity_is_normalized(&self) -> bool {
        (-1.0..=1.0).contains(&self.velocity.x) && (-1.0..=1.0).contains(&self.velocity.y)
    }
}
