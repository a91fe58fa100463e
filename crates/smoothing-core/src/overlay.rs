//! Debug overlay snapshots.
//!
//! Collects what a debug renderer needs to draw influence rings, the
//! subject, and the camera target, without this crate knowing anything
//! about rendering.

use serde::Serialize;
use smoothcam_scene::{Falloff, Point2D};

use crate::world::SmoothingWorld;

/// Which edge of an influence band a circle marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingKind {
    Inner,
    Outer,
}

/// One circle to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayCircle {
    pub center: Point2D,
    pub radius: f64,
    pub ring: RingKind,
    /// Current weight of the owning point, for tinting.
    pub weight: f64,
}

/// A point of interest as seen at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub center: Point2D,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub falloff: Falloff,
    pub weight: f64,
}

/// Snapshot of a world for overlay drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugOverlay {
    pub subject: Point2D,
    pub velocity: Point2D,
    /// Anticipated look-at point.
    pub base: Point2D,
    /// Last computed camera target.
    pub target: Point2D,
    pub total_weight: f64,
    pub points: Vec<OverlayPoint>,
}

impl DebugOverlay {
    /// Capture the world's current state.
    ///
    /// `target` is whatever the last `update()` produced; weights are
    /// evaluated against the current subject position.
    pub fn capture(world: &SmoothingWorld) -> Self {
        let subject = world.subject();
        let points: Vec<OverlayPoint> = world
            .points()
            .iter()
            .zip(world.weights())
            .map(|(p, weight)| OverlayPoint {
                center: p.position(),
                inner_radius: p.inner_radius(),
                outer_radius: p.outer_radius(),
                falloff: p.falloff(),
                weight,
            })
            .collect();

        Self {
            subject: subject.position(),
            velocity: subject.velocity(),
            base: subject.anticipated_position(),
            target: world.target(),
            total_weight: points.iter().map(|p| p.weight).sum(),
            points,
        }
    }

    /// Inner and outer ring for every point, inner first.
    pub fn circles(&self) -> Vec<OverlayCircle> {
        self.points
            .iter()
            .flat_map(|p| {
                [
                    OverlayCircle {
                        center: p.center,
                        radius: p.inner_radius,
                        ring: RingKind::Inner,
                        weight: p.weight,
                    },
                    OverlayCircle {
                        center: p.center,
                        radius: p.outer_radius,
                        ring: RingKind::Outer,
                        weight: p.weight,
                    },
                ]
            })
            .collect()
    }

    /// Points currently pulling on the camera.
    pub fn active_points(&self) -> impl Iterator<Item = &OverlayPoint> {
        self.points.iter().filter(|p| p.weight > 0.0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
