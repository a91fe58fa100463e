//! The smoothing world: per-frame camera target blending.
//!
//! # Algorithm
//!
//! 1. **Anticipate:** `base = position + velocity * velocity_radius`, so the
//!    camera leads the subject in its direction of travel.
//! 2. **Weigh:** every point of interest is weighted by its distance to the
//!    subject's *actual* position (not the anticipated one).
//! 3. **Centroid:** the pulled point is the weight-normalized centroid of all
//!    influencing points, so overlapping zones blend instead of competing.
//! 4. **Blend:** `target = base * (1 - b) + pulled * b` with
//!    `b = clamp(total_weight, 0, 1)`. With nothing in range the target is
//!    exactly `base`.
//!
//! Weights are accumulated in registration order, so repeated updates over
//! the same state are bit-identical. Reordering points changes the result
//! only by floating-point rounding.

use serde::Serialize;
use smoothcam_common::{SmoothCamError, SmoothCamResult};
use smoothcam_scene::{Point2D, PointOfInterest, SceneDescription, Subject};

/// Intermediate values of the last [`SmoothingWorld::update`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlendSample {
    /// Anticipated look-at point before any point-of-interest pull.
    pub base: Point2D,
    /// Weighted centroid of influencing points; `None` when nothing is in range.
    pub pulled: Option<Point2D>,
    /// Sum of all point weights (may exceed 1 where zones overlap).
    pub total_weight: f64,
    /// `total_weight` clamped to `[0, 1]`.
    pub blend: f64,
    /// Final camera target.
    pub target: Point2D,
}

/// Tracks one subject against a set of points of interest.
#[derive(Debug, Clone)]
pub struct SmoothingWorld {
    subject: Subject,
    points: Vec<PointOfInterest>,
    target: Point2D,
    last_blend: Option<BlendSample>,
}

impl SmoothingWorld {
    /// Create a world tracking `subject` with no points of interest.
    ///
    /// The target reads `(0, 0)` until the first [`update`](Self::update).
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            points: Vec::new(),
            target: Point2D::ZERO,
            last_blend: None,
        }
    }

    /// Build a world from a scene's subject tuning and points of interest.
    pub fn from_scene(scene: &SceneDescription) -> SmoothCamResult<Self> {
        scene
            .validate_subject()
            .map_err(|e| SmoothCamError::scene(e.to_string()))?;
        let points = scene
            .build_points()
            .map_err(|e| SmoothCamError::scene(e.to_string()))?;

        let mut world = Self::new(Subject::new(scene.subject.velocity_radius));
        for point in points {
            world.add_point(point);
        }
        Ok(world)
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Mutable access for the driver to write position and velocity.
    pub fn subject_mut(&mut self) -> &mut Subject {
        &mut self.subject
    }

    /// Registered points, in registration order.
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// Register a point of interest and return its index.
    pub fn add_point(&mut self, point: PointOfInterest) -> usize {
        tracing::debug!(
            x = point.x(),
            y = point.y(),
            inner = point.inner_radius(),
            outer = point.outer_radius(),
            "Registered point of interest"
        );
        self.points.push(point);
        self.points.len() - 1
    }

    /// Remove the point at `index`. Later points shift down by one.
    pub fn remove_point(&mut self, index: usize) -> Option<PointOfInterest> {
        if index >= self.points.len() {
            return None;
        }
        let point = self.points.remove(index);
        tracing::debug!(index, remaining = self.points.len(), "Removed point of interest");
        Some(point)
    }

    pub fn clear_points(&mut self) {
        let cleared = self.points.len();
        self.points.clear();
        tracing::debug!(cleared, "Cleared points of interest");
    }

    /// Current weight of every point against the subject position, in
    /// registration order.
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        let position = self.subject.position();
        self.points.iter().map(move |p| p.weight(position))
    }

    /// Recompute the camera target from the current subject state.
    pub fn update(&mut self) -> Point2D {
        let position = self.subject.position();
        let base = self.subject.anticipated_position();

        let mut total_weight = 0.0;
        let mut weighted_sum = Point2D::ZERO;
        for point in &self.points {
            let weight = point.weight(position);
            if weight > 0.0 {
                total_weight += weight;
                weighted_sum = weighted_sum + point.position() * weight;
            }
        }

        let (pulled, blend, target) = if total_weight > 0.0 {
            let pulled = Point2D::new(
                weighted_sum.x / total_weight,
                weighted_sum.y / total_weight,
            );
            let blend = total_weight.clamp(0.0, 1.0);
            let target = base * (1.0 - blend) + pulled * blend;
            (Some(pulled), blend, target)
        } else {
            (None, 0.0, base)
        };

        tracing::trace!(
            base_x = base.x,
            base_y = base.y,
            total_weight,
            target_x = target.x,
            target_y = target.y,
            "Updated camera target"
        );

        self.target = target;
        self.last_blend = Some(BlendSample {
            base,
            pulled,
            total_weight,
            blend,
            target,
        });
        target
    }

    /// Last computed target; `(0, 0)` before the first update.
    pub fn target(&self) -> Point2D {
        self.target
    }

    pub fn x(&self) -> f64 {
        self.target.x
    }

    pub fn y(&self) -> f64 {
        self.target.y
    }

    /// Diagnostics of the last update, if any.
    pub fn last_blend(&self) -> Option<&BlendSample> {
        self.last_blend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_at(x: f64, y: f64, vx: f64, vy: f64, velocity_radius: f64) -> SmoothingWorld {
        let mut subject = Subject::new(velocity_radius);
        subject.set_position(x, y);
        subject.set_velocity(vx, vy);
        SmoothingWorld::new(subject)
    }

    #[test]
    fn test_target_is_zero_before_first_update() {
        let world = world_at(40.0, 40.0, 1.0, 0.0, 30.0);
        assert_eq!(world.target(), Point2D::ZERO);
        assert!(world.last_blend().is_none());
    }

    #[test]
    fn test_anticipatory_only_without_points() {
        let mut world = world_at(100.0, 100.0, 1.0, 0.0, 30.0);
        let target = world.update();
        assert_eq!(target, Point2D::new(130.0, 100.0));
        assert_eq!(world.x(), 130.0);
        assert_eq!(world.y(), 100.0);

        let blend = world.last_blend().unwrap();
        assert_eq!(blend.total_weight, 0.0);
        assert!(blend.pulled.is_none());
    }

    #[test]
    fn test_out_of_range_points_leave_base_untouched() {
        let mut world = world_at(100.0, 100.0, 1.0, 0.0, 30.0);
        world.add_point(PointOfInterest::new(1_000.0, 1_000.0, 50.0, 100.0).unwrap());
        assert_eq!(world.update(), Point2D::new(130.0, 100.0));
    }

    #[test]
    fn test_full_capture_ignores_velocity() {
        let mut world = world_at(210.0, -50.0, 0.8, -0.6, 30.0);
        world.add_point(PointOfInterest::new(200.0, -50.0, 50.0, 120.0).unwrap());
        assert_eq!(world.update(), Point2D::new(200.0, -50.0));
    }

    #[test]
    fn test_equal_weights_pull_to_midpoint() {
        let mut world = world_at(50.0, 0.0, 0.0, 0.0, 30.0);
        world.add_point(PointOfInterest::new(0.0, 0.0, 0.0, 100.0).unwrap());
        world.add_point(PointOfInterest::new(100.0, 0.0, 0.0, 100.0).unwrap());

        let target = world.update();
        let blend = world.last_blend().unwrap();
        let pulled = blend.pulled.unwrap();
        assert!((pulled.x - 50.0).abs() < 1e-9);
        assert!(pulled.y.abs() < 1e-9);
        assert!((blend.total_weight - 1.0).abs() < 1e-9);
        assert!((target.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_weight_blends_between_base_and_point() {
        // Single point at weight 0.5: target halfway between base and point.
        let mut world = world_at(50.0, 0.0, 0.0, 1.0, 20.0);
        world.add_point(PointOfInterest::new(0.0, 0.0, 0.0, 100.0).unwrap());

        let target = world.update();
        // base = (50, 20), pulled = (0, 0), blend = 0.5
        assert!((target.x - 25.0).abs() < 1e-9);
        assert!((target.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_use_actual_position_not_anticipated() {
        // Anticipated point lands inside the zone, the subject does not.
        let mut world = world_at(0.0, 0.0, 1.0, 0.0, 200.0);
        world.add_point(PointOfInterest::new(200.0, 0.0, 10.0, 50.0).unwrap());
        assert_eq!(world.update(), Point2D::new(200.0, 0.0));
        assert_eq!(world.last_blend().unwrap().total_weight, 0.0);
    }

    #[test]
    fn test_overlap_above_one_is_clamped() {
        let mut world = world_at(0.0, 0.0, 1.0, 1.0, 30.0);
        world.add_point(PointOfInterest::new(-10.0, 0.0, 50.0, 100.0).unwrap());
        world.add_point(PointOfInterest::new(10.0, 0.0, 50.0, 100.0).unwrap());

        let target = world.update();
        let blend = world.last_blend().unwrap();
        assert_eq!(blend.total_weight, 2.0);
        assert_eq!(blend.blend, 1.0);
        assert_eq!(target, Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_update_is_repeatable() {
        let mut world = world_at(37.5, -12.25, 0.3, -0.9, 30.0);
        world.add_point(PointOfInterest::new(0.0, -50.0, 70.0, 200.0).unwrap());
        world.add_point(PointOfInterest::new(60.0, 10.0, 5.0, 90.0).unwrap());

        let first = world.update();
        let second = world.update();
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
    }

    #[test]
    fn test_remove_and_clear_points() {
        let mut world = world_at(0.0, 0.0, 0.0, 0.0, 30.0);
        let a = world.add_point(PointOfInterest::new(0.0, 0.0, 10.0, 20.0).unwrap());
        let b = world.add_point(PointOfInterest::new(5.0, 0.0, 10.0, 20.0).unwrap());
        assert_eq!((a, b), (0, 1));

        let removed = world.remove_point(a).unwrap();
        assert_eq!(removed.x(), 0.0);
        assert_eq!(world.points().len(), 1);
        assert_eq!(world.points()[0].x(), 5.0);
        assert!(world.remove_point(7).is_none());

        world.clear_points();
        assert!(world.points().is_empty());
        assert_eq!(world.weights().count(), 0);
        assert_eq!(world.update(), Point2D::ZERO);
        assert_eq!(world.last_blend().unwrap().total_weight, 0.0);

        world.clear_points();
        assert!(world.points().is_empty());
    }

    #[test]
    fn test_weights_follow_registration_order() {
        let mut world = world_at(0.0, 0.0, 0.0, 0.0, 30.0);
        world.add_point(PointOfInterest::new(0.0, 0.0, 10.0, 20.0).unwrap());
        world.add_point(PointOfInterest::new(500.0, 0.0, 10.0, 20.0).unwrap());
        let weights: Vec<f64> = world.weights().collect();
        assert_eq!(weights, vec![1.0, 0.0]);
    }

    #[test]
    fn test_from_scene_rejects_invalid_point() {
        let mut scene = SceneDescription::demo();
        scene.points[1].outer_radius = 1.0;
        let err = SmoothingWorld::from_scene(&scene).unwrap_err();
        assert!(matches!(err, SmoothCamError::Scene { .. }));
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn test_from_scene_registers_points_in_order() {
        let world = SmoothingWorld::from_scene(&SceneDescription::demo()).unwrap();
        assert_eq!(world.points().len(), 4);
        assert_eq!(world.points()[1].position(), Point2D::new(500.0, 100.0));
        assert_eq!(world.subject().velocity_radius(), 30.0);
    }
}
