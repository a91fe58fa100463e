//! Points of interest: static zones that pull the camera toward them.
//!
//! A point of interest has full influence within its inner radius, no
//! influence beyond its outer radius, and a falloff curve in between.

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// Shape of the influence falloff between inner and outer radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// Weight drops linearly with distance.
    #[default]
    Linear,
    /// Hermite `t²(3 − 2t)` curve: flat at both edges of the band.
    Smoothstep,
}

impl Falloff {
    /// Map the normalized band position `t` (1.0 at inner, 0.0 at outer)
    /// to a weight.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Falloff::Linear => t,
            Falloff::Smoothstep => (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0),
        }
    }
}

/// Invalid point-of-interest configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoiError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("inner radius {inner} must not be negative")]
    NegativeInnerRadius { inner: f64 },

    #[error("inner radius {inner} must be smaller than outer radius {outer}")]
    InvertedRadii { inner: f64, outer: f64 },
}

/// A static influence zone.
///
/// Radii always satisfy `0 <= inner_radius < outer_radius`; every
/// constructor and setter checks this and returns [`PoiError`] instead of
/// clamping. A failed setter leaves the point unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPointOfInterest")]
pub struct PointOfInterest {
    position: Point2D,
    inner_radius: f64,
    outer_radius: f64,
    falloff: Falloff,
}

/// Unvalidated serialized form; deserialization goes through
/// [`PointOfInterest::new`].
#[derive(Deserialize)]
struct RawPointOfInterest {
    position: Point2D,
    inner_radius: f64,
    outer_radius: f64,
    #[serde(default)]
    falloff: Falloff,
}

impl TryFrom<RawPointOfInterest> for PointOfInterest {
    type Error = PoiError;

    fn try_from(raw: RawPointOfInterest) -> Result<Self, Self::Error> {
        Ok(PointOfInterest::new(
            raw.position.x,
            raw.position.y,
            raw.inner_radius,
            raw.outer_radius,
        )?
        .with_falloff(raw.falloff))
    }
}

impl PointOfInterest {
    /// Create a point of interest at `(x, y)` with linear falloff.
    pub fn new(x: f64, y: f64, inner_radius: f64, outer_radius: f64) -> Result<Self, PoiError> {
        let position = check_position(x, y)?;
        check_radii(inner_radius, outer_radius)?;
        Ok(Self {
            position,
            inner_radius,
            outer_radius,
            falloff: Falloff::Linear,
        })
    }

    /// Replace the falloff curve.
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn set_position(&mut self, x: f64, y: f64) -> Result<(), PoiError> {
        self.position = check_position(x, y)?;
        Ok(())
    }

    /// Change the inner radius, keeping the current outer radius.
    pub fn set_inner_radius(&mut self, inner_radius: f64) -> Result<(), PoiError> {
        check_radii(inner_radius, self.outer_radius)?;
        self.inner_radius = inner_radius;
        Ok(())
    }

    /// Change the outer radius, keeping the current inner radius.
    pub fn set_outer_radius(&mut self, outer_radius: f64) -> Result<(), PoiError> {
        check_radii(self.inner_radius, outer_radius)?;
        self.outer_radius = outer_radius;
        Ok(())
    }

    /// Change both radii at once.
    ///
    /// Use this when moving the band past its current bounds, where
    /// setting either radius alone would pass through an invalid state.
    pub fn set_radii(&mut self, inner_radius: f64, outer_radius: f64) -> Result<(), PoiError> {
        check_radii(inner_radius, outer_radius)?;
        self.inner_radius = inner_radius;
        self.outer_radius = outer_radius;
        Ok(())
    }

    pub fn set_falloff(&mut self, falloff: Falloff) {
        self.falloff = falloff;
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

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn falloff(&self) -> Falloff {
        self.falloff
    }

    /// Influence in `[0, 1]` on a subject at `subject_position`.
    pub fn weight(&self, subject_position: Point2D) -> f64 {
        self.weight_at_distance(self.position.distance_to(&subject_position))
    }

    /// Influence in `[0, 1]` at `distance` from the centre.
    pub fn weight_at_distance(&self, distance: f64) -> f64 {
        if distance <= self.inner_radius {
            1.0
        } else if distance >= self.outer_radius {
            0.0
        } else if distance.is_nan() {
            0.0
        } else {
            let t = (self.outer_radius - distance) / (self.outer_radius - self.inner_radius);
            self.falloff.apply(t)
        }
    }

    /// Whether a subject at `subject_position` is inside the outer radius.
    pub fn influences(&self, subject_position: Point2D) -> bool {
        self.weight(subject_position) > 0.0
    }
}

fn check_position(x: f64, y: f64) -> Result<Point2D, PoiError> {
    if !x.is_finite() {
        return Err(PoiError::NonFinite { field: "x" });
    }
    if !y.is_finite() {
        return Err(PoiError::NonFinite { field: "y" });
    }
    Ok(Point2D::new(x, y))
}

fn check_radii(inner: f64, outer: f64) -> Result<(), PoiError> {
    if !inner.is_finite() {
        return Err(PoiError::NonFinite {
            field: "inner_radius",
        });
    }
    if !outer.is_finite() {
        return Err(PoiError::NonFinite {
            field: "outer_radius",
        });
    }
    if inner < 0.0 {
        return Err(PoiError::NegativeInnerRadius { inner });
    }
    if inner >= outer {
        return Err(PoiError::InvertedRadii { inner, outer });
    }
    Ok(())
}
