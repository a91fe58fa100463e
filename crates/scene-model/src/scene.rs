//! Scene descriptions: points of interest, subject tuning, and a scripted
//! subject path, stored as JSON.
//!
//! A scene is what a driver needs to stand up a camera world without an
//! engine: it replaces the physics body with a list of timed waypoints.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::point::Point2D;
use crate::poi::{Falloff, PoiError, PointOfInterest};

/// Top-level scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Subject tuning.
    #[serde(default)]
    pub subject: SubjectConfig,

    /// Points of interest, in registration order.
    #[serde(default)]
    pub points: Vec<PointConfig>,

    /// Scripted subject path.
    #[serde(default)]
    pub track: SubjectTrack,
}

/// Subject tuning stored in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Anticipatory offset at full normalized velocity (world units).
    pub velocity_radius: f64,

    /// Speed (world units per second) mapped to a normalized velocity of 1.0.
    /// `None` lets the driver pick a default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            velocity_radius: 30.0,
            max_speed: None,
        }
    }
}

/// Unvalidated point-of-interest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    pub x: f64,
    pub y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    #[serde(default)]
    pub falloff: Falloff,
}

impl PointConfig {
    pub fn new(x: f64, y: f64, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            x,
            y,
            inner_radius,
            outer_radius,
            falloff: Falloff::Linear,
        }
    }

    /// Validate and convert to a [`PointOfInterest`].
    pub fn to_point(&self) -> Result<PointOfInterest, PoiError> {
        Ok(
            PointOfInterest::new(self.x, self.y, self.inner_radius, self.outer_radius)?
                .with_falloff(self.falloff),
        )
    }
}

impl From<&PointOfInterest> for PointConfig {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
            inner_radius: point.inner_radius(),
            outer_radius: point.outer_radius(),
            falloff: point.falloff(),
        }
    }
}

/// A timed position on the subject path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Seconds since the start of the scene.
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub fn new(t: f64, x: f64, y: f64) -> Self {
        Self { t, x, y }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Piecewise-linear subject path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubjectTrack {
    pub waypoints: Vec<Waypoint>,
}

impl SubjectTrack {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Time of the first waypoint.
    pub fn start_secs(&self) -> f64 {
        self.waypoints.first().map_or(0.0, |w| w.t)
    }

    /// Time of the last waypoint.
    pub fn end_secs(&self) -> f64 {
        self.waypoints.last().map_or(0.0, |w| w.t)
    }

    /// Span between first and last waypoint.
    pub fn duration_secs(&self) -> f64 {
        (self.end_secs() - self.start_secs()).max(0.0)
    }

    /// Interpolated position at `t`. Clamps to the end points outside the
    /// track's time range; `None` for an empty track or a NaN time.
    pub fn position_at(&self, t: f64) -> Option<Point2D> {
        if t.is_nan() {
            return None;
        }
        let first = self.waypoints.first()?;
        let last = self.waypoints.last()?;

        if t <= first.t {
            return Some(first.position());
        }
        if t >= last.t {
            return Some(last.position());
        }

        // First waypoint strictly after t; t > first.t so idx >= 1.
        let idx = self.waypoints.partition_point(|w| w.t <= t);
        let a = &self.waypoints[idx - 1];
        let b = &self.waypoints[idx];

        let span = b.t - a.t;
        if span <= 0.0 {
            return Some(b.position());
        }
        Some(Point2D::lerp(&a.position(), &b.position(), (t - a.t) / span))
    }

    /// Highest speed along any segment (world units per second).
    pub fn max_speed(&self) -> f64 {
        self.waypoints
            .windows(2)
            .filter(|pair| pair[1].t > pair[0].t)
            .map(|pair| {
                pair[0].position().distance_to(&pair[1].position()) / (pair[1].t - pair[0].t)
            })
            .fold(0.0, f64::max)
    }

    /// Check that the track can be replayed.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.waypoints.is_empty() {
            return Err(SceneError::InvalidTrack {
                message: "track has no waypoints".to_string(),
            });
        }
        for (i, w) in self.waypoints.iter().enumerate() {
            if !(w.t.is_finite() && w.x.is_finite() && w.y.is_finite()) {
                return Err(SceneError::InvalidTrack {
                    message: format!("waypoint {i} has a non-finite value"),
                });
            }
        }
        if let Some(i) = self.waypoints.windows(2).position(|pair| pair[1].t < pair[0].t) {
            return Err(SceneError::InvalidTrack {
                message: format!("waypoint {} goes back in time", i + 1),
            });
        }
        Ok(())
    }
}

impl SceneDescription {
    /// Parse a scene from JSON.
    pub fn parse(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|source| SceneError::ParseError { source })
    }

    /// Load a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let scene = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            points = scene.points.len(),
            waypoints = scene.track.waypoints.len(),
            "Loaded scene"
        );
        Ok(scene)
    }

    /// Write the scene as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SceneError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| SceneError::ParseError { source })?;
        std::fs::write(path, json).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validated points of interest in file order. The first invalid entry
    /// is reported with its index.
    pub fn build_points(&self) -> Result<Vec<PointOfInterest>, SceneError> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, config)| {
                config
                    .to_point()
                    .map_err(|source| SceneError::InvalidPoint { index, source })
            })
            .collect()
    }

    /// Check subject tuning.
    pub fn validate_subject(&self) -> Result<(), SceneError> {
        if !self.subject.velocity_radius.is_finite() || self.subject.velocity_radius < 0.0 {
            return Err(SceneError::InvalidSubject {
                message: format!(
                    "velocity radius {} must be a finite, non-negative number",
                    self.subject.velocity_radius
                ),
            });
        }
        if let Some(max_speed) = self.subject.max_speed {
            if !max_speed.is_finite() || max_speed <= 0.0 {
                return Err(SceneError::InvalidSubject {
                    message: format!("max speed {max_speed} must be positive"),
                });
            }
        }
        Ok(())
    }

    /// Every problem in the scene, as human-readable messages.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Err(e) = self.validate_subject() {
            issues.push(e.to_string());
        }

        for (index, config) in self.points.iter().enumerate() {
            if let Err(source) = config.to_point() {
                issues.push(SceneError::InvalidPoint { index, source }.to_string());
            }
        }

        if let Err(e) = self.track.validate() {
            issues.push(e.to_string());
        }

        issues
    }

    /// Demo layout: four overlapping zones and a tour through all of them.
    pub fn demo() -> Self {
        Self {
            subject: SubjectConfig {
                velocity_radius: 30.0,
                max_speed: Some(122.0),
            },
            points: vec![
                PointConfig::new(0.0, -50.0, 70.0, 200.0),
                PointConfig::new(500.0, 100.0, 50.0, 250.0),
                PointConfig::new(-30.0, 400.0, 100.0, 140.0),
                PointConfig::new(280.0, 400.0, 60.0, 140.0),
            ],
            track: SubjectTrack::new(vec![
                Waypoint::new(0.0, 0.0, 0.0),
                Waypoint::new(6.0, 600.0, 0.0),
                Waypoint::new(8.0, 500.0, 100.0),
                Waypoint::new(12.0, 280.0, 400.0),
                Waypoint::new(15.0, -30.0, 400.0),
                Waypoint::new(19.0, 0.0, 0.0),
            ]),
        }
    }
}

/// Errors that can occur when working with scenes.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {source}")]
    ParseError { source: serde_json::Error },

    #[error("Invalid point of interest #{index}: {source}")]
    InvalidPoint { index: usize, source: PoiError },

    #[error("Invalid track: {message}")]
    InvalidTrack { message: String },

    #[error("Invalid subject: {message}")]
    InvalidSubject { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_is_valid() {
        let scene = SceneDescription::demo();
        assert!(scene.validate().is_empty());
        assert_eq!(scene.build_points().unwrap().len(), 4);
        assert_eq!(scene.track.duration_secs(), 19.0);
    }

    #[test]
    fn test_demo_track_stays_under_max_speed() {
        let scene = SceneDescription::demo();
        assert!(scene.track.max_speed() <= 122.0);
    }

    #[test]
    fn test_parse_minimal_scene_uses_defaults() {
        let scene = SceneDescription::parse(
            r#"{ "points": [ { "x": 1, "y": 2, "inner_radius": 3, "outer_radius": 4 } ] }"#,
        )
        .unwrap();
        assert_eq!(scene.subject.velocity_radius, 30.0);
        assert_eq!(scene.points[0].falloff, Falloff::Linear);
        assert!(scene.track.is_empty());
    }

    #[test]
    fn test_parse_partial_subject() {
        let scene = SceneDescription::parse(r#"{ "subject": { "max_speed": 80 } }"#).unwrap();
        assert_eq!(scene.subject.velocity_radius, 30.0);
        assert_eq!(scene.subject.max_speed, Some(80.0));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("smoothcam-scene-{}", std::process::id()));
        let path = dir.join("nested").join("scene.json");

        let scene = SceneDescription::demo();
        scene.save(&path).unwrap();
        let loaded = SceneDescription::load(&path).unwrap();
        assert_eq!(loaded, scene);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SceneDescription::load("/definitely/not/here/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::IoError { .. }));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            SceneDescription::parse("{ nope"),
            Err(SceneError::ParseError { .. })
        ));
    }

    #[test]
    fn test_build_points_reports_index() {
        let mut scene = SceneDescription::demo();
        scene.points[2].inner_radius = 500.0;
        match scene.build_points() {
            Err(SceneError::InvalidPoint { index, source }) => {
                assert_eq!(index, 2);
                assert!(matches!(source, PoiError::InvertedRadii { .. }));
            }
            other => panic!("expected InvalidPoint, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut scene = SceneDescription::demo();
        scene.points[0].inner_radius = -1.0;
        scene.points[3].outer_radius = 10.0;
        scene.subject.max_speed = Some(0.0);
        scene.track.waypoints.clear();

        let issues = scene.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues[1].contains("#0"));
        assert!(issues[2].contains("#3"));
    }

    #[test]
    fn test_track_rejects_backwards_time() {
        let track = SubjectTrack::new(vec![
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(2.0, 1.0, 0.0),
            Waypoint::new(1.0, 2.0, 0.0),
        ]);
        let err = track.validate().unwrap_err();
        assert!(err.to_string().contains("waypoint 2"));
    }

    #[test]
    fn test_position_at_interpolates_and_clamps() {
        let track = SubjectTrack::new(vec![
            Waypoint::new(1.0, 0.0, 0.0),
            Waypoint::new(3.0, 100.0, 50.0),
        ]);
        let mid = track.position_at(2.0).unwrap();
        assert!((mid.x - 50.0).abs() < 1e-9);
        assert!((mid.y - 25.0).abs() < 1e-9);

        assert_eq!(track.position_at(0.0), Some(Point2D::new(0.0, 0.0)));
        assert_eq!(track.position_at(10.0), Some(Point2D::new(100.0, 50.0)));
        assert_eq!(SubjectTrack::default().position_at(1.0), None);
    }

    #[test]
    fn test_position_at_nan_time_is_none() {
        let track = SceneDescription::demo().track;
        assert_eq!(track.position_at(f64::NAN), None);
        assert!(track.position_at(f64::INFINITY).is_some());
        assert!(track.position_at(f64::NEG_INFINITY).is_some());
    }

    #[test]
    fn test_position_at_hits_waypoints_exactly() {
        let track = SceneDescription::demo().track;
        for w in &track.waypoints {
            assert_eq!(track.position_at(w.t), Some(w.position()));
        }
    }

    #[test]
    fn test_point_config_round_trips_through_point() {
        let config = PointConfig {
            falloff: Falloff::Smoothstep,
            ..PointConfig::new(5.0, 6.0, 1.0, 2.0)
        };
        let point = config.to_point().unwrap();
        assert_eq!(PointConfig::from(&point), config);
    }
}
