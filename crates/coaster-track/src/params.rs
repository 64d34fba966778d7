//! Track design parameters.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use coaster_core::{CoasterError, Result, Validate};
use coaster_geometry::TrigonometricCurve;
use coaster_math::{dvec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Scene length units in one metre.
pub const LENGTH_UNITS_PER_METER: f64 = 0.1;

/// Standard gravity in scene length units per second squared.
pub const GRAV_ACCEL: f64 = 9.80665 * LENGTH_UNITS_PER_METER;

/// Every tunable constant of the track. Missing JSON fields take their
/// [`Default`] values.
///
/// # Example
///
/// ```
/// use coaster_track::TrackParams;
///
/// let params = TrackParams::from_json_str(r#"{ "support_count": 20 }"#).unwrap();
/// assert_eq!(params.support_count, 20);
/// assert_eq!(params.n_theta, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackParams {
    /// Radius of every rail, tie and support tube.
    pub radius: f64,
    pub rail_separation: f64,
    pub approx_rail_segment_length: f64,
    pub approx_tie_separation: f64,
    pub rail_segments_per_tie: usize,
    pub support_count: usize,
    /// Sides of every tube.
    pub n_theta: usize,
    /// Rings along the tallest support.
    pub max_support_rows: usize,
    pub tie_rows: usize,

    pub trig_magnitude: Vector3,
    pub trig_frequency: Vector3,
    pub trig_phase: Vector3,
    pub trig_offset: Point3,

    /// Speed at the highest point of the guide curve.
    pub speed_at_top: f64,
    pub grav_accel: f64,

    /// CSV of control vertices for the B-spline layout.
    pub control_vertices_path: PathBuf,
}

impl Default for TrackParams {
    fn default() -> Self {
        let radius = 0.005;
        let rail_separation = 10.0 * radius;
        let trig_magnitude = dvec3(0.8, 0.8, 0.2);
        Self {
            radius,
            rail_separation,
            approx_rail_segment_length: 0.04,
            approx_tie_separation: rail_separation,
            rail_segments_per_tie: 4,
            support_count: 15,
            n_theta: 12,
            max_support_rows: 10,
            tie_rows: 4,
            trig_magnitude,
            trig_frequency: dvec3(1.0, 2.0, 3.0),
            trig_phase: dvec3(-0.03, 0.69, 0.0),
            trig_offset: dvec3(0.0, 0.0, trig_magnitude.z + 0.2),
            speed_at_top: 4.0 * LENGTH_UNITS_PER_METER,
            grav_accel: GRAV_ACCEL,
            control_vertices_path: PathBuf::from("track_bspline_cvs.csv"),
        }
    }
}

impl TrackParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = coaster_io::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Height used to scale support tessellation: the top of the
    /// trigonometric layout's range.
    pub fn max_support_height(&self) -> f64 {
        2.0 * self.trig_magnitude.z + self.trig_offset.z
    }

    /// Guide curve of the trigonometric layout.
    pub fn trig_curve(&self) -> TrigonometricCurve {
        TrigonometricCurve::new(
            self.trig_magnitude,
            self.trig_frequency,
            self.trig_phase,
            self.trig_offset,
            Vector3::Z,
        )
    }
}

impl Validate for TrackParams {
    fn validate(&self) -> Result<()> {
        let positive = [
            ("radius", self.radius),
            ("rail_separation", self.rail_separation),
            ("approx_rail_segment_length", self.approx_rail_segment_length),
            ("approx_tie_separation", self.approx_tie_separation),
            ("grav_accel", self.grav_accel),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(CoasterError::InvalidOperation(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
        if self.speed_at_top < 0.0 {
            return Err(CoasterError::InvalidOperation(format!(
                "speed_at_top must not be negative, got {}",
                self.speed_at_top
            )));
        }
        if self.n_theta < 3 {
            return Err(CoasterError::InvalidOperation(format!(
                "tubes need at least 3 sides, got {}",
                self.n_theta
            )));
        }
        if self.rail_segments_per_tie == 0 || self.support_count == 0 || self.tie_rows < 2 {
            return Err(CoasterError::InvalidOperation(
                "rail_segments_per_tie and support_count must be nonzero, tie_rows at least 2"
                    .into(),
            ));
        }
        Ok(())
    }
}
