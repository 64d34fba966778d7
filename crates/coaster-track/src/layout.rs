//! Guide curve selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use coaster_core::{CoasterError, Result};
use coaster_geometry::{BSplineCurve, Curve, TrigonometricCurve};
use coaster_io::read_point3s;
use coaster_math::{dvec3, Vector3};
use serde::{Deserialize, Serialize};

use crate::params::TrackParams;

/// Which guide curve a track follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Closed B-spline through the control vertices in
    /// [`TrackParams::control_vertices_path`].
    #[default]
    #[serde(rename = "bspline")]
    BSpline,
    /// Unit circle 0.2 above the ground.
    #[serde(rename = "circle")]
    PlanarCircle,
    /// Trigonometric curve described by the `trig_*` parameters.
    #[serde(rename = "trig")]
    Trig,
}

const TAGS: [(Layout, &str); 3] = [
    (Layout::BSpline, "bspline"),
    (Layout::PlanarCircle, "circle"),
    (Layout::Trig, "trig"),
];

impl Layout {
    /// Every accepted tag, in declaration order.
    pub fn tags() -> impl Iterator<Item = &'static str> {
        TAGS.iter().map(|&(_, tag)| tag)
    }

    pub fn tag(self) -> &'static str {
        TAGS.iter()
            .find(|(layout, _)| *layout == self)
            .map_or("", |&(_, tag)| tag)
    }

    /// Build this layout's guide curve. All layouts use `+z` as the
    /// never-parallel vector.
    pub fn guide_curve(self, params: &TrackParams) -> Result<Box<dyn Curve>> {
        Ok(match self {
            Layout::BSpline => Box::new(bspline_from_csv(
                &params.control_vertices_path,
                true,
                Vector3::Z,
            )?),
            Layout::PlanarCircle => Box::new(planar_circle()),
            Layout::Trig => Box::new(params.trig_curve()),
        })
    }
}

impl FromStr for Layout {
    type Err = CoasterError;

    fn from_str(s: &str) -> Result<Self> {
        TAGS.iter()
            .find(|(_, tag)| *tag == s)
            .map(|&(layout, _)| layout)
            .ok_or_else(|| CoasterError::UnknownLayout(s.to_string()))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// B-spline whose control vertices are read from a CSV file.
pub fn bspline_from_csv(
    path: impl AsRef<Path>,
    closed: bool,
    never_parallel: Vector3,
) -> Result<BSplineCurve> {
    BSplineCurve::new(read_point3s(path)?, closed, never_parallel)
}

/// Circle of radius 1 at height 0.2, traversed counter-clockwise from
/// `(1, 0)`.
pub fn planar_circle() -> TrigonometricCurve {
    TrigonometricCurve::new(
        dvec3(1.0, 1.0, 0.0),
        dvec3(1.0, -1.0, 0.0),
        dvec3(0.0, 0.25, 0.0),
        dvec3(0.0, 0.0, 0.2),
        Vector3::Z,
    )
}
