//! Parametric curves over `u` in `[0, 1]` and the moving frames they carry.

mod bspline;
mod frame;
mod line_segment;
mod offset;
mod trigonometric;

use std::fmt;

use coaster_core::{CoasterError, Result, Tolerance, Validate};
use coaster_math::{Point3, Transform, Vector3};

use crate::arclength::{self, EXTREMUM_SAMPLES, LENGTH_INTERVALS};

pub use bspline::BSplineCurve;
pub use frame::{FrameMode, SpeedModel};
pub use line_segment::LineSegment;
pub use offset::OffsetCurve;
pub use trigonometric::TrigonometricCurve;

/// Number of samples used when validating a curve's frame.
pub const FRAME_CHECK_SAMPLES: usize = 1000;

/// How many derivatives an evaluation should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeOrder {
    Position,
    First,
    Second,
}

impl DerivativeOrder {
    pub fn wants_first(self) -> bool {
        !matches!(self, DerivativeOrder::Position)
    }

    pub fn wants_second(self) -> bool {
        matches!(self, DerivativeOrder::Second)
    }
}

/// Result of a curve evaluation.
///
/// Derivatives are not normalized. Those that were not requested are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurveEval {
    pub position: Point3,
    pub dp_du: Vector3,
    pub d2p_du2: Vector3,
}

/// Orthonormal frame attached to a curve point.
///
/// `w` is the unit tangent, `u` is the side axis and `v` completes the basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Point3,
    pub u: Vector3,
    pub v: Vector3,
    pub w: Vector3,
}

impl Frame {
    /// Build a frame from a tangent and a reference vector that must not be
    /// parallel to it. A parallel reference yields zero side axes.
    pub fn from_tangent(origin: Point3, tangent: Vector3, reference: Vector3) -> Self {
        let w = tangent.normalize_or_zero();
        let u = w.cross(reference).normalize_or_zero();
        let v = u.cross(w).normalize_or_zero();
        Self { origin, u, v, w }
    }

    /// Columns are `(u, w, v, origin)`.
    pub fn to_transform(&self) -> Transform {
        Transform::from_columns(self.u, self.w, self.v, self.origin)
    }

    pub fn from_transform(t: &Transform) -> Self {
        Self {
            origin: t.origin(),
            u: t.column(0),
            w: t.column(1),
            v: t.column(2),
        }
    }
}

/// Panics unless `u` lies in `[0, 1]`.
pub(crate) fn check_parameter(u: f64) {
    assert!((0.0..=1.0).contains(&u), "Curve parameter {} outside [0, 1]", u);
}

/// A parametric curve over `u` in `[0, 1]`.
pub trait Curve: Send + Sync + fmt::Debug {
    /// Evaluate position and the requested derivatives at `u`.
    ///
    /// # Panics
    /// Panics if `u` is outside `[0, 1]`.
    fn evaluate(&self, u: f64, order: DerivativeOrder) -> CurveEval;

    /// Whether `u = 0` and `u = 1` are the same point.
    fn is_closed(&self) -> bool;

    fn frame_mode(&self) -> &FrameMode;

    fn frame_mode_mut(&mut self) -> &mut FrameMode;

    fn point_at(&self, u: f64) -> Point3 {
        self.evaluate(u, DerivativeOrder::Position).position
    }

    fn tangent_at(&self, u: f64) -> Vector3 {
        self.evaluate(u, DerivativeOrder::First).dp_du
    }

    /// Switch the frame to the dynamics-aware reference. Cannot be undone.
    fn enable_dynamic_frame(&mut self, model: SpeedModel) {
        self.frame_mode_mut().enable_dynamic(model);
    }

    /// Moving frame at `u`, decomposed.
    fn frame_axes(&self, u: f64) -> Frame {
        let mode = self.frame_mode();
        let eval = self.evaluate(u, mode.derivative_order());
        Frame::from_tangent(eval.position, eval.dp_du, mode.reference_vector(&eval))
    }

    /// Moving frame at `u` as an affine transform with columns `(vU, vW, vV, p)`.
    fn coordinate_frame(&self, u: f64) -> Transform {
        self.frame_axes(u).to_transform()
    }

    /// `|dp/du|` at `u`.
    fn parametric_speed(&self, u: f64) -> f64 {
        self.tangent_at(u).length()
    }

    /// Total arc length.
    fn length(&self) -> f64 {
        arclength::integrate(|u| self.parametric_speed(u), LENGTH_INTERVALS)
    }

    /// Arc length over `[u, u + du]`. The interval is clamped at `u = 1`.
    fn ds(&self, u: f64, du: f64) -> f64 {
        arclength::simpson_step(|x| self.parametric_speed(x.min(1.0)), u, du)
    }

    /// Highest z coordinate, by sampling.
    fn z_max(&self) -> f64 {
        arclength::sampled_max(|u| self.point_at(u).z, EXTREMUM_SAMPLES)
    }

    /// `n` uniformly spaced points. Closed curves do not repeat the seam point.
    fn polyline(&self, n: usize) -> Vec<Point3> {
        crate::tessellate::sample_polyline(self, n)
    }

    /// Fail if the frame reference vector comes (anti-)parallel to the
    /// tangent anywhere among `n_samples` samples.
    fn check_never_parallel(&self, n_samples: usize) -> Result<()> {
        let mode = self.frame_mode();
        let tol = Tolerance::default();
        let n = n_samples.max(2);
        for i in 0..n {
            let u = i as f64 / (n - 1) as f64;
            let eval = self.evaluate(u, mode.derivative_order());
            let r = mode.reference_vector(&eval);
            let cross = eval.dp_du.cross(r).length();
            if tol.is_parallel(cross, eval.dp_du.length(), r.length()) {
                return Err(CoasterError::DegenerateFrame { u });
            }
        }
        Ok(())
    }
}

impl Validate for dyn Curve + '_ {
    fn validate(&self) -> Result<()> {
        self.check_never_parallel(FRAME_CHECK_SAMPLES)
    }
}
