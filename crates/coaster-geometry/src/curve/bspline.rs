//! Uniform cubic B-spline curve.

use coaster_core::{CoasterError, Result};
use coaster_math::{Point3, Vector3};

use super::{check_parameter, Curve, CurveEval, DerivativeOrder, FrameMode};
use crate::basis::{Basis, BasisWeights};

/// A uniform cubic B-spline through a sequence of control vertices.
///
/// A closed spline has one span per control vertex and wraps its indices.
/// An open one has `n - 3` spans and does not interpolate its end vertices.
#[derive(Debug, Clone)]
pub struct BSplineCurve {
    control_vertices: Vec<Point3>,
    closed: bool,
    frame: FrameMode,
}

impl BSplineCurve {
    pub const MIN_CONTROL_VERTICES: usize = 4;

    pub fn new(control_vertices: Vec<Point3>, closed: bool, never_parallel: Vector3) -> Result<Self> {
        if control_vertices.len() < Self::MIN_CONTROL_VERTICES {
            return Err(CoasterError::Geometry(format!(
                "B-spline needs at least {} control vertices, got {}",
                Self::MIN_CONTROL_VERTICES,
                control_vertices.len()
            )));
        }
        Ok(Self {
            control_vertices,
            closed,
            frame: FrameMode::fixed(never_parallel),
        })
    }

    pub fn control_vertices(&self) -> &[Point3] {
        &self.control_vertices
    }

    pub fn knot_count(&self) -> usize {
        let n = self.control_vertices.len();
        if self.closed {
            n
        } else {
            n - 3
        }
    }

    /// Span index and local parameter for `u`.
    fn span(&self, u: f64) -> (usize, f64) {
        let n_knot = self.knot_count();
        let t = n_knot as f64 * u;
        let i_knot = t.floor() as usize;
        if i_knot >= n_knot {
            // u == 1 lands one past the last span
            (n_knot - 1, 1.0)
        } else {
            (i_knot, t - i_knot as f64)
        }
    }

    fn window(&self, i_knot: usize) -> [Point3; 4] {
        let n = self.control_vertices.len();
        std::array::from_fn(|i| {
            let j = if self.closed { (i_knot + i) % n } else { i_knot + i };
            self.control_vertices[j]
        })
    }
}

impl Curve for BSplineCurve {
    fn evaluate(&self, u: f64, order: DerivativeOrder) -> CurveEval {
        check_parameter(u);
        let (i_knot, t) = self.span(u);
        let cvs = self.window(i_knot);
        let w = Basis::UniformCubicBSpline.evaluate(t, order);
        let scale = self.knot_count() as f64;
        let mut eval = CurveEval {
            position: BasisWeights::blend(&w.values, cvs),
            ..Default::default()
        };
        if order.wants_first() {
            eval.dp_du = BasisWeights::blend(&w.first, cvs) * scale;
        }
        if order.wants_second() {
            eval.d2p_du2 = BasisWeights::blend(&w.second, cvs) * (scale * scale);
        }
        eval
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn frame_mode(&self) -> &FrameMode {
        &self.frame
    }

    fn frame_mode_mut(&mut self) -> &mut FrameMode {
        &mut self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_math::dvec3;

    fn square(closed: bool) -> BSplineCurve {
        BSplineCurve::new(
            vec![
                dvec3(1.0, 0.0, 0.2),
                dvec3(1.0, 1.0, 0.4),
                dvec3(0.0, 1.0, 0.3),
                dvec3(-1.0, 1.0, 0.2),
                dvec3(-1.0, 0.0, 0.5),
                dvec3(0.0, -1.0, 0.2),
            ],
            closed,
            Vector3::Z,
        )
        .unwrap()
    }

    #[test]
    fn test_too_few_control_vertices() {
        let result = BSplineCurve::new(vec![Point3::ZERO; 3], true, Vector3::Z);
        assert!(matches!(result, Err(CoasterError::Geometry(_))));
    }

    #[test]
    fn test_knot_count() {
        assert_eq!(square(true).knot_count(), 6);
        assert_eq!(square(false).knot_count(), 3);
    }

    #[test]
    fn test_end_parameter_is_continuous() {
        for closed in [true, false] {
            let curve = square(closed);
            let end = curve.evaluate(1.0, DerivativeOrder::Second);
            let near = curve.evaluate(1.0 - 1e-9, DerivativeOrder::Second);
            assert!((end.position - near.position).length() < 1e-6);
            assert!((end.dp_du - near.dp_du).length() < 1e-5);
        }
    }

    #[test]
    fn test_closed_seam() {
        let curve = square(true);
        let a = curve.evaluate(0.0, DerivativeOrder::Second);
        let b = curve.evaluate(1.0, DerivativeOrder::Second);
        assert!((a.position - b.position).length() < 1e-12);
        assert!((a.dp_du - b.dp_du).length() < 1e-9);
        assert!((a.d2p_du2 - b.d2p_du2).length() < 1e-9);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let curve = square(true);
        let h = 1e-6;
        // stay inside spans so the second derivative is smooth
        for &u in &[0.07, 0.25, 0.58, 0.93] {
            let e = curve.evaluate(u, DerivativeOrder::Second);
            let lo = curve.evaluate(u - h, DerivativeOrder::First);
            let hi = curve.evaluate(u + h, DerivativeOrder::First);
            let d1 = (hi.position - lo.position) / (2.0 * h);
            let d2 = (hi.dp_du - lo.dp_du) / (2.0 * h);
            assert!((d1 - e.dp_du).length() < 1e-4 * e.dp_du.length(), "u={}", u);
            assert!((d2 - e.d2p_du2).length() < 1e-4 * e.d2p_du2.length(), "u={}", u);
        }
    }

    #[test]
    fn test_collinear_vertices_give_a_line() {
        let cvs = (0..5).map(|i| dvec3(i as f64, 0.0, 0.0)).collect();
        let curve = BSplineCurve::new(cvs, false, Vector3::Z).unwrap();
        // open uniform spline over 0..4 runs from 1 to 3
        assert!((curve.point_at(0.0) - dvec3(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!((curve.point_at(1.0) - dvec3(3.0, 0.0, 0.0)).length() < 1e-12);
        assert!((curve.length() - 2.0).abs() < 1e-9);
    }
}
