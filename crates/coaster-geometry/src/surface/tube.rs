//! Circular tube swept along a curve's moving frame.

use std::f64::consts::TAU;
use std::sync::Arc;

use crate::curve::Curve;

use super::{GridSpec, Surface, SurfacePoint};

/// `u` goes around the tube, `v` along the guide curve.
#[derive(Debug, Clone)]
pub struct Tube {
    curve: Arc<dyn Curve>,
    radius: f64,
    n_i: usize,
    n_j: usize,
    closed: bool,
}

impl Tube {
    /// `n_i` sides around, `n_j` rings along. The tube wraps in `j` when
    /// `closed`; it always wraps in `i`.
    pub fn new(curve: Arc<dyn Curve>, radius: f64, n_i: usize, n_j: usize, closed: bool) -> Self {
        debug_assert!(radius > 0.0, "tube radius must be positive, got {}", radius);
        Self {
            curve,
            radius,
            n_i,
            n_j,
            closed,
        }
    }

    pub fn curve(&self) -> &Arc<dyn Curve> {
        &self.curve
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Surface for Tube {
    fn evaluate(&self, u: f64, v: f64) -> SurfacePoint {
        let frame = self.curve.frame_axes(v);
        let (sin, cos) = (TAU * u).sin_cos();
        SurfacePoint {
            position: frame.origin + self.radius * (cos * frame.u + sin * frame.v),
            dp_du: TAU * self.radius * (-sin * frame.u + cos * frame.v),
            dp_dv: frame.w,
        }
    }

    fn grid(&self) -> GridSpec {
        GridSpec::new(self.n_i, self.n_j, true, self.closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{LineSegment, TrigonometricCurve};
    use coaster_math::{dvec3, Point3, Vector3};

    #[test]
    fn test_points_lie_at_radius() {
        let curve: Arc<dyn Curve> = Arc::new(TrigonometricCurve::new(
            dvec3(0.8, 0.8, 0.2),
            dvec3(1.0, 2.0, 3.0),
            dvec3(-0.03, 0.69, 0.0),
            dvec3(0.0, 0.0, 0.4),
            Vector3::Z,
        ));
        let tube = Tube::new(curve.clone(), 0.05, 12, 40, true);
        let grid = tube.grid();
        for j in 0..grid.n_j {
            let v = grid.v_at(j);
            let center = curve.point_at(v);
            for i in 0..grid.n_i {
                let p = tube.point_at(grid.u_at(i), v);
                assert!(((p - center).length() - 0.05).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_normals_point_outward() {
        let seg: Arc<dyn Curve> = Arc::new(LineSegment::new(Point3::ZERO, Vector3::Z, Vector3::X));
        let tube = Tube::new(seg, 0.1, 8, 2, false);
        for &u in &[0.0, 0.125, 0.4, 0.9] {
            let sp = tube.evaluate(u, 0.5);
            let radial = (sp.position - dvec3(0.0, 0.0, 0.5)).normalize();
            assert!((sp.normal() - radial).length() < 1e-12, "u={}", u);
        }
    }

    #[test]
    fn test_grid_wraps_around() {
        let seg: Arc<dyn Curve> = Arc::new(LineSegment::new(Point3::ZERO, Vector3::Z, Vector3::X));
        let g = Tube::new(seg, 0.1, 8, 2, false).grid();
        assert!(g.wrap_i);
        assert!(!g.wrap_j);
    }
}
