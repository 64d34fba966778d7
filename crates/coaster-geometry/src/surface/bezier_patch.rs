//! Bicubic Bezier patch.

use coaster_math::{Point3, Vector3};

use super::{GridSpec, Surface, SurfacePoint};
use crate::basis::Basis;
use crate::curve::DerivativeOrder;

/// Tensor-product Bezier patch over a 4x4 control grid.
///
/// `control_points[i][j]` is blended with the `i`-th weight in `u` and the
/// `j`-th weight in `v`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPatch {
    pub control_points: [[Point3; 4]; 4],
    n_i: usize,
    n_j: usize,
}

impl BezierPatch {
    pub fn new(control_points: [[Point3; 4]; 4], n_i: usize, n_j: usize) -> Self {
        Self {
            control_points,
            n_i,
            n_j,
        }
    }
}

impl Surface for BezierPatch {
    fn evaluate(&self, u: f64, v: f64) -> SurfacePoint {
        let bu = Basis::Bezier.evaluate(u, DerivativeOrder::First);
        let bv = Basis::Bezier.evaluate(v, DerivativeOrder::First);

        let mut sp = SurfacePoint::default();
        for (i, row) in self.control_points.iter().enumerate() {
            for (j, &cv) in row.iter().enumerate() {
                sp.position += cv * (bu.values[i] * bv.values[j]);
                sp.dp_du += cv * (bu.first[i] * bv.values[j]);
                sp.dp_dv += cv * (bu.values[i] * bv.first[j]);
            }
        }
        sp
    }

    fn grid(&self) -> GridSpec {
        GridSpec::new(self.n_i, self.n_j, false, false)
    }
}

/// Flat patch spanning `origin + a*edge_u + b*edge_v` for `a, b` in `[0, 1]`,
/// with evenly spaced control points.
pub fn planar_patch(origin: Point3, edge_u: Vector3, edge_v: Vector3, n_i: usize, n_j: usize) -> BezierPatch {
    let cvs = std::array::from_fn(|i| {
        std::array::from_fn(|j| origin + edge_u * (i as f64 / 3.0) + edge_v * (j as f64 / 3.0))
    });
    BezierPatch::new(cvs, n_i, n_j)
}
