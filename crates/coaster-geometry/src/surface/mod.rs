//! Biparametric surfaces sampled on rectangular grids.

mod bezier_patch;
mod tube;

use std::fmt;

use coaster_math::{Point3, Vector3};

pub use bezier_patch::{planar_patch, BezierPatch};
pub use tube::Tube;

/// Position and partial derivatives at `(u, v)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfacePoint {
    pub position: Point3,
    pub dp_du: Vector3,
    pub dp_dv: Vector3,
}

impl SurfacePoint {
    /// Unit normal `dp_dv x dp_du`, or zero where the partials are parallel.
    pub fn normal(&self) -> Vector3 {
        self.dp_dv.cross(self.dp_du).normalize_or_zero()
    }
}

/// Sampling resolution and topology of a surface grid.
///
/// `i` runs along `u` and varies fastest; `j` runs along `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub n_i: usize,
    pub n_j: usize,
    pub wrap_i: bool,
    pub wrap_j: bool,
}

impl GridSpec {
    pub fn new(n_i: usize, n_j: usize, wrap_i: bool, wrap_j: bool) -> Self {
        Self {
            n_i,
            n_j,
            wrap_i,
            wrap_j,
        }
    }

    /// Parameter of sample `i`. A wrapped direction stops one step short of
    /// 1 so the seam is not sampled twice. A direction with a single open
    /// sample returns 0.
    pub fn u_at(&self, i: usize) -> f64 {
        sample_parameter(i, self.n_i, self.wrap_i)
    }

    pub fn v_at(&self, j: usize) -> f64 {
        sample_parameter(j, self.n_j, self.wrap_j)
    }

    pub fn vertex_count(&self) -> usize {
        self.n_i * self.n_j
    }
}

/// A single open sample, or an empty direction, sits at parameter 0.
fn sample_parameter(k: usize, n: usize, wrap: bool) -> f64 {
    let divisions = (n + usize::from(wrap)).saturating_sub(1);
    if divisions == 0 {
        return 0.0;
    }
    k as f64 / divisions as f64
}

/// A parametric surface over `(u, v)` in `[0, 1]^2`.
pub trait Surface: Send + Sync + fmt::Debug {
    fn evaluate(&self, u: f64, v: f64) -> SurfacePoint;

    /// Resolution and wrapping used when tessellating.
    fn grid(&self) -> GridSpec;

    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.evaluate(u, v).position
    }

    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        self.evaluate(u, v).normal()
    }
}
