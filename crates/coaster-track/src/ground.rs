//! Flat ground the supports stand on.

use coaster_geometry::{planar_patch, BezierPatch};
use coaster_math::{dvec3, Vector3};
use serde::{Deserialize, Serialize};

/// Square ground plane `[-extent, extent]^2` at a constant height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    extent: f64,
    level: f64,
}

impl Ground {
    /// Ground at height zero.
    pub fn new(extent: f64) -> Self {
        Self::with_level(extent, 0.0)
    }

    pub fn with_level(extent: f64, level: f64) -> Self {
        Self { extent, level }
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Ground height below `(x, y)`.
    pub fn height(&self, _x: f64, _y: f64) -> f64 {
        self.level
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x.abs() <= self.extent && y.abs() <= self.extent
    }

    /// The ground as a flat patch facing up, sampled `n x n`.
    pub fn surface(&self, n: usize) -> BezierPatch {
        let e = self.extent;
        // swapped edges make dp_dv x dp_du point along +z
        planar_patch(dvec3(-e, -e, self.level), 2.0 * e * Vector3::Y, 2.0 * e * Vector3::X, n, n)
    }
}

impl Default for Ground {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_geometry::Surface;

    #[test]
    fn test_flat_height() {
        let ground = Ground::with_level(2.0, -0.1);
        assert_eq!(ground.height(0.3, -1.7), -0.1);
        assert!(ground.contains(-2.0, 1.5));
        assert!(!ground.contains(2.5, 0.0));
    }

    #[test]
    fn test_surface_faces_up() {
        let ground = Ground::new(1.5);
        let patch = ground.surface(4);
        assert!((patch.normal_at(0.4, 0.7) - Vector3::Z).length() < 1e-12);
        assert!((patch.point_at(0.0, 0.0) - dvec3(-1.5, -1.5, 0.0)).length() < 1e-12);
        assert!((patch.point_at(1.0, 1.0) - dvec3(1.5, 1.5, 0.0)).length() < 1e-12);
    }
}
