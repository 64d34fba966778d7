use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut min = first;
        let mut max = first;
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Uniformly scale and translate `points` so they fit inside `target`,
/// centred on it.
///
/// The scale is the smallest per-axis ratio of half-extents, so the aspect
/// ratio is preserved. Axes with zero extent are ignored; if every axis is
/// flat (all points identical) the points are only translated.
pub fn fit_points_in_box(points: &mut [Point3], target: &Aabb3) {
    let Some(bounds) = Aabb3::from_points(points) else {
        return;
    };
    let p_ctr = bounds.center();
    let q_ctr = target.center();
    let dp = bounds.max - p_ctr;
    let dq = target.max - q_ctr;

    let scale = (0..3)
        .filter(|&d| dp[d] > 0.0)
        .map(|d| dq[d] / dp[d])
        .reduce(f64::min)
        .unwrap_or(1.0);

    for p in points.iter_mut() {
        *p = scale * (*p - p_ctr) + q_ctr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_from_points() {
        let pts = vec![dvec3(1.0, 2.0, 3.0), dvec3(-1.0, 5.0, 0.0), dvec3(3.0, -1.0, 2.0)];
        let aabb = Aabb3::from_points(&pts).unwrap();
        assert_eq!(aabb.min, dvec3(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, dvec3(3.0, 5.0, 3.0));
    }

    #[test]
    fn test_from_no_points() {
        assert!(Aabb3::from_points(&[]).is_none());
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 1.0, 1.0));
        assert!(aabb.contains_point(dvec3(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(dvec3(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        let mut pts = vec![dvec3(0.0, 0.0, 0.0), dvec3(4.0, 2.0, 0.0)];
        let target = Aabb3::new(dvec3(-1.0, -1.0, -1.0), dvec3(1.0, 1.0, 1.0));
        fit_points_in_box(&mut pts, &target);
        // x is the limiting axis: half extent 2 -> 1
        assert!((pts[0] - dvec3(-1.0, -0.5, 0.0)).length() < 1e-12);
        assert!((pts[1] - dvec3(1.0, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_fit_identical_points_translates_only() {
        let mut pts = vec![dvec3(5.0, 5.0, 5.0); 3];
        let target = Aabb3::new(dvec3(-1.0, -1.0, -1.0), dvec3(1.0, 1.0, 1.0));
        fit_points_in_box(&mut pts, &target);
        for p in &pts {
            assert!(p.length() < 1e-12);
        }
    }
}
