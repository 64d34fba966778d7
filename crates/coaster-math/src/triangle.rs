use crate::{Point3, Vector3};

/// Unit normal of the counter-clockwise triangle `(p0, p1, p2)`.
///
/// Returns the zero vector for a degenerate triangle.
pub fn face_normal(p0: Point3, p1: Point3, p2: Point3) -> Vector3 {
    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}

pub fn triangle_centroid(p0: Point3, p1: Point3, p2: Point3) -> Point3 {
    (p0 + p1 + p2) / 3.0
}
