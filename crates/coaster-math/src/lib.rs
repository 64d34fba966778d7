pub mod aabb;
pub mod transform;
pub mod triangle;

pub use glam::{dvec2, dvec3, DMat4, DVec2, DVec3, DVec4};
pub use aabb::{fit_points_in_box, Aabb3};
pub use transform::Transform;
pub use triangle::{face_normal, triangle_centroid};

/// Points and vectors share a representation; the distinction is in how a
/// [`Transform`] treats them (points receive translation, vectors do not).
pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
