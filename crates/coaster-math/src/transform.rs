use std::ops::Mul;

use coaster_core::EPSILON;
use serde::{Deserialize, Serialize};

use crate::{DMat4, Point3, Vector3};

/// 4x4 affine transform. The last row is always `(0, 0, 0, 1)`.
///
/// Mutating operations (`rotate`, `scale`, `translate`) right-multiply, so
/// the most recently applied operation acts on points first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    matrix: DMat4,
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self { matrix: m }
    }

    /// Build a transform from three axis columns and an origin.
    ///
    /// Coordinate frames pass their axes as `(vU, vW, vV)`, so a local
    /// point `(a, b, c)` maps to `origin + a*vU + b*vW + c*vV`.
    pub fn from_columns(c0: Vector3, c1: Vector3, c2: Vector3, origin: Point3) -> Self {
        Self::from_mat4(DMat4::from_cols(
            c0.extend(0.0),
            c1.extend(0.0),
            c2.extend(0.0),
            origin.extend(1.0),
        ))
    }

    pub fn to_mat4(&self) -> DMat4 {
        self.matrix
    }

    /// Column `i` (0..3) as a vector, dropping the homogeneous component.
    pub fn column(&self, i: usize) -> Vector3 {
        self.matrix.col(i).truncate()
    }

    /// Translation column.
    pub fn origin(&self) -> Point3 {
        self.column(3)
    }

    /// Apply to a point (linear part plus translation).
    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.matrix.transform_point3(p)
    }

    /// Apply to a vector (linear part only).
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.matrix.transform_vector3(v)
    }

    /// `self` followed by `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        *other * *self
    }

    /// Rotate by `angle` radians around `axis`.
    pub fn rotate(&mut self, angle: f64, axis: Vector3) {
        let rotation = DMat4::from_axis_angle(axis.normalize(), angle);
        self.matrix *= rotation;
    }

    /// Scale by `factor` per axis.
    ///
    /// # Panics
    /// Panics if any factor is (nearly) zero.
    pub fn scale(&mut self, factor: Vector3) {
        assert!(
            factor.x.abs() > EPSILON && factor.y.abs() > EPSILON && factor.z.abs() > EPSILON,
            "Degenerate scale factor {:?}",
            factor
        );
        self.matrix *= DMat4::from_scale(factor);
    }

    pub fn translate(&mut self, offset: Vector3) {
        self.matrix *= DMat4::from_translation(offset);
    }

    pub fn transpose(&self) -> Transform {
        Self::from_mat4(self.matrix.transpose())
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.matrix;
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }

    /// Inverse-transpose with the homogeneous row and column reset, for
    /// carrying surface normals through a non-rigid model transform.
    pub fn normal_transform(&self) -> Option<Transform> {
        let it = self.inverse()?.transpose().to_mat4();
        Some(Self::from_columns(
            it.col(0).truncate(),
            it.col(1).truncate(),
            it.col(2).truncate(),
            Point3::ZERO,
        ))
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform::from_mat4(self.matrix * rhs.matrix)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
