//! Cubic blending bases: Bernstein (Bezier) and uniform cubic B-spline.

use serde::{Deserialize, Serialize};

use crate::curve::DerivativeOrder;

/// The four blending weights at a local parameter, and optionally their
/// first and second derivatives with respect to that parameter.
///
/// Derivatives that were not requested are left at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BasisWeights {
    pub values: [f64; 4],
    pub first: [f64; 4],
    pub second: [f64; 4],
}

impl BasisWeights {
    /// Blend four values (points or vectors) with `weights`.
    pub fn blend<T>(weights: &[f64; 4], items: [T; 4]) -> T
    where
        T: std::ops::Mul<f64, Output = T> + std::ops::Add<Output = T> + Copy,
    {
        items[0] * weights[0] + items[1] * weights[1] + items[2] * weights[2] + items[3] * weights[3]
    }
}

/// A stateless cubic basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    /// Bernstein polynomials: the curve interpolates its end control points.
    Bezier,
    /// Uniform cubic ("N3") B-spline: C2 continuous across spans.
    UniformCubicBSpline,
}

impl Basis {
    /// Evaluate the four weights at `t` in `[0, 1]`.
    pub fn evaluate(self, t: f64, order: DerivativeOrder) -> BasisWeights {
        debug_assert!((0.0..=1.0).contains(&t), "basis parameter {} outside [0, 1]", t);
        match self {
            Basis::Bezier => bezier(t, order),
            Basis::UniformCubicBSpline => uniform_cubic_bspline(t, order),
        }
    }
}

fn bezier(t: f64, order: DerivativeOrder) -> BasisWeights {
    let t2 = t * t;
    let t3 = t2 * t;
    let mut w = BasisWeights {
        values: [
            1.0 - 3.0 * t + 3.0 * t2 - t3, // (1-t)^3
            3.0 * t - 6.0 * t2 + 3.0 * t3, // 3t(1-t)^2
            3.0 * t2 - 3.0 * t3,           // 3t^2(1-t)
            t3,
        ],
        ..Default::default()
    };
    if order.wants_first() {
        w.first = [
            -3.0 + 6.0 * t - 3.0 * t2,
            3.0 - 12.0 * t + 9.0 * t2,
            6.0 * t - 9.0 * t2,
            3.0 * t2,
        ];
    }
    if order.wants_second() {
        w.second = [6.0 - 6.0 * t, -12.0 + 18.0 * t, 6.0 - 18.0 * t, 6.0 * t];
    }
    w
}

fn uniform_cubic_bspline(t: f64, order: DerivativeOrder) -> BasisWeights {
    let t2 = t * t;
    let t3 = t2 * t;
    let mut w = BasisWeights {
        values: [
            (-t3 + 3.0 * t2 - 3.0 * t + 1.0) / 6.0,
            (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0,
            (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0,
            t3 / 6.0,
        ],
        ..Default::default()
    };
    if order.wants_first() {
        w.first = [
            (-3.0 * t2 + 6.0 * t - 3.0) / 6.0,
            (9.0 * t2 - 12.0 * t) / 6.0,
            (-9.0 * t2 + 6.0 * t + 3.0) / 6.0,
            (3.0 * t2) / 6.0,
        ];
    }
    if order.wants_second() {
        w.second = [
            (-6.0 * t + 6.0) / 6.0,
            (18.0 * t - 12.0) / 6.0,
            (-18.0 * t + 6.0) / 6.0,
            (6.0 * t) / 6.0,
        ];
    }
    w
}
