//! Polyline approximations of curves, for wireframe display.

use coaster_math::Point3;

use crate::curve::Curve;

/// `n` uniformly spaced samples of `curve`.
///
/// A closed curve is sampled at `i / n` so the seam point appears once; an
/// open curve at `i / (n - 1)` so both ends are included.
pub fn sample_polyline<C: Curve + ?Sized>(curve: &C, n: usize) -> Vec<Point3> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![curve.point_at(0.0)];
    }
    let divisions = if curve.is_closed() { n } else { n - 1 };
    (0..n)
        .map(|i| curve.point_at(i as f64 / divisions as f64))
        .collect()
}

/// Convert a curve to a polyline using adaptive subdivision.
///
/// Segments are split in half while the curve midpoint deviates from the
/// chord midpoint by more than `tolerance`. Both ends are included, even
/// for closed curves.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let mut points = vec![curve.point_at(0.0)];
    // a closed curve's chord from 0 to 1 is degenerate, so start from halves
    if curve.is_closed() {
        subdivide_curve(curve, 0.0, 0.5, tolerance, &mut points, 1);
        subdivide_curve(curve, 0.5, 1.0, tolerance, &mut points, 1);
    } else {
        subdivide_curve(curve, 0.0, 1.0, tolerance, &mut points, 0);
    }
    points
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let p1 = curve.point_at(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p_mid = curve.point_at(t_mid);
    let deviation = (p_mid - (p0 + p1) * 0.5).length();

    if deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}
