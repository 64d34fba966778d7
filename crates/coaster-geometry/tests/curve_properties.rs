// Properties every curve variant must satisfy

use std::f64::consts::PI;
use std::sync::Arc;

use coaster_geometry::{
    BSplineCurve, Curve, DerivativeOrder, LineSegment, OffsetCurve, SpeedModel, Surface,
    TrigonometricCurve, Tube,
};
use coaster_math::{dvec3, Point3, Vector3};

const REL_TOL: f64 = 1e-4;

fn trig_loop() -> TrigonometricCurve {
    TrigonometricCurve::new(
        dvec3(0.8, 0.8, 0.2),
        dvec3(1.0, 2.0, 3.0),
        dvec3(-0.03, 0.69, 0.0),
        dvec3(0.0, 0.0, 0.4),
        Vector3::Z,
    )
}

fn bspline_loop() -> BSplineCurve {
    let cvs = (0..8)
        .map(|k| {
            let a = 2.0 * PI * k as f64 / 8.0;
            dvec3(a.cos(), a.sin(), 0.3 + 0.1 * (2.0 * a).sin())
        })
        .collect();
    BSplineCurve::new(cvs, true, Vector3::Z).unwrap()
}

fn all_curves() -> Vec<Arc<dyn Curve>> {
    let trig: Arc<dyn Curve> = Arc::new(trig_loop());
    vec![
        Arc::new(LineSegment::new(dvec3(-1.0, 0.5, 0.0), dvec3(2.0, 1.0, 3.0), Vector3::X)),
        trig.clone(),
        Arc::new(bspline_loop()),
        Arc::new(OffsetCurve::new(trig, dvec3(0.025, 0.0, 0.0), Vector3::Z)),
    ]
}

#[test]
fn test_derivative_matches_chord_ratio() {
    let eps = 1e-7;
    for curve in all_curves() {
        for &u in &[0.1, 0.33, 0.52, 0.77] {
            let dp = curve.tangent_at(u);
            let chord = (curve.point_at(u + eps) - curve.point_at(u)).length() / eps;
            assert!(
                (chord - dp.length()).abs() <= REL_TOL * dp.length(),
                "{:?} at u={}: chord {} vs |dp| {}",
                curve,
                u,
                chord,
                dp.length()
            );
        }
    }
}

#[test]
fn test_closed_curves_meet_at_seam() {
    for curve in all_curves().into_iter().filter(|c| c.is_closed()) {
        assert!((curve.point_at(0.0) - curve.point_at(1.0)).length() < 1e-9);
        let f0 = curve.frame_axes(0.0);
        let f1 = curve.frame_axes(1.0);
        assert!((f0.u - f1.u).length() < 1e-6);
        assert!((f0.v - f1.v).length() < 1e-6);
        assert!((f0.w - f1.w).length() < 1e-6);
    }
}

#[test]
fn test_ds_partition_sums_to_length() {
    for curve in all_curves() {
        let n = 1000;
        let du = 1.0 / n as f64;
        let total: f64 = (0..n).map(|i| curve.ds(i as f64 * du, du)).sum();
        let length = curve.length();
        assert!(
            (total - length).abs() <= 1e-6 * length,
            "{:?}: {} vs {}",
            curve,
            total,
            length
        );
    }
}

#[test]
fn test_circle_scenario() {
    let circle = TrigonometricCurve::new(
        dvec3(1.0, 1.0, 0.0),
        dvec3(1.0, -1.0, 0.0),
        dvec3(0.0, 0.25, 0.0),
        dvec3(0.0, 0.0, 0.2),
        Vector3::Z,
    );
    let p = circle.point_at(0.0);
    assert!((p - dvec3(1.0, 0.0, 0.2)).length() < 1e-12);
    assert!((circle.length() - 2.0 * PI).abs() < 1e-6 * 2.0 * PI);
}

#[test]
fn test_frames_stay_valid_under_dynamics() {
    let mut guide = trig_loop();
    let model = SpeedModel::for_curve(&guide, 0.4, 0.980665);
    guide.enable_dynamic_frame(model);
    assert!(guide.check_never_parallel(500).is_ok());

    let guide: Arc<dyn Curve> = Arc::new(guide);
    for k in 0..50 {
        let f = guide.frame_axes(k as f64 / 50.0);
        assert!((f.u.length() - 1.0).abs() < 1e-12);
        assert!(f.u.dot(f.w).abs() < 1e-12);
        assert!(f.v.dot(f.w).abs() < 1e-12);
    }
}

#[test]
fn test_tube_around_bspline_keeps_radius() {
    let guide: Arc<dyn Curve> = Arc::new(bspline_loop());
    let tube = Tube::new(guide.clone(), 0.02, 6, 64, true);
    let grid = tube.grid();
    for j in 0..grid.n_j {
        let v = grid.v_at(j);
        for i in 0..grid.n_i {
            let p = tube.point_at(grid.u_at(i), v);
            let r = (p - guide.point_at(v)).length();
            assert!((r - 0.02).abs() < 1e-12, "r = {}", r);
        }
    }
}

#[test]
fn test_bspline_end_evaluation_is_finite() {
    let curve = bspline_loop();
    let e = curve.evaluate(1.0, DerivativeOrder::Second);
    assert!(e.position.is_finite());
    assert!(e.dp_du.is_finite());
    assert!(e.d2p_du2.is_finite());
    assert!((e.position - curve.point_at(1.0 - 1e-12)).length() < 1e-9);
    assert_ne!(e.position, Point3::ZERO);
}
