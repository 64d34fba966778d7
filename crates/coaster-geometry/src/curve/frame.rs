//! Reference vectors for moving frames: fixed, or derived from the apparent
//! acceleration of a rider travelling along the curve.

use coaster_core::EPSILON;
use coaster_math::{dvec3, Vector3};
use serde::{Deserialize, Serialize};

use super::{Curve, CurveEval, DerivativeOrder};

/// Speed along a curve from conservation of energy, given the speed at the
/// highest point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedModel {
    pub speed_at_top: f64,
    pub z_max: f64,
    pub grav_accel: f64,
}

impl SpeedModel {
    pub fn new(speed_at_top: f64, z_max: f64, grav_accel: f64) -> Self {
        Self {
            speed_at_top,
            z_max,
            grav_accel,
        }
    }

    /// Measure `z_max` on `curve`. Call this before enabling the curve's
    /// dynamic frame.
    pub fn for_curve<C: Curve + ?Sized>(curve: &C, speed_at_top: f64, grav_accel: f64) -> Self {
        Self::new(speed_at_top, curve.z_max(), grav_accel)
    }

    /// `sqrt(v_top^2 + 2 g (z_max - z))`, zero above the recorded top.
    pub fn speed(&self, z: f64) -> f64 {
        let v2 = self.speed_at_top * self.speed_at_top + 2.0 * self.grav_accel * (self.z_max - z);
        v2.max(0.0).sqrt()
    }
}

/// Per-curve frame configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMode {
    never_parallel: Vector3,
    dynamics: Option<SpeedModel>,
}

impl FrameMode {
    /// Static frame using `never_parallel` as the reference vector.
    pub fn fixed(never_parallel: Vector3) -> Self {
        Self {
            never_parallel,
            dynamics: None,
        }
    }

    pub fn never_parallel(&self) -> Vector3 {
        self.never_parallel
    }

    pub fn dynamics(&self) -> Option<&SpeedModel> {
        self.dynamics.as_ref()
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamics.is_some()
    }

    /// Use centripetal minus gravitational acceleration as the reference.
    /// A later call replaces the speed model; there is no way back to static.
    pub fn enable_dynamic(&mut self, model: SpeedModel) {
        self.dynamics = Some(model);
    }

    /// Derivatives needed to build a frame in this mode.
    pub fn derivative_order(&self) -> DerivativeOrder {
        if self.is_dynamic() {
            DerivativeOrder::Second
        } else {
            DerivativeOrder::First
        }
    }

    /// Reference vector at an evaluation that carries at least
    /// [`Self::derivative_order`] derivatives.
    pub fn reference_vector(&self, eval: &CurveEval) -> Vector3 {
        let Some(model) = &self.dynamics else {
            return self.never_parallel;
        };
        let param_speed = eval.dp_du.length();
        if param_speed < EPSILON {
            return self.never_parallel;
        }
        let ratio = model.speed(eval.position.z) / param_speed;
        let centripetal = eval.d2p_du2 * (ratio * ratio);
        let gravity = dvec3(0.0, 0.0, -model.grav_accel);
        centripetal - gravity
    }
}
