//! Lissajous-style curve with an independent cosine per axis.

use std::f64::consts::TAU;

use coaster_math::{Point3, Vector3};

use super::{check_parameter, Curve, CurveEval, DerivativeOrder, FrameMode};

/// `p_k(u) = mag_k * cos(2π (freq_k u + phase_k)) + offset_k` for each axis `k`.
///
/// Phases are in cycles, not radians.
#[derive(Debug, Clone)]
pub struct TrigonometricCurve {
    pub mag: Vector3,
    pub freq: Vector3,
    pub phase: Vector3,
    pub offset: Point3,
    frame: FrameMode,
}

impl TrigonometricCurve {
    pub fn new(mag: Vector3, freq: Vector3, phase: Vector3, offset: Point3, never_parallel: Vector3) -> Self {
        Self {
            mag,
            freq,
            phase,
            offset,
            frame: FrameMode::fixed(never_parallel),
        }
    }
}

impl Curve for TrigonometricCurve {
    fn evaluate(&self, u: f64, order: DerivativeOrder) -> CurveEval {
        check_parameter(u);
        let angle = TAU * (self.freq * u + self.phase);
        let cos = Vector3::new(angle.x.cos(), angle.y.cos(), angle.z.cos());
        let mut eval = CurveEval {
            position: self.mag * cos + self.offset,
            ..Default::default()
        };
        if order.wants_first() {
            let sin = Vector3::new(angle.x.sin(), angle.y.sin(), angle.z.sin());
            eval.dp_du = -self.mag * TAU * self.freq * sin;
        }
        if order.wants_second() {
            eval.d2p_du2 = -self.mag * (TAU * TAU) * self.freq * self.freq * cos;
        }
        eval
    }

    /// Closed when every frequency is a whole number of cycles.
    fn is_closed(&self) -> bool {
        self.freq.to_array().iter().all(|f| f.fract() == 0.0)
    }

    fn frame_mode(&self) -> &FrameMode {
        &self.frame
    }

    fn frame_mode_mut(&mut self) -> &mut FrameMode {
        &mut self.frame
    }
}
