//! A curve displaced rigidly with the moving frame of another curve.

use std::sync::Arc;

use coaster_math::{Point3, Vector3};

use super::{check_parameter, Curve, CurveEval, DerivativeOrder, FrameMode};

/// Parametric step for the difference quotients.
const H: f64 = 1.0e-4;

/// The point `offset`, given in the frame-local coordinates of
/// `frame_curve`'s coordinate frame, carried along that curve.
///
/// Local coordinates are `(along vU, along vW, along vV)`, matching the
/// column order of [`Curve::coordinate_frame`].
#[derive(Debug, Clone)]
pub struct OffsetCurve {
    frame_curve: Arc<dyn Curve>,
    offset: Vector3,
    frame: FrameMode,
}

impl OffsetCurve {
    pub fn new(frame_curve: Arc<dyn Curve>, offset: Vector3, never_parallel: Vector3) -> Self {
        Self {
            frame_curve,
            offset,
            frame: FrameMode::fixed(never_parallel),
        }
    }

    pub fn frame_curve(&self) -> &Arc<dyn Curve> {
        &self.frame_curve
    }

    pub fn offset(&self) -> Vector3 {
        self.offset
    }

    fn position(&self, u: f64) -> Point3 {
        self.frame_curve
            .coordinate_frame(u)
            .transform_point(Point3::ZERO + self.offset)
    }

    /// Sample parameters `(lo, hi)` around `u` and the spacing between them.
    fn stencil(&self, u: f64) -> (f64, f64, f64) {
        if self.is_closed() {
            (wrap(u - H), wrap(u + H), 2.0 * H)
        } else {
            let lo = (u - H).max(0.0);
            let hi = (u + H).min(1.0);
            (lo, hi, hi - lo)
        }
    }
}

fn wrap(u: f64) -> f64 {
    u.rem_euclid(1.0)
}

impl Curve for OffsetCurve {
    /// Derivatives are difference quotients of the displaced position, so
    /// they describe this curve rather than the frame curve.
    fn evaluate(&self, u: f64, order: DerivativeOrder) -> CurveEval {
        check_parameter(u);
        let position = self.position(u);
        let mut eval = CurveEval {
            position,
            ..Default::default()
        };
        if order.wants_first() {
            let (lo, hi, span) = self.stencil(u);
            let p_lo = self.position(lo);
            let p_hi = self.position(hi);
            eval.dp_du = (p_hi - p_lo) / span;
            if order.wants_second() {
                // an uneven stencil at an open end degrades to first order
                let mid = if self.is_closed() { position } else { self.position((lo + hi) / 2.0) };
                let half = span / 2.0;
                eval.d2p_du2 = (p_hi - 2.0 * mid + p_lo) / (half * half);
            }
        }
        eval
    }

    fn is_closed(&self) -> bool {
        self.frame_curve.is_closed()
    }

    fn frame_mode(&self) -> &FrameMode {
        &self.frame
    }

    fn frame_mode_mut(&mut self) -> &mut FrameMode {
        &mut self.frame
    }
}
