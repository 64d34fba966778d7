//! Line segment curve.

use coaster_math::{Point3, Vector3};

use super::{check_parameter, Curve, CurveEval, DerivativeOrder, FrameMode};

/// A line segment from `p0` to `p1`, parameterized over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct LineSegment {
    pub p0: Point3,
    pub p1: Point3,
    frame: FrameMode,
}

impl LineSegment {
    pub fn new(p0: Point3, p1: Point3, never_parallel: Vector3) -> Self {
        Self {
            p0,
            p1,
            frame: FrameMode::fixed(never_parallel),
        }
    }
}

impl Curve for LineSegment {
    fn evaluate(&self, u: f64, order: DerivativeOrder) -> CurveEval {
        check_parameter(u);
        let d = self.p1 - self.p0;
        CurveEval {
            position: self.p0 + u * d,
            dp_du: if order.wants_first() { d } else { Vector3::ZERO },
            d2p_du2: Vector3::ZERO,
        }
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn frame_mode(&self) -> &FrameMode {
        &self.frame
    }

    fn frame_mode_mut(&mut self) -> &mut FrameMode {
        &mut self.frame
    }
}
