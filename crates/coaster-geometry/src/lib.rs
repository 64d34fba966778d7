//! Coaster geometry: parametric curves, moving frames, arc length, and
//! biparametric surfaces.

pub mod arclength;
pub mod basis;
pub mod curve;
pub mod surface;
pub mod tessellate;

pub use arclength::{ArcLengthWalker, Placement};
pub use basis::{Basis, BasisWeights};
pub use curve::{
    BSplineCurve, Curve, CurveEval, DerivativeOrder, Frame, FrameMode, LineSegment, OffsetCurve,
    SpeedModel, TrigonometricCurve,
};
pub use surface::{planar_patch, BezierPatch, GridSpec, Surface, SurfacePoint, Tube};
