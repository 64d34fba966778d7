//! Coaster track assembly: a guide curve, two banked rails, ties and
//! supports, plus the cars that ride them.

pub mod ground;
pub mod layout;
pub mod params;
pub mod scene;
pub mod track;

pub use coaster_geometry::SpeedModel;
pub use ground::Ground;
pub use layout::{bspline_from_csv, planar_circle, Layout};
pub use params::{TrackParams, GRAV_ACCEL, LENGTH_UNITS_PER_METER};
pub use scene::{Car, Scene, DT_MAX};
pub use track::{Track, TrackMeshes, TubeRole};
