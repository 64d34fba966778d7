//! Rails, ties and supports laid along a guide curve.

use std::sync::{Arc, OnceLock};

use coaster_core::{CoasterError, Result, Validate, EPSILON};
use coaster_geometry::{
    ArcLengthWalker, Curve, LineSegment, OffsetCurve, Placement, SpeedModel, Tube,
};
use coaster_math::{dvec3, Point3, Vector3};
use coaster_mesh::{tessellate_surface, MeshBuffers, RegularMesh};
use rayon::prelude::*;
use tracing::debug;

use crate::ground::Ground;
use crate::layout::Layout;
use crate::params::TrackParams;

/// Parametric integration steps per rail segment between two ties.
const STEPS_PER_RAIL_SEGMENT: usize = 100;

/// What a tube is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeRole {
    Rail,
    Tie,
    Support,
}

impl TubeRole {
    pub const ALL: [TubeRole; 3] = [TubeRole::Rail, TubeRole::Tie, TubeRole::Support];
}

/// A coaster track: a guide curve with a rail on each side, ties between
/// the rails and supports down to the ground.
///
/// The guide curve's frame is dynamic, so the rails bank with the apparent
/// gravity felt by a rider.
#[derive(Debug)]
pub struct Track {
    params: TrackParams,
    guide: Arc<dyn Curve>,
    left_rail: Arc<dyn Curve>,
    right_rail: Arc<dyn Curve>,
    speed_model: SpeedModel,
    length: f64,
    rails: Vec<Tube>,
    ties: Vec<Tube>,
    supports: Vec<Tube>,
    meshes: OnceLock<TrackMeshes>,
}

impl Track {
    /// Build a track along `guide`.
    ///
    /// Enables the dynamic frame on `guide`. Fails with
    /// [`CoasterError::DegenerateFrame`] if the resulting frame is undefined
    /// anywhere on the curve.
    pub fn new(mut guide: Box<dyn Curve>, params: TrackParams, ground: &Ground) -> Result<Self> {
        params.validate()?;

        // z_max must be measured before the frame depends on it
        let speed_model =
            SpeedModel::for_curve(&*guide, params.speed_at_top, params.grav_accel);
        guide.enable_dynamic_frame(speed_model);
        let guide: Arc<dyn Curve> = Arc::from(guide);
        guide.validate()?;

        let length = guide.length();
        if !(length > EPSILON) {
            return Err(CoasterError::Geometry(format!(
                "guide curve has no length ({})",
                length
            )));
        }

        let half = 0.5 * params.rail_separation;
        let left_rail: Arc<dyn Curve> =
            Arc::new(OffsetCurve::new(guide.clone(), dvec3(half, 0.0, 0.0), Vector3::Z));
        let right_rail: Arc<dyn Curve> =
            Arc::new(OffsetCurve::new(guide.clone(), dvec3(-half, 0.0, 0.0), Vector3::Z));

        let n_rail_segments = ((length / params.approx_rail_segment_length) as usize).max(2);
        let rails = [&left_rail, &right_rail]
            .into_iter()
            .map(|rail| {
                Tube::new(
                    rail.clone(),
                    params.radius,
                    params.n_theta,
                    n_rail_segments,
                    guide.is_closed(),
                )
            })
            .collect();

        let mut track = Self {
            params,
            guide,
            left_rail,
            right_rail,
            speed_model,
            length,
            rails,
            ties: Vec::new(),
            supports: Vec::new(),
            meshes: OnceLock::new(),
        };

        let tie_positions = track.tie_placements();
        track.ties = track.build_ties(&tie_positions);
        track.supports = track.build_supports(&tie_positions, ground);

        debug!(
            length,
            rail_segments = n_rail_segments,
            ties = track.ties.len(),
            supports = track.supports.len(),
            "built track"
        );
        Ok(track)
    }

    /// Build a track along one of the predefined layouts.
    pub fn from_layout(layout: Layout, params: TrackParams, ground: &Ground) -> Result<Self> {
        let guide = layout.guide_curve(&params)?;
        Self::new(guide, params, ground)
    }

    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    pub fn guide(&self) -> &Arc<dyn Curve> {
        &self.guide
    }

    pub fn left_rail(&self) -> &Arc<dyn Curve> {
        &self.left_rail
    }

    pub fn right_rail(&self) -> &Arc<dyn Curve> {
        &self.right_rail
    }

    pub fn speed_model(&self) -> &SpeedModel {
        &self.speed_model
    }

    /// Arc length of the guide curve.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn tubes(&self, role: TubeRole) -> &[Tube] {
        match role {
            TubeRole::Rail => &self.rails,
            TubeRole::Tie => &self.ties,
            TubeRole::Support => &self.supports,
        }
    }

    /// Speed of a car at `u`, from conservation of energy.
    pub fn speed(&self, u: f64) -> f64 {
        self.speed_model.speed(self.guide.point_at(u).z)
    }

    /// Ties needed to space them no further apart than the configured
    /// approximate separation.
    pub fn number_of_ties(&self) -> usize {
        ((self.length / self.params.approx_tie_separation).ceil() as usize).max(1)
    }

    /// Exact separation between ties along the guide curve.
    pub fn tie_separation(&self) -> f64 {
        self.length / self.number_of_ties() as f64
    }

    pub fn support_separation(&self) -> f64 {
        self.length / self.params.support_count as f64
    }

    /// Number of parametric steps used when walking the guide curve.
    pub fn integration_steps(&self) -> usize {
        STEPS_PER_RAIL_SEGMENT * self.params.rail_segments_per_tie * self.number_of_ties()
    }

    /// Parametric step used when walking the guide curve.
    pub fn integration_step(&self) -> f64 {
        1.0 / self.integration_steps() as f64
    }

    /// Tessellate every tube, in parallel, on first call. Later calls return
    /// the same meshes.
    pub fn tessellate(&self) -> Result<&TrackMeshes> {
        if let Some(meshes) = self.meshes.get() {
            return Ok(meshes);
        }
        let meshes = TrackMeshes {
            rails: tessellate_tubes(&self.rails)?,
            ties: tessellate_tubes(&self.ties)?,
            supports: tessellate_tubes(&self.supports)?,
        };
        debug!(faces = meshes.face_count(), "tessellated track");
        Ok(self.meshes.get_or_init(|| meshes))
    }

    fn tie_placements(&self) -> Vec<Placement> {
        let walker = ArcLengthWalker::new(self.integration_steps(), self.tie_separation());
        walker.walk(|u, du| self.guide.ds(u, du))
    }

    fn build_ties(&self, placements: &[Placement]) -> Vec<Tube> {
        placements
            .iter()
            .map(|p| {
                // the rails are never stacked vertically, so +z is safe
                let tie = LineSegment::new(
                    self.left_rail.point_at(p.u),
                    self.right_rail.point_at(p.u),
                    Vector3::Z,
                );
                Tube::new(
                    Arc::new(tie),
                    self.params.radius,
                    self.params.n_theta,
                    self.params.tie_rows,
                    false,
                )
            })
            .collect()
    }

    /// Supports stand under ties, the first under the first tie and then
    /// under the first tie past each support separation.
    fn build_supports(&self, ties: &[Placement], ground: &Ground) -> Vec<Tube> {
        let separation = self.support_separation();
        let max_height = self.params.max_support_height();
        let mut s_next = 0.0;
        let mut supports = Vec::new();
        for tie in ties {
            if tie.s < s_next {
                continue;
            }
            s_next += separation;

            let top = self.guide.point_at(tie.u);
            let bottom = Point3::new(top.x, top.y, ground.height(top.x, top.y));
            if top.z - bottom.z < EPSILON {
                debug!(u = tie.u, "guide curve at ground level, no support");
                continue;
            }
            let rows = if max_height > 0.0 {
                (top.z * self.params.max_support_rows as f64 / max_height).round() as usize
            } else {
                0
            };
            let post = LineSegment::new(bottom, top, Vector3::X);
            supports.push(Tube::new(
                Arc::new(post),
                self.params.radius,
                self.params.n_theta,
                rows.max(2),
                false,
            ));
        }
        supports
    }
}

fn tessellate_tubes(tubes: &[Tube]) -> Result<Vec<RegularMesh>> {
    tubes.par_iter().map(|tube| tessellate_surface(tube)).collect()
}

/// Meshes of every tube of a track, grouped by [`TubeRole`].
#[derive(Debug, Clone)]
pub struct TrackMeshes {
    rails: Vec<RegularMesh>,
    ties: Vec<RegularMesh>,
    supports: Vec<RegularMesh>,
}

impl TrackMeshes {
    pub fn meshes(&self, role: TubeRole) -> &[RegularMesh] {
        match role {
            TubeRole::Rail => &self.rails,
            TubeRole::Tie => &self.ties,
            TubeRole::Support => &self.supports,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TubeRole, &RegularMesh)> {
        TubeRole::ALL
            .into_iter()
            .flat_map(move |role| self.meshes(role).iter().map(move |m| (role, m)))
    }

    pub fn face_count(&self) -> usize {
        self.iter().map(|(_, m)| m.face_count()).sum()
    }

    /// All meshes of `role` as one triangle list, for a single draw call.
    pub fn merged_buffers(&self, role: TubeRole) -> Result<MeshBuffers> {
        let mut merged = MeshBuffers::default();
        for mesh in self.meshes(role) {
            merged.merge(&mesh.to_buffers().into_triangles())?;
        }
        Ok(merged)
    }
}
