//! Surface tessellation onto regular grids.

use std::sync::OnceLock;

use coaster_core::{CoasterError, Result};
use coaster_geometry::Surface;
use tracing::debug;

use crate::regular::RegularMesh;

/// Sample `surface` on its own grid.
///
/// Vertices are laid out `j`-major with `i` varying fastest. Normals are
/// [`coaster_geometry::SurfacePoint::normal`] at each sample.
pub fn tessellate_surface(surface: &dyn Surface) -> Result<RegularMesh> {
    let grid = surface.grid();
    if grid.n_i < 2 || grid.n_j < 2 {
        return Err(CoasterError::Geometry(format!(
            "cannot tessellate a {}x{} grid",
            grid.n_i, grid.n_j
        )));
    }

    let mut positions = Vec::with_capacity(grid.vertex_count());
    let mut normals = Vec::with_capacity(grid.vertex_count());
    for j in 0..grid.n_j {
        let v = grid.v_at(j);
        for i in 0..grid.n_i {
            let sp = surface.evaluate(grid.u_at(i), v);
            positions.push(sp.position);
            normals.push(sp.normal());
        }
    }

    debug!(n_i = grid.n_i, n_j = grid.n_j, wrap_i = grid.wrap_i, wrap_j = grid.wrap_j, "tessellated surface");
    RegularMesh::new(grid, positions, normals)
}

/// A surface together with its mesh, tessellated on first access and kept
/// for the lifetime of the value.
#[derive(Debug)]
pub struct Tessellation<S> {
    surface: S,
    mesh: OnceLock<RegularMesh>,
}

impl<S: Surface> Tessellation<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            mesh: OnceLock::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The cached mesh. A failed tessellation is not cached, so the error is
    /// reported again on the next call.
    pub fn mesh(&self) -> Result<&RegularMesh> {
        if let Some(mesh) = self.mesh.get() {
            return Ok(mesh);
        }
        let mesh = tessellate_surface(&self.surface)?;
        Ok(self.mesh.get_or_init(|| mesh))
    }

    pub fn is_tessellated(&self) -> bool {
        self.mesh.get().is_some()
    }
}
