//! Triangle soup loaded from OBJ data.

use std::path::Path;

use coaster_core::{CoasterError, Result, Validate, EPSILON};
use coaster_io::{read_obj, ObjData};
use coaster_math::{
    dvec3, face_normal, fit_points_in_box, triangle_centroid, Aabb3, Point2, Point3, Vector3,
};
use tracing::debug;

use crate::buffers::{MeshBuffers, Quill, Topology};

/// Half extent of the cube that loaded models are fitted into.
pub const OBJ_FIT_HALF_EXTENT: f64 = 0.75;

/// Three vertices per face, with no vertex sharing between faces.
#[derive(Debug, Clone)]
pub struct IrregularMesh {
    positions: Vec<Point3>,
    normals: Vec<Vector3>,
    texture_coords: Option<Vec<Point2>>,
    face_normals: Vec<Vector3>,
    face_centroids: Vec<Point3>,
}

impl IrregularMesh {
    pub fn new(positions: Vec<Point3>, normals: Vec<Vector3>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(CoasterError::Geometry(format!(
                "irregular mesh needs 3 vertices per face, got {} vertices",
                positions.len()
            )));
        }
        if normals.len() != positions.len() {
            return Err(CoasterError::Geometry(format!(
                "{} positions but {} normals",
                positions.len(),
                normals.len()
            )));
        }
        let mut mesh = Self {
            positions,
            normals,
            texture_coords: None,
            face_normals: Vec::new(),
            face_centroids: Vec::new(),
        };
        mesh.create_face_normals_and_centroids();
        Ok(mesh)
    }

    /// Load an OBJ file. See [`IrregularMesh::from_obj`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_obj(&read_obj(path)?)
    }

    /// De-index `obj` into a triangle soup fitted into the cube of half
    /// extent [`OBJ_FIT_HALF_EXTENT`] about the origin.
    ///
    /// A corner without a normal gets the normalized sum of the normals of
    /// every face sharing its position. Texture coordinates are kept only
    /// when every corner has one.
    pub fn from_obj(obj: &ObjData) -> Result<Self> {
        let smooth = accumulate_vertex_normals(obj);

        let n = 3 * obj.triangles.len();
        let mut positions = Vec::with_capacity(n);
        let mut normals = Vec::with_capacity(n);
        let mut texture_coords = Vec::with_capacity(n);
        let mut textured = !obj.triangles.is_empty();

        for corner in obj.triangles.iter().flatten() {
            positions.push(obj.positions[corner.position]);
            normals.push(match corner.normal {
                Some(k) => obj.normals[k],
                None => smooth[corner.position],
            });
            match corner.texture {
                Some(k) if textured => texture_coords.push(obj.texture_coords[k]),
                _ => textured = false,
            }
        }

        let mut mesh = Self::new(positions, normals)?;
        if textured {
            mesh.texture_coords = Some(texture_coords);
        }
        let half = OBJ_FIT_HALF_EXTENT;
        mesh.fit_in_box(&Aabb3::new(dvec3(-half, -half, -half), dvec3(half, half, half)));
        debug!(name = %obj.name, faces = mesh.face_count(), textured, "built irregular mesh");
        Ok(mesh)
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    pub fn texture_coords(&self) -> Option<&[Point2]> {
        self.texture_coords.as_deref()
    }

    pub fn face_normals(&self) -> &[Vector3] {
        &self.face_normals
    }

    pub fn face_centroids(&self) -> &[Point3] {
        &self.face_centroids
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Each face normal repeated for the face's three vertices, for flat
    /// shading.
    pub fn face_normal_per_vertex(&self) -> Vec<Vector3> {
        self.face_normals.iter().flat_map(|&n| [n; 3]).collect()
    }

    /// Scale uniformly and translate so the mesh fits in `target`.
    pub fn fit_in_box(&mut self, target: &Aabb3) {
        fit_points_in_box(&mut self.positions, target);
        // normals are unchanged by a uniform scale
        self.create_face_normals_and_centroids();
    }

    /// Triangle buffers with smooth (per-vertex) normals.
    pub fn to_buffers(&self) -> MeshBuffers {
        self.buffers_with_normals(self.normals.clone())
    }

    /// Triangle buffers with flat (per-face) normals.
    pub fn to_flat_buffers(&self) -> MeshBuffers {
        self.buffers_with_normals(self.face_normal_per_vertex())
    }

    /// Quills of length `len` along each vertex normal, then along each
    /// face normal from its centroid.
    pub fn hedgehog(&self, len: f64) -> Vec<Quill> {
        crate::regular::quills(
            &self.positions,
            &self.normals,
            &self.face_centroids,
            &self.face_normals,
            len,
        )
    }

    fn buffers_with_normals(&self, normals: Vec<Vector3>) -> MeshBuffers {
        MeshBuffers {
            positions: self.positions.clone(),
            normals,
            texture_coords: self.texture_coords.clone(),
            indices: (0..self.positions.len() as u32).collect(),
            topology: Topology::Triangles,
        }
    }

    fn create_face_normals_and_centroids(&mut self) {
        let (normals, centroids): (Vec<_>, Vec<_>) = self
            .positions
            .chunks_exact(3)
            .map(|t| (face_normal(t[0], t[1], t[2]), triangle_centroid(t[0], t[1], t[2])))
            .unzip();
        self.face_normals = normals;
        self.face_centroids = centroids;
    }
}

impl Validate for IrregularMesh {
    fn validate(&self) -> Result<()> {
        if let Some(k) = self.normals.iter().position(|n| !n.is_finite() || n.length() < EPSILON) {
            return Err(CoasterError::Geometry(format!("vertex {} has no usable normal", k)));
        }
        if let Some(f) = self.face_normals.iter().position(|n| *n == Vector3::ZERO) {
            return Err(CoasterError::Geometry(format!("face {} is degenerate", f)));
        }
        Ok(())
    }
}

/// Normalized sum of incident face normals for every OBJ position.
fn accumulate_vertex_normals(obj: &ObjData) -> Vec<Vector3> {
    let mut sums = vec![Vector3::ZERO; obj.positions.len()];
    for [a, b, c] in &obj.triangles {
        let n = face_normal(
            obj.positions[a.position],
            obj.positions[b.position],
            obj.positions[c.position],
        );
        for k in [a.position, b.position, c.position] {
            sums[k] += n;
        }
    }
    sums.iter().map(|s| s.normalize_or_zero()).collect()
}
