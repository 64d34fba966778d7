//! Grid-topology mesh with optional wraparound in either direction.

use coaster_core::{CoasterError, Result, Validate, EPSILON};
use coaster_geometry::GridSpec;
use coaster_math::{face_normal, triangle_centroid, Point2, Point3, Vector3};

use crate::buffers::{MeshBuffers, Quill, Topology};

/// An `n_i x n_j` grid of vertices stored `j`-major (`index = j * n_i + i`).
///
/// A wrapped direction has no duplicate seam vertices: its last row or
/// column connects back to index 0. Every quad cell is split into an
/// upper-left and a lower-right triangle.
#[derive(Debug, Clone)]
pub struct RegularMesh {
    grid: GridSpec,
    positions: Vec<Point3>,
    normals: Vec<Vector3>,
    texture_coords: Option<Vec<Point2>>,
    face_normals: Vec<Vector3>,
    face_centroids: Vec<Point3>,
    strips: Vec<u32>,
}

impl RegularMesh {
    /// Build a mesh from `grid.n_i * grid.n_j` positions and normals.
    ///
    /// Fails if two positions coincide (within [`EPSILON`] on every axis),
    /// since the faces between them would have no defined normal.
    pub fn new(grid: GridSpec, positions: Vec<Point3>, normals: Vec<Vector3>) -> Result<Self> {
        if grid.n_i < 2 || grid.n_j < 2 {
            return Err(CoasterError::Geometry(format!(
                "regular mesh needs at least 2x2 vertices, got {}x{}",
                grid.n_i, grid.n_j
            )));
        }
        if positions.len() != grid.vertex_count() || normals.len() != grid.vertex_count() {
            return Err(CoasterError::Geometry(format!(
                "expected {} vertices, got {} positions and {} normals",
                grid.vertex_count(),
                positions.len(),
                normals.len()
            )));
        }
        if let Some((first, second)) = find_coincident(&positions) {
            return Err(CoasterError::DuplicateVertex { first, second });
        }

        let mut mesh = Self {
            grid,
            positions,
            normals,
            texture_coords: None,
            face_normals: Vec::new(),
            face_centroids: Vec::new(),
            strips: Vec::new(),
        };
        mesh.create_face_normals_and_centroids();
        mesh.strips = mesh.create_strips();
        Ok(mesh)
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
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

    /// Quad cells along `i`.
    pub fn cells_i(&self) -> usize {
        self.grid.n_i - 1 + usize::from(self.grid.wrap_i)
    }

    /// Quad cells along `j`.
    pub fn cells_j(&self) -> usize {
        self.grid.n_j - 1 + usize::from(self.grid.wrap_j)
    }

    pub fn face_count(&self) -> usize {
        2 * self.cells_i() * self.cells_j()
    }

    pub fn vertex_index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.grid.n_i && j < self.grid.n_j);
        j * self.grid.n_i + i
    }

    pub fn face_index(&self, i: usize, j: usize, is_upper_left: bool) -> usize {
        debug_assert!(i < self.cells_i() && j < self.cells_j());
        2 * (j * self.cells_i() + i) + usize::from(is_upper_left)
    }

    /// Vertex indices of the cell at `(i, j)` in counter-clockwise order:
    /// `(i, j)`, `(i+1, j)`, `(i+1, j+1)`, `(i, j+1)`, wrapping where enabled.
    ///
    /// # Panics
    /// Panics if the cell does not exist.
    pub fn quad_boundary(&self, i_left: usize, j_lower: usize) -> [usize; 4] {
        assert!(
            i_left < self.cells_i() && j_lower < self.cells_j(),
            "no quad at ({}, {}) in a {}x{} cell grid",
            i_left,
            j_lower,
            self.cells_i(),
            self.cells_j()
        );
        let i_right = if i_left + 1 == self.grid.n_i { 0 } else { i_left + 1 };
        let j_upper = if j_lower + 1 == self.grid.n_j { 0 } else { j_lower + 1 };
        [
            self.vertex_index(i_left, j_lower),
            self.vertex_index(i_right, j_lower),
            self.vertex_index(i_right, j_upper),
            self.vertex_index(i_left, j_upper),
        ]
    }

    /// Vertex indices of one triangle of the cell at `(i, j)`.
    pub fn triangle_vertex_indices(&self, i: usize, j: usize, is_upper_left: bool) -> [usize; 3] {
        let [p0, p1, p2, p3] = self.quad_boundary(i, j);
        if is_upper_left {
            [p0, p2, p3]
        } else {
            [p0, p1, p2]
        }
    }

    fn create_face_normals_and_centroids(&mut self) {
        let n_faces = self.face_count();
        self.face_normals = vec![Vector3::ZERO; n_faces];
        self.face_centroids = vec![Point3::ZERO; n_faces];
        for j in 0..self.cells_j() {
            for i in 0..self.cells_i() {
                for is_upper_left in [false, true] {
                    let [a, b, c] = self.triangle_vertex_indices(i, j, is_upper_left);
                    let (pa, pb, pc) = (self.positions[a], self.positions[b], self.positions[c]);
                    let f = self.face_index(i, j, is_upper_left);
                    self.face_normals[f] = face_normal(pa, pb, pc);
                    self.face_centroids[f] = triangle_centroid(pa, pb, pc);
                }
            }
        }
    }

    /// Length of every strip in [`Self::triangle_strip_indices`].
    pub fn strip_len(&self) -> usize {
        2 * (self.grid.n_i + usize::from(self.grid.wrap_i))
    }

    fn create_strips(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.cells_j() * self.strip_len());
        for j in 0..self.cells_j() {
            let j_top = (j + 1) % self.grid.n_j;
            for i in 0..self.grid.n_i {
                indices.push(self.vertex_index(i, j_top) as u32);
                indices.push(self.vertex_index(i, j) as u32);
            }
            if self.grid.wrap_i {
                indices.push(self.vertex_index(0, j_top) as u32);
                indices.push(self.vertex_index(0, j) as u32);
            }
        }
        indices
    }

    /// One strip per row of cells, alternating between rows `j + 1` and `j`.
    pub fn triangle_strip_indices(&self) -> &[u32] {
        &self.strips
    }

    /// The strip for cell row `j`.
    pub fn strip(&self, j: usize) -> &[u32] {
        let len = self.strip_len();
        &self.strips[j * len..(j + 1) * len]
    }

    /// All triangles as an index list, in `face_index` order.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(3 * self.face_count());
        for j in 0..self.cells_j() {
            for i in 0..self.cells_i() {
                for is_upper_left in [false, true] {
                    indices.extend(self.triangle_vertex_indices(i, j, is_upper_left).map(|k| k as u32));
                }
            }
        }
        indices
    }

    /// Texture coordinates `(i * u_scale / (n_i - 1), j * v_scale / (n_j - 1))`.
    pub fn set_texture_coordinates(&mut self, u_scale: f64, v_scale: f64) {
        let (n_i, n_j) = (self.grid.n_i, self.grid.n_j);
        let coords = (0..n_j)
            .flat_map(|j| {
                (0..n_i).map(move |i| {
                    Point2::new(
                        i as f64 * u_scale / (n_i - 1) as f64,
                        j as f64 * v_scale / (n_j - 1) as f64,
                    )
                })
            })
            .collect();
        self.texture_coords = Some(coords);
    }

    /// Strip buffers for rendering.
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers {
            positions: self.positions.clone(),
            normals: self.normals.clone(),
            texture_coords: self.texture_coords.clone(),
            indices: self.strips.clone(),
            topology: Topology::TriangleStrips {
                strip_len: self.strip_len(),
            },
        }
    }

    /// Quills of length `len` along each vertex normal, then along each
    /// face normal from its centroid.
    pub fn hedgehog(&self, len: f64) -> Vec<Quill> {
        quills(&self.positions, &self.normals, &self.face_centroids, &self.face_normals, len)
    }
}

impl Validate for RegularMesh {
    fn validate(&self) -> Result<()> {
        if let Some(k) = self.normals.iter().position(|n| !n.is_finite() || n.length() < EPSILON) {
            return Err(CoasterError::Geometry(format!("vertex {} has no usable normal", k)));
        }
        if let Some((first, second)) = find_coincident(&self.positions) {
            return Err(CoasterError::DuplicateVertex { first, second });
        }
        Ok(())
    }
}

pub(crate) fn quills(
    positions: &[Point3],
    normals: &[Vector3],
    centroids: &[Point3],
    face_normals: &[Vector3],
    len: f64,
) -> Vec<Quill> {
    positions
        .iter()
        .zip(normals)
        .chain(centroids.iter().zip(face_normals))
        .map(|(&p, &n)| [p, p + len * n])
        .collect()
}

/// First pair of positions (lower index first) that agree within
/// [`EPSILON`] on every axis.
fn find_coincident(positions: &[Point3]) -> Option<(usize, usize)> {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|&a, &b| positions[a].x.total_cmp(&positions[b].x));
    let mut found: Option<(usize, usize)> = None;
    for (k, &a) in order.iter().enumerate() {
        for &b in &order[k + 1..] {
            let d = positions[b] - positions[a];
            if d.x >= EPSILON {
                break;
            }
            if d.y.abs() < EPSILON && d.z.abs() < EPSILON {
                let pair = (a.min(b), a.max(b));
                if found.map_or(true, |f| pair < f) {
                    found = Some(pair);
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_math::dvec3;
    use std::collections::HashSet;

    fn grid_mesh(n_i: usize, n_j: usize, wrap_i: bool, wrap_j: bool) -> RegularMesh {
        let grid = GridSpec::new(n_i, n_j, wrap_i, wrap_j);
        let positions = (0..n_j)
            .flat_map(|j| (0..n_i).map(move |i| dvec3(i as f64, j as f64, (i * j) as f64 * 0.1)))
            .collect();
        RegularMesh::new(grid, positions, vec![Vector3::Z; n_i * n_j]).unwrap()
    }

    #[test]
    fn test_vertex_index_layout() {
        let mesh = grid_mesh(4, 3, false, false);
        assert_eq!(mesh.vertex_index(0, 0), 0);
        assert_eq!(mesh.vertex_index(3, 0), 3);
        assert_eq!(mesh.vertex_index(1, 2), 9);
        assert_eq!(mesh.positions()[mesh.vertex_index(1, 2)], dvec3(1.0, 2.0, 0.2));
    }

    #[test]
    fn test_face_count_and_injective_indices() {
        for (n_i, n_j) in [(2, 2), (3, 5), (6, 4)] {
            for wrap_i in [false, true] {
                for wrap_j in [false, true] {
                    let mesh = grid_mesh(n_i, n_j, wrap_i, wrap_j);
                    let expected = 2 * (n_i - 1 + usize::from(wrap_i)) * (n_j - 1 + usize::from(wrap_j));
                    assert_eq!(mesh.face_count(), expected);
                    assert_eq!(mesh.face_normals().len(), expected);

                    let mut faces = HashSet::new();
                    for j in 0..mesh.cells_j() {
                        for i in 0..mesh.cells_i() {
                            for ul in [false, true] {
                                let f = mesh.face_index(i, j, ul);
                                assert!(f < expected);
                                assert!(faces.insert(f), "face index {} repeated", f);
                            }
                        }
                    }

                    let verts: HashSet<_> = (0..n_j)
                        .flat_map(|j| (0..n_i).map(move |i| (i, j)))
                        .map(|(i, j)| mesh.vertex_index(i, j))
                        .collect();
                    assert_eq!(verts.len(), n_i * n_j);
                }
            }
        }
    }

    #[test]
    fn test_quad_boundary_wraps() {
        let mesh = grid_mesh(3, 2, true, true);
        // last column wraps to i = 0, last row to j = 0
        assert_eq!(mesh.quad_boundary(2, 1), [5, 3, 0, 2]);
        assert_eq!(mesh.triangle_vertex_indices(2, 1, true), [5, 0, 2]);
        assert_eq!(mesh.triangle_vertex_indices(2, 1, false), [5, 3, 0]);
    }

    #[test]
    #[should_panic(expected = "no quad")]
    fn test_quad_boundary_rejects_open_edge() {
        let mesh = grid_mesh(3, 2, false, false);
        mesh.quad_boundary(2, 0);
    }

    #[test]
    fn test_face_normals_and_centroids() {
        let grid = GridSpec::new(2, 2, false, false);
        let positions = vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(1.0, 1.0, 0.0),
        ];
        let mesh = RegularMesh::new(grid, positions, vec![Vector3::Z; 4]).unwrap();
        for n in mesh.face_normals() {
            assert!((*n - Vector3::Z).length() < 1e-12);
        }
        let lr = mesh.face_centroids()[mesh.face_index(0, 0, false)];
        let ul = mesh.face_centroids()[mesh.face_index(0, 0, true)];
        assert!((lr - dvec3(2.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-12);
        assert!((ul - dvec3(1.0 / 3.0, 2.0 / 3.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_strips() {
        let mesh = grid_mesh(3, 3, true, false);
        assert_eq!(mesh.strip_len(), 8);
        assert_eq!(mesh.triangle_strip_indices().len(), 2 * 8);
        assert_eq!(mesh.strip(0), &[3, 0, 4, 1, 5, 2, 3, 0]);
        assert_eq!(mesh.strip(1), &[6, 3, 7, 4, 8, 5, 6, 3]);

        let wrapped = grid_mesh(2, 3, false, true);
        // the last strip joins the top row back to row 0
        assert_eq!(wrapped.strip(2), &[0, 4, 1, 5]);
    }

    #[test]
    fn test_strip_buffers_cover_all_faces() {
        let mesh = grid_mesh(4, 3, true, true);
        let buffers = mesh.to_buffers();
        assert_eq!(buffers.triangle_count(), mesh.face_count());
        assert_eq!(mesh.triangle_indices().len(), 3 * mesh.face_count());
    }

    #[test]
    fn test_coincident_vertices_rejected() {
        let grid = GridSpec::new(2, 2, false, false);
        let positions = vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(1.0, 0.0, 5e-13),
        ];
        let err = RegularMesh::new(grid, positions, vec![Vector3::Z; 4]).unwrap_err();
        assert!(matches!(err, CoasterError::DuplicateVertex { first: 1, second: 3 }));
    }

    #[test]
    fn test_wrong_vertex_count_rejected() {
        let grid = GridSpec::new(3, 2, false, false);
        let result = RegularMesh::new(grid, vec![Point3::ZERO; 5], vec![Vector3::Z; 5]);
        assert!(matches!(result, Err(CoasterError::Geometry(_))));
    }

    #[test]
    fn test_texture_coordinates() {
        let mut mesh = grid_mesh(3, 5, false, false);
        assert!(mesh.texture_coords().is_none());
        mesh.set_texture_coordinates(2.0, 1.0);
        let tc = mesh.texture_coords().unwrap();
        assert_eq!(tc[mesh.vertex_index(2, 4)], Point2::new(2.0, 1.0));
        assert_eq!(tc[mesh.vertex_index(1, 2)], Point2::new(1.0, 0.5));
        assert!(mesh.to_buffers().texture_coords.is_some());
    }

    #[test]
    fn test_hedgehog() {
        let mesh = grid_mesh(2, 2, false, false);
        let quills = mesh.hedgehog(0.5);
        assert_eq!(quills.len(), 4 + 2);
        assert_eq!(quills[0], [Point3::ZERO, dvec3(0.0, 0.0, 0.5)]);
    }

    #[test]
    fn test_validate() {
        let mesh = grid_mesh(3, 3, false, false);
        assert!(mesh.validate().is_ok());
        let grid = GridSpec::new(2, 2, false, false);
        let positions = vec![dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.0, 0.0), dvec3(0.0, 1.0, 0.0), dvec3(1.0, 1.0, 0.0)];
        let flat = RegularMesh::new(grid, positions, vec![Vector3::ZERO; 4]).unwrap();
        assert!(flat.validate().is_err());
    }
}
