use coaster_core::{CoasterError, Result};
use coaster_math::{Aabb3, Point2, Point3, Vector3};

/// How `MeshBuffers::indices` is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Three indices per triangle.
    Triangles,
    /// Consecutive strips of `strip_len` indices each.
    TriangleStrips { strip_len: usize },
}

/// A line segment from a point along a normal, for debug display.
pub type Quill = [Point3; 2];

/// Render-ready vertex and index data.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub texture_coords: Option<Vec<Point2>>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Default for MeshBuffers {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            texture_coords: None,
            indices: Vec::new(),
            topology: Topology::Triangles,
        }
    }
}

impl MeshBuffers {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::TriangleStrips { strip_len } if strip_len >= 3 => {
                (self.indices.len() / strip_len) * (strip_len - 2)
            }
            Topology::TriangleStrips { .. } => 0,
        }
    }

    /// Expand strips into an independent triangle list, keeping the strip
    /// winding convention (every other triangle flipped back).
    pub fn into_triangles(self) -> MeshBuffers {
        let Topology::TriangleStrips { strip_len } = self.topology else {
            return self;
        };
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);
        // strips shorter than three indices hold no triangles
        if strip_len >= 3 {
            for strip in self.indices.chunks_exact(strip_len) {
                for (k, w) in strip.windows(3).enumerate() {
                    if k % 2 == 0 {
                        indices.extend_from_slice(&[w[0], w[1], w[2]]);
                    } else {
                        indices.extend_from_slice(&[w[1], w[0], w[2]]);
                    }
                }
            }
        }
        MeshBuffers {
            indices,
            topology: Topology::Triangles,
            ..self
        }
    }

    /// Merge another triangle list into this one, offsetting indices appropriately.
    ///
    /// Texture coordinates survive only if both sides carry them.
    pub fn merge(&mut self, other: &MeshBuffers) -> Result<()> {
        if self.topology != Topology::Triangles || other.topology != Topology::Triangles {
            return Err(CoasterError::InvalidOperation(
                "only triangle lists can be merged".into(),
            ));
        }
        let offset = self.positions.len() as u32;
        self.texture_coords = match (self.texture_coords.take(), &other.texture_coords) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(_)) if self.positions.is_empty() => other.texture_coords.clone(),
            _ => None,
        };
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
        Ok(())
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}
