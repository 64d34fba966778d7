// Integration tests tessellating curve-driven surfaces and loading OBJ meshes

use std::io::Write;
use std::sync::Arc;

use approx::assert_relative_eq;
use coaster_core::Validate;
use coaster_geometry::{Curve, LineSegment, Surface, TrigonometricCurve, Tube};
use coaster_math::{dvec3, Vector3};
use coaster_mesh::{tessellate_surface, IrregularMesh, Tessellation, Topology};
use tempfile::NamedTempFile;

fn circle() -> Arc<dyn Curve> {
    Arc::new(TrigonometricCurve::new(
        dvec3(1.0, 1.0, 0.0),
        dvec3(1.0, -1.0, 0.0),
        dvec3(0.0, 0.25, 0.0),
        dvec3(0.0, 0.0, 0.2),
        Vector3::Z,
    ))
}

#[test]
fn test_closed_tube_wraps_both_ways() {
    let guide = circle();
    let tube = Tube::new(guide.clone(), 0.05, 8, 40, true);
    let mesh = tessellate_surface(&tube).unwrap();

    assert_eq!(mesh.vertex_count(), 8 * 40);
    assert_eq!(mesh.face_count(), 2 * 8 * 40);
    assert!(mesh.validate().is_ok());

    // the last cell in each direction closes back to index 0
    assert_eq!(
        mesh.quad_boundary(7, 39),
        [mesh.vertex_index(7, 39), mesh.vertex_index(0, 39), 0, mesh.vertex_index(7, 0)]
    );

    let buffers = mesh.to_buffers();
    assert_eq!(buffers.topology, Topology::TriangleStrips { strip_len: 18 });
    assert_eq!(buffers.triangle_count(), mesh.face_count());
}

#[test]
fn test_tube_normals_point_outward() {
    let guide = circle();
    let tube = Tube::new(guide.clone(), 0.05, 6, 24, true);
    let mesh = tessellate_surface(&tube).unwrap();
    let grid = tube.grid();
    for j in 0..grid.n_j {
        let center = guide.point_at(grid.v_at(j));
        for i in 0..grid.n_i {
            let k = mesh.vertex_index(i, j);
            let radial = (mesh.positions()[k] - center) / 0.05;
            assert_relative_eq!(mesh.normals()[k].dot(radial), 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_open_tube_reaches_both_ends() {
    let post: Arc<dyn Curve> = Arc::new(LineSegment::new(
        dvec3(0.3, 0.1, 0.0),
        dvec3(0.3, 0.1, 1.0),
        Vector3::X,
    ));
    let tube = Tessellation::new(Tube::new(post, 0.01, 6, 5, false));
    let mesh = tube.mesh().unwrap();
    assert_eq!(mesh.face_count(), 2 * 6 * 4);
    let top = mesh.positions()[mesh.vertex_index(0, 4)];
    assert_relative_eq!(top.z, 1.0, epsilon = 1e-12);
}

#[test]
fn test_irregular_mesh_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "v -4 0 0\nv 4 0 0\nv 0 2 0\nv 0 0 2\nf 1 2 3\nf 1 2 4\n"
    )
    .unwrap();
    file.flush().unwrap();

    let mesh = IrregularMesh::read(file.path()).unwrap();
    assert_eq!(mesh.face_count(), 2);
    let bounds = mesh.to_buffers().bounding_box();
    assert_relative_eq!(bounds.min.x, -0.75, epsilon = 1e-12);
    assert_relative_eq!(bounds.max.x, 0.75, epsilon = 1e-12);

    // vertices on the shared edge average the two face normals
    let shared = mesh.normals()[0];
    assert_relative_eq!(shared.length(), 1.0, epsilon = 1e-12);
    assert!(shared.y < 0.0 && shared.z > 0.0);
}
