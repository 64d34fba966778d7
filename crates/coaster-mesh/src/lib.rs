pub mod buffers;
pub mod irregular;
pub mod regular;
pub mod tessellate;

pub use buffers::{MeshBuffers, Quill, Topology};
pub use irregular::{IrregularMesh, OBJ_FIT_HALF_EXTENT};
pub use regular::RegularMesh;
pub use tessellate::{tessellate_surface, Tessellation};
