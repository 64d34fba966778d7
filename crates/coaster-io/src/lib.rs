//! Readers for the external data the coaster consumes: Wavefront OBJ meshes
//! and CSV lists of control vertices.

pub mod obj;
pub mod points;

pub use obj::{parse_obj, read_obj, FaceVertex, ObjData};
pub use points::{parse_point3s, read_point3s};

use std::fs::File;
use std::path::Path;

use coaster_core::{CoasterError, Result};

/// Open `path`, reporting a missing file as [`CoasterError::NotFound`].
pub fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoasterError::NotFound(path.display().to_string())
        } else {
            CoasterError::Io(e)
        }
    })
}
