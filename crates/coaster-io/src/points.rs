//! CSV lists of 3D points, one `x,y,z` row per line.

use std::io::{BufRead, BufReader};
use std::path::Path;

use coaster_core::{CoasterError, Result};
use coaster_math::Point3;
use tracing::debug;

/// Read the points in a CSV file.
pub fn read_point3s(path: impl AsRef<Path>) -> Result<Vec<Point3>> {
    let file = crate::open(path.as_ref())?;
    let points = parse_point3s(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), count = points.len(), "read points");
    Ok(points)
}

/// Parse `x,y,z` rows. Blank lines and lines starting with `#` are skipped;
/// whitespace around fields is ignored.
pub fn parse_point3s<R: BufRead>(reader: R) -> Result<Vec<Point3>> {
    let mut points = Vec::new();
    for (k, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = k + 1;
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(CoasterError::parse(
                line_no,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }
        let mut xyz = [0.0; 3];
        for (value, field) in xyz.iter_mut().zip(&fields) {
            *value = field
                .parse()
                .map_err(|_| CoasterError::parse(line_no, format!("invalid number '{}'", field)))?;
        }
        points.push(Point3::from_array(xyz));
    }
    Ok(points)
}
