//! Reader for the subset of Wavefront OBJ used for irregular meshes:
//! `v`, `vn`, `vt` and `f` records.

use std::io::{BufRead, BufReader};
use std::path::Path;

use coaster_core::{CoasterError, Result};
use coaster_math::{Point2, Point3, Vector3};
use tracing::{debug, warn};

/// One corner of a face. Indices are zero-based; an index the file did not
/// give is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub texture: Option<usize>,
    pub normal: Option<usize>,
}

/// Contents of an OBJ file. Polygons are fan-triangulated on read.
#[derive(Debug, Clone, Default)]
pub struct ObjData {
    pub name: String,
    pub positions: Vec<Point3>,
    /// Unit length.
    pub normals: Vec<Vector3>,
    pub texture_coords: Vec<Point2>,
    pub triangles: Vec<[FaceVertex; 3]>,
}

/// Read an OBJ file.
///
/// Unknown record types are logged and skipped.
pub fn read_obj(path: impl AsRef<Path>) -> Result<ObjData> {
    let path = path.as_ref();
    let file = crate::open(path)?;
    parse_obj(BufReader::new(file), &path.display().to_string())
}

/// Parse OBJ text from `reader`. `name` labels warnings and the result.
pub fn parse_obj<R: BufRead>(reader: R, name: &str) -> Result<ObjData> {
    let mut data = ObjData {
        name: name.to_string(),
        ..Default::default()
    };
    let mut current_line = String::new();
    let mut first_line_no = 0;

    for (k, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = k + 1;
        // blank and comment lines never continue
        match line.split_whitespace().next() {
            None => continue,
            Some(token) if token.starts_with('#') => continue,
            Some(_) => {}
        }
        if current_line.is_empty() {
            first_line_no = line_no;
        }

        if let Some(head) = line.strip_suffix('\\') {
            current_line.push_str(head);
            current_line.push(' ');
            continue;
        }
        current_line.push_str(&line);

        parse_record(&current_line, first_line_no, &mut data)?;
        current_line.clear();
    }
    if !current_line.is_empty() {
        parse_record(&current_line, first_line_no, &mut data)?;
    }

    debug!(
        name,
        positions = data.positions.len(),
        normals = data.normals.len(),
        texture_coords = data.texture_coords.len(),
        triangles = data.triangles.len(),
        "parsed OBJ"
    );
    Ok(data)
}

fn parse_record(line: &str, line_no: usize, data: &mut ObjData) -> Result<()> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(()); // blank
    };
    if keyword.starts_with('#') {
        return Ok(());
    }

    match keyword {
        "v" => {
            let [x, y, z] = parse_reals::<3, _>(&mut tokens, line_no)?;
            data.positions.push(Point3::new(x, y, z));
        }
        "vn" => {
            let [x, y, z] = parse_reals::<3, _>(&mut tokens, line_no)?;
            data.normals.push(Vector3::new(x, y, z).normalize_or_zero());
        }
        "vt" => {
            let [s, t] = parse_reals::<2, _>(&mut tokens, line_no)?;
            data.texture_coords.push(Point2::new(s, t));
        }
        "f" => {
            let corners = tokens
                .map(|spec| parse_face_vertex(spec, line_no, data))
                .collect::<Result<Vec<_>>>()?;
            // fewer than three corners: not a face, ignored
            for i in 1..corners.len().saturating_sub(1) {
                data.triangles.push([corners[0], corners[i], corners[i + 1]]);
            }
        }
        other => {
            warn!(
                file = %data.name,
                line = line_no,
                record = other,
                "OBJ data unknown or not supported, ignoring"
            );
        }
    }
    Ok(())
}

fn parse_reals<'a, const N: usize, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    line_no: usize,
) -> Result<[f64; N]> {
    let mut values = [0.0; N];
    for value in values.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| CoasterError::parse(line_no, format!("expected {} numbers", N)))?;
        *value = token
            .parse()
            .map_err(|_| CoasterError::parse(line_no, format!("invalid number '{}'", token)))?;
    }
    Ok(values)
}

/// Parse `v`, `v/t`, `v//n` or `v/t/n`.
fn parse_face_vertex(spec: &str, line_no: usize, data: &ObjData) -> Result<FaceVertex> {
    let mut fields = spec.split('/');
    let position = fields
        .next()
        .ok_or_else(|| CoasterError::parse(line_no, "empty face vertex"))?;
    let texture = fields.next().filter(|s| !s.is_empty());
    let normal = fields.next().filter(|s| !s.is_empty());
    if fields.next().is_some() {
        return Err(CoasterError::parse(
            line_no,
            format!("face vertex '{}' has too many fields", spec),
        ));
    }

    Ok(FaceVertex {
        position: resolve_index(position, data.positions.len(), line_no)?,
        texture: texture
            .map(|s| resolve_index(s, data.texture_coords.len(), line_no))
            .transpose()?,
        normal: normal
            .map(|s| resolve_index(s, data.normals.len(), line_no))
            .transpose()?,
    })
}

/// Convert a one-based (or negative, relative to the latest entry) OBJ index
/// into a zero-based one.
fn resolve_index(token: &str, defined: usize, line_no: usize) -> Result<usize> {
    let raw: i64 = token
        .parse()
        .map_err(|_| CoasterError::parse(line_no, format!("invalid index '{}'", token)))?;
    let index = match raw {
        0 => None,
        r if r > 0 => Some(r as usize - 1),
        r => defined.checked_sub(r.unsigned_abs() as usize),
    };
    match index {
        Some(i) if i < defined => Ok(i),
        _ => Err(CoasterError::parse(
            line_no,
            format!("index {} out of range ({} defined)", raw, defined),
        )),
    }
}
