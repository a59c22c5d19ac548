//! OBJ loader for triangulated meshes: positions, normals and faces.
//!
//! Loading is two-pass. The first pass collects `v`, `vn` and `f` records;
//! the second validates face indices and emits the de-indexed draw buffer.
//! Whether the mesh has normals is only known once every face has been seen,
//! so nothing is emitted while lines are still being read.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use glam::Vec3;

use crate::{
    error::{ObjError, ObjResult, ParseErrorKind},
    mesh::{Bounds, Mesh, Triangle, VertexLayout},
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ObjError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ObjError::Open {
            path: path.to_path_buf(),
            source,
        },
    })?;
    log::info!("Loading OBJ from {:?}", path);
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<Mesh> {
    let records = collect(reader)?;
    emit(records)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<Mesh> {
    load_obj_from_reader(io::Cursor::new(contents))
}

/// One face corner as written in the file. All indices are still 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CornerToken {
    /// `a`
    Position(u32),
    /// `a/b`
    PositionTexcoord(u32, u32),
    /// `a/b/c`
    PositionTexcoordNormal(u32, u32, u32),
    /// `a//c`
    PositionNormal(u32, u32),
}

impl CornerToken {
    fn parse(token: &str) -> Result<Self, ParseErrorKind> {
        let mut split = token.split('/');
        let position = parse_index(split.next().unwrap_or_default())?;
        let texcoord = split.next().filter(|s| !s.is_empty());
        let normal = split.next().filter(|s| !s.is_empty());
        if split.next().is_some() {
            return Err(ParseErrorKind::InvalidIndex(token.to_owned()));
        }

        Ok(match (texcoord, normal) {
            (None, None) => CornerToken::Position(position),
            (Some(t), None) => CornerToken::PositionTexcoord(position, parse_index(t)?),
            (None, Some(n)) => CornerToken::PositionNormal(position, parse_index(n)?),
            (Some(t), Some(n)) => {
                CornerToken::PositionTexcoordNormal(position, parse_index(t)?, parse_index(n)?)
            }
        })
    }
}

/// Uniform corner record every token form resolves into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Corner {
    position: u32,
    texcoord: Option<u32>,
    normal: Option<u32>,
}

impl From<CornerToken> for Corner {
    fn from(token: CornerToken) -> Self {
        let (position, texcoord, normal) = match token {
            CornerToken::Position(p) => (p, None, None),
            CornerToken::PositionTexcoord(p, t) => (p, Some(t), None),
            CornerToken::PositionTexcoordNormal(p, t, n) => (p, Some(t), Some(n)),
            CornerToken::PositionNormal(p, n) => (p, None, Some(n)),
        };
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct RawFace {
    line: usize,
    corners: [Corner; 3],
}

/// Output of the collection pass.
#[derive(Debug, Default)]
struct Records {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    faces: Vec<RawFace>,
    has_normals: bool,
}

fn collect<R: BufRead>(reader: R) -> ObjResult<Records> {
    let mut records = Records::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ObjError::Read {
            line: line_no,
            source,
        })?;

        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let p = parse_vec3(&mut parts, ["x coordinate", "y coordinate", "z coordinate"])
                    .map_err(|kind| ObjError::parse(line_no, kind))?;
                records.positions.push(p);
            }
            "vn" => {
                let n = parse_vec3(&mut parts, ["nx coordinate", "ny coordinate", "nz coordinate"])
                    .map_err(|kind| ObjError::parse(line_no, kind))?;
                records.normals.push(n);
            }
            "f" => {
                let corners = parts
                    .map(|t| CornerToken::parse(t).map(Corner::from))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|kind| ObjError::parse(line_no, kind))?;
                let corners: [Corner; 3] = corners.try_into().map_err(|c: Vec<Corner>| {
                    ObjError::parse(line_no, ParseErrorKind::CornerCount(c.len()))
                })?;

                records.has_normals |= corners.iter().any(|c| c.normal.is_some());
                records.faces.push(RawFace {
                    line: line_no,
                    corners,
                });
            }
            _ => {
                // Comments, vt, o/g/s, usemtl/mtllib and the like.
            }
        }
    }

    Ok(records)
}

fn emit(records: Records) -> ObjResult<Mesh> {
    let Records {
        positions,
        normals,
        faces: raw_faces,
        has_normals,
    } = records;

    let layout = if has_normals {
        VertexLayout::PositionNormal
    } else {
        VertexLayout::Position
    };

    let mut faces = Vec::with_capacity(raw_faces.len());
    let mut draw_buffer = Vec::with_capacity(raw_faces.len() * 3 * layout.floats_per_vertex());
    let mut texcoord_refs = 0usize;

    for face in &raw_faces {
        let fail = |kind| ObjError::parse(face.line, kind);
        let mut tri = Triangle {
            positions: [0; 3],
            normals: has_normals.then_some([0; 3]),
        };

        for (i, corner) in face.corners.iter().enumerate() {
            let p = resolve_index(corner.position, positions.len(), "position").map_err(fail)?;
            tri.positions[i] = p;
            draw_buffer.extend_from_slice(&positions[p as usize].to_array());

            if let Some(tri_normals) = tri.normals.as_mut() {
                let n = corner
                    .normal
                    .ok_or(ParseErrorKind::MissingNormal)
                    .and_then(|n| resolve_index(n, normals.len(), "normal"))
                    .map_err(fail)?;
                tri_normals[i] = n;
                draw_buffer.extend_from_slice(&normals[n as usize].to_array());
            }

            texcoord_refs += usize::from(corner.texcoord.is_some());
        }
        faces.push(tri);
    }

    let bounds = Bounds::from_points(&positions).unwrap_or_default();
    log::debug!(
        "Parsed OBJ: {} positions, {} normals, {} faces, layout {:?}, {} texcoord refs ignored",
        positions.len(),
        normals.len(),
        faces.len(),
        layout,
        texcoord_refs
    );

    Ok(Mesh {
        positions,
        normals,
        has_normals,
        faces,
        draw_buffer,
        bounds,
        center: bounds.center(),
    })
}

fn parse_vec3<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    fields: [&'static str; 3],
) -> Result<Vec3, ParseErrorKind> {
    let [x, y, z] = fields;
    Ok(Vec3::new(
        parse_f32(parts.next(), x)?,
        parse_f32(parts.next(), y)?,
        parse_f32(parts.next(), z)?,
    ))
}

fn parse_f32(value: Option<&str>, field: &'static str) -> Result<f32, ParseErrorKind> {
    let token = value.ok_or(ParseErrorKind::MissingField(field))?;
    token
        .parse::<f32>()
        .map_err(|_| ParseErrorKind::InvalidFloat {
            field,
            value: token.to_owned(),
        })
}

/// Parse a 1-based OBJ index. Relative (negative) indices are not supported.
fn parse_index(token: &str) -> Result<u32, ParseErrorKind> {
    let raw = token
        .parse::<u32>()
        .map_err(|_| ParseErrorKind::InvalidIndex(token.to_owned()))?;
    if raw == 0 {
        return Err(ParseErrorKind::ZeroIndex);
    }
    Ok(raw)
}

/// Convert a 1-based index to 0-based, checking it against `len`.
fn resolve_index(index: u32, len: usize, what: &'static str) -> Result<u32, ParseErrorKind> {
    if index as usize > len {
        return Err(ParseErrorKind::IndexOutOfRange { what, index, len });
    }
    Ok(index - 1)
}
