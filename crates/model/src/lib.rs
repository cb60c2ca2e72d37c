//! Model file loader: parses a line-oriented wavefront-style text format into
//! triangle-list [`MeshData`].
//!
//! Models are authored in a right-handed space with a bottom-left UV origin;
//! the renderer is left-handed with a top-left UV origin. The loader converts
//! at parse time: position/normal Z is negated, V is inverted, and face
//! winding is reversed. Every face corner becomes a fresh vertex (no
//! welding), so the emitted index buffer is always `0..3N` for N triangles.
//!
//! # Invariants
//! - Emitted indices are sequential and always in range for the vertex list.
//! - Face directives never read outside the position/normal/UV tables; an
//!   out-of-range reference fails the whole load.

use glam::{Vec2, Vec3};
use glint_common::{MeshData, MeshError, Vertex};
use std::path::{Path, PathBuf};

/// Errors from model loading.
///
/// `Open` is the recoverable case (caller decides whether to abort or
/// substitute); everything else is a fatal input-data error.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to open model file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed face directive on line {line}")]
    MalformedFace { line: usize },
    #[error("face index {index} out of range for {table} table of length {len} on line {line}")]
    IndexOutOfRange {
        line: usize,
        table: &'static str,
        index: usize,
        len: usize,
    },
    #[error("model contains no face data")]
    NoGeometry,
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Loads model files from a base directory.
///
/// The directory comes from configuration (the demo binary's `--assets`
/// flag); file names are supplied per model.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    base_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Read and parse `name` relative to the base directory.
    pub fn load(&self, name: &str) -> Result<MeshData, ModelError> {
        let path = self.base_dir.join(name);
        let text = std::fs::read_to_string(&path).map_err(|source| ModelError::Open {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "parsing model file");
        parse_model(&text)
    }
}

/// One `p/t/n` face corner, still 1-based as written in the file.
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: usize,
    texcoord: usize,
    normal: usize,
}

fn parse_corner(token: &str) -> Option<Corner> {
    let mut parts = token.split('/');
    let position = parts.next()?.parse().ok()?;
    let texcoord = parts.next()?.parse().ok()?;
    let normal = parts.next()?.parse().ok()?;
    Some(Corner {
        position,
        texcoord,
        normal,
    })
}

fn lookup<T: Copy>(
    table: &[T],
    index: usize,
    name: &'static str,
    line: usize,
) -> Result<T, ModelError> {
    // Source indices are 1-based.
    index
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .ok_or(ModelError::IndexOutOfRange {
            line,
            table: name,
            index,
            len: table.len(),
        })
}

/// Parse model text into validated mesh data.
///
/// Recognized directives: `v x y z`, `vn x y z`, `vt u v`, and
/// `f p/t/n p/t/n p/t/n [p/t/n]` (quads become two triangles sharing the
/// v1-v3 diagonal). Unrecognized or unparsable non-face lines are skipped;
/// a face line that is truncated or references a missing table entry fails
/// the load.
pub fn parse_model(text: &str) -> Result<MeshData, ModelError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<Vec2> = Vec::new();
    let mut vertices: Vec<Vertex> = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        let line_no = line_index + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => match parse_three(&mut tokens) {
                Some(v) => positions.push(v),
                None => tracing::debug!(line = line_no, "skipping malformed position line"),
            },
            Some("vn") => match parse_three(&mut tokens) {
                Some(v) => normals.push(v),
                None => tracing::debug!(line = line_no, "skipping malformed normal line"),
            },
            Some("vt") => match parse_two(&mut tokens) {
                Some(v) => uvs.push(v),
                None => tracing::debug!(line = line_no, "skipping malformed uv line"),
            },
            Some("f") => {
                let corners = tokens
                    .take(4)
                    .map(parse_corner)
                    .collect::<Option<Vec<Corner>>>()
                    .ok_or(ModelError::MalformedFace { line: line_no })?;
                if corners.len() < 3 {
                    return Err(ModelError::MalformedFace { line: line_no });
                }

                let resolve = |corner: Corner| -> Result<Vertex, ModelError> {
                    let mut position = lookup(&positions, corner.position, "position", line_no)?;
                    let mut uv = lookup(&uvs, corner.texcoord, "texcoord", line_no)?;
                    let mut normal = lookup(&normals, corner.normal, "normal", line_no)?;
                    // Right-handed to left-handed: negate Z, flip V to the
                    // top-left UV origin. Winding is reversed on emit below.
                    position.z = -position.z;
                    normal.z = -normal.z;
                    uv.y = 1.0 - uv.y;
                    Ok(Vertex::new(position, normal, uv))
                };

                let v1 = resolve(corners[0])?;
                let v2 = resolve(corners[1])?;
                let v3 = resolve(corners[2])?;
                vertices.extend([v1, v3, v2]);

                if let Some(&fourth) = corners.get(3) {
                    let v4 = resolve(fourth)?;
                    vertices.extend([v1, v4, v3]);
                }
            }
            _ => {}
        }
    }

    if vertices.is_empty() {
        return Err(ModelError::NoGeometry);
    }

    let indices: Vec<u32> = (0..vertices.len() as u32).collect();
    Ok(MeshData::new(vertices, indices)?)
}

pub fn crate_info() -> &'static str {
    "glint-model v0.1.0"
}

fn parse_three(tokens: &mut std::str::SplitWhitespace<'_>) -> Option<Vec3> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

fn parse_two(tokens: &mut std::str::SplitWhitespace<'_>) -> Option<Vec2> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    Some(Vec2::new(x, y))
}
