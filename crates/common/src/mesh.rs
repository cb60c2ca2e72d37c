use crate::types::Vertex;
use serde::{Deserialize, Serialize};

/// Errors from mesh construction.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    EmptyVertices,
    #[error("mesh has no indices")]
    EmptyIndices,
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// CPU-side triangle-list geometry: one immutable vertex list and one
/// immutable index list.
///
/// Built once at load time (from literal arrays or a parsed model file) and
/// never mutated; changing geometry means building a new `MeshData`. Meshes
/// are shared by handle across entities and have no knowledge of their users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Validate and build. Both lists must be non-empty and every index must
    /// reference an existing vertex.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::EmptyVertices);
        }
        if indices.is_empty() {
            return Err(MeshError::EmptyIndices);
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                index: bad,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices to draw with. Stored geometry is a triangle list,
    /// so this is always a multiple of 3.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
