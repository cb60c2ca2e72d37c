//! Shared data types for the glint rendering demo.
//!
//! # Invariants
//! - `MeshData` index lists always reference valid vertices (checked at
//!   construction, never after).
//! - Angle accumulators elsewhere in the workspace stay inside (-2π, 2π) by
//!   going through [`wrap_angle`].

pub mod light;
pub mod mesh;
pub mod types;

pub use light::{DirectionalLight, SceneLights};
pub use mesh::{MeshData, MeshError};
pub use types::{Vertex, wrap_angle};
