//! Scene state: entities, camera, and arena-indexed mesh/material pools.
//!
//! # Invariants
//! - Mesh and material data live only in the scene pools; entities reference
//!   them by handle and never own copies.
//! - World and view matrices are derived caches, stale until the explicit
//!   per-frame recomputation step.
//! - Angle accumulators stay inside (-2π, 2π).

pub mod camera;
pub mod entity;
pub mod handle;
pub mod material;
pub mod scene;

pub use camera::Camera;
pub use entity::Entity;
pub use handle::{MaterialHandle, MeshHandle, SamplerHandle, ShaderHandle, TextureHandle};
pub use material::{Material, TextureBinding};
pub use scene::{EntityId, Scene, SceneError};

pub fn crate_info() -> &'static str {
    "glint-scene v0.1.0"
}
