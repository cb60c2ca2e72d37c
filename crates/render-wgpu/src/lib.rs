//! wgpu render backend for the glint demo.
//!
//! Uploads scene meshes into write-once GPU buffers and draws each entity
//! with its own uniform slice (world/view/projection + two directional
//! lights), one draw call per entity.
//!
//! # Invariants
//! - Mesh buffers are created once with their data and never written again;
//!   new geometry means a new [`GpuMesh`].
//! - Matrices arrive already transposed (row-vector convention); the WGSL
//!   side multiplies vectors from the left.
//! - The backend never owns a window or surface; callers hand it a target
//!   texture view.

mod gpu;
mod shaders;

pub use gpu::{GpuMesh, SceneRenderer, upload_scene_meshes};
