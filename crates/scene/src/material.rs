use crate::handle::{SamplerHandle, ShaderHandle, TextureHandle};
use serde::{Deserialize, Serialize};

/// A texture paired with the sampler used to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureBinding {
    pub texture: TextureHandle,
    pub sampler: SamplerHandle,
}

/// A material: vertex shader + pixel shader, optionally a texture binding.
///
/// Immutable after construction and shared across entities by handle; the
/// render backend interprets the shader/texture references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub vertex_shader: ShaderHandle,
    pub pixel_shader: ShaderHandle,
    pub texture: Option<TextureBinding>,
}

impl Material {
    pub fn new(vertex_shader: ShaderHandle, pixel_shader: ShaderHandle) -> Self {
        Self {
            vertex_shader,
            pixel_shader,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle, sampler: SamplerHandle) -> Self {
        self.texture = Some(TextureBinding { texture, sampler });
        self
    }
}
