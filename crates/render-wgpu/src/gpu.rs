use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glint_common::{DirectionalLight, MeshData, SceneLights, Vertex};
use glint_scene::{Camera, Scene};
use wgpu::util::DeviceExt;

/// Per-object shader constants. All three matrices are pre-transposed.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    world: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightRaw {
    ambient: [f32; 4],
    diffuse: [f32; 4],
    direction: [f32; 3],
    _pad: f32,
}

impl From<&DirectionalLight> for LightRaw {
    fn from(light: &DirectionalLight) -> Self {
        Self {
            ambient: light.ambient.to_array(),
            diffuse: light.diffuse.to_array(),
            direction: light.direction.to_array(),
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightsUniform {
    light_one: LightRaw,
    light_two: LightRaw,
}

impl From<&SceneLights> for LightsUniform {
    fn from(lights: &SceneLights) -> Self {
        Self {
            light_one: (&lights.light_one).into(),
            light_two: (&lights.light_two).into(),
        }
    }
}

/// Uniform slices are spaced at the conservative dynamic-offset alignment.
const OBJECT_STRIDE: u64 = 256;

/// GPU-resident triangle-list geometry: a vertex buffer, an index buffer,
/// and the stored index count. Both buffers are write-once.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Build both buffers from validated mesh data. There is no update path;
    /// changed geometry means constructing a new `GpuMesh`.
    pub fn new(device: &wgpu::Device, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(data.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(data.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.index_count(),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Upload every pooled scene mesh; the result is indexed by mesh handle.
pub fn upload_scene_meshes(device: &wgpu::Device, scene: &Scene) -> Vec<GpuMesh> {
    let mut meshes = Vec::with_capacity(scene.mesh_count());
    for i in 0..scene.mesh_count() {
        let handle = glint_scene::MeshHandle(i as u32);
        if let Some(data) = scene.mesh(handle) {
            meshes.push(GpuMesh::new(device, data));
        }
    }
    tracing::debug!(count = meshes.len(), "uploaded scene meshes");
    meshes
}

/// wgpu scene renderer: one lit, depth-tested draw per entity.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    object_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    max_objects: u32,
    depth_texture: wgpu::TextureView,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let max_objects = 1024u32;

        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniform_buffer"),
            size: max_objects as u64 * OBJECT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lights_uniform_buffer"),
            contents: bytemuck::bytes_of(&LightsUniform::from(&SceneLights::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &object_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Converted geometry is clockwise-front in the left-handed
                // convention.
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            object_buffer,
            lights_buffer,
            bind_group,
            max_objects,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame into `target`: clear, then one draw per entity.
    ///
    /// World matrices must already be refreshed for this frame; the renderer
    /// reads the cached values.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        meshes: &[GpuMesh],
        camera: &Camera,
        lights: &SceneLights,
    ) {
        queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::bytes_of(&LightsUniform::from(lights)),
        );

        let entities = scene.entities();
        if entities.len() > self.max_objects as usize {
            tracing::warn!(
                entities = entities.len(),
                max = self.max_objects,
                "entity count exceeds uniform capacity; extras are not drawn"
            );
        }
        let drawn = entities.len().min(self.max_objects as usize);

        let view = camera.view_matrix().to_cols_array_2d();
        let projection = camera.projection_matrix().to_cols_array_2d();
        for (i, entity) in entities.iter().take(drawn).enumerate() {
            let uniforms = ObjectUniforms {
                world: entity.world_matrix().to_cols_array_2d(),
                view,
                projection,
            };
            queue.write_buffer(
                &self.object_buffer,
                i as u64 * OBJECT_STRIDE,
                bytemuck::bytes_of(&uniforms),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.4,
                            g: 0.6,
                            b: 0.75,
                            a: 0.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            for (i, entity) in entities.iter().take(drawn).enumerate() {
                let Some(mesh) = meshes.get(entity.mesh().0 as usize) else {
                    tracing::warn!(handle = entity.mesh().0, "entity references unuploaded mesh");
                    continue;
                };
                let offset = (i as u64 * OBJECT_STRIDE) as u32;
                pass.set_bind_group(0, &self.bind_group, &[offset]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn uniform_structs_match_wgsl_layout() {
        // Three mat4x4 slots.
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 192);
        // Two 48-byte light structs.
        assert_eq!(std::mem::size_of::<LightRaw>(), 48);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 96);
        assert!(std::mem::size_of::<ObjectUniforms>() as u64 <= OBJECT_STRIDE);
    }

    #[test]
    fn light_conversion_preserves_fields() {
        let light = DirectionalLight {
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
            diffuse: Vec4::new(0.5, 0.5, 1.0, 1.0),
            direction: Vec3::new(1.0, -1.0, 0.0),
        };
        let raw = LightRaw::from(&light);
        assert_eq!(raw.ambient, [0.1, 0.1, 0.1, 1.0]);
        assert_eq!(raw.diffuse, [0.5, 0.5, 1.0, 1.0]);
        assert_eq!(raw.direction, [1.0, -1.0, 0.0]);
    }
}
