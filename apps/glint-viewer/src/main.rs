use anyhow::Result;
use clap::{Parser, Subcommand};
use glam::{Vec2, Vec3};
use glint_common::{MeshData, SceneLights, Vertex};
use glint_input::InputState;
use glint_model::{ModelError, ModelLoader};
use glint_render::{DebugTextRenderer, Renderer};
use glint_render_wgpu::{SceneRenderer, upload_scene_meshes};
use glint_scene::{
    Camera, EntityId, Material, SamplerHandle, Scene, ShaderHandle, TextureHandle,
};
use std::f32::consts::PI;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glint-viewer", about = "Demo driver for the glint renderer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the demo scene and step the frame loop with the text renderer
    Run {
        /// Model asset directory
        #[arg(long, default_value = "assets/models")]
        assets: String,

        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u32,

        /// Also exercise the wgpu backend against a headless device
        #[arg(long)]
        gpu: bool,
    },
}

/// Entities driven by the orbit animation, with a phase offset so they sit
/// on opposite sides of the origin.
struct Orbiter {
    id: EntityId,
    phase: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("glint-viewer v{}", env!("CARGO_PKG_VERSION"));
            println!("model: {}", glint_model::crate_info());
            println!("scene: {}", glint_scene::crate_info());
            println!("render: {}", glint_render::crate_info());
            println!("input: {}", glint_input::crate_info());
        }
        Commands::Run {
            assets,
            frames,
            gpu,
        } => {
            let loader = ModelLoader::new(&assets);
            let (mut scene, orbiters) = build_scene(&loader)?;
            tracing::info!(
                meshes = scene.mesh_count(),
                entities = scene.entity_count(),
                "scene ready"
            );

            let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), 2.0, 1280, 720);
            let mut renderer = DebugTextRenderer::new();
            let lights = SceneLights::default();

            // Fixed-step frame loop; input is a scripted snapshot standing in
            // for a platform event loop.
            let dt = 1.0 / 60.0;
            let mut total_time = 0.0f32;
            let input = InputState {
                forward: true,
                ..InputState::none()
            };

            for frame in 0..frames {
                total_time += dt;
                camera.rotate_y(1.0);
                camera.update(dt, &input);
                animate(&mut scene, &orbiters, dt, total_time);
                scene.refresh_world_matrices();

                let report = renderer.render(&scene, &camera, &lights);
                if frame == 0 || (frame + 1) % 60 == 0 {
                    println!("frame {}\n{report}", frame + 1);
                }
            }

            if gpu {
                run_gpu_pass(&scene, &camera, &lights)?;
            }
        }
    }

    Ok(())
}

/// Assemble the demo scene: two inline meshes, up to two loaded models, two
/// shared materials.
fn build_scene(loader: &ModelLoader) -> Result<(Scene, Vec<Orbiter>)> {
    let mut scene = Scene::new();

    let basic = scene.add_material(Material::new(ShaderHandle(0), ShaderHandle(1)));
    let metal = scene.add_material(
        Material::new(ShaderHandle(0), ShaderHandle(1))
            .with_texture(TextureHandle(0), SamplerHandle(0)),
    );

    let triangle = scene.add_mesh(inline_triangle()?);
    let quad = scene.add_mesh(inline_quad()?);

    let mut orbiters = Vec::new();
    let tri_entity = scene.spawn(triangle, basic)?;
    orbiters.push(Orbiter {
        id: tri_entity,
        phase: 0.0,
    });
    let quad_entity = scene.spawn(quad, basic)?;
    orbiters.push(Orbiter {
        id: quad_entity,
        phase: PI,
    });

    // Missing model files are recoverable: warn and leave them out.
    if let Some(cone) = load_optional(loader, "cone.obj")? {
        let mesh = scene.add_mesh(cone);
        scene.spawn(mesh, basic)?;
    }
    if let Some(cube) = load_optional(loader, "cube.obj")? {
        let mesh = scene.add_mesh(cube);
        let id = scene.spawn(mesh, metal)?;
        scene
            .entity_mut(id)
            .expect("just spawned")
            .set_position(Vec3::new(4.0, 0.0, 0.0));
    }

    Ok((scene, orbiters))
}

fn load_optional(loader: &ModelLoader, name: &str) -> Result<Option<MeshData>> {
    match loader.load(name) {
        Ok(mesh) => {
            tracing::info!(
                name,
                vertices = mesh.vertex_count(),
                indices = mesh.index_count(),
                "model loaded"
            );
            Ok(Some(mesh))
        }
        Err(ModelError::Open { path, source }) => {
            tracing::warn!(path = %path.display(), %source, "model file unavailable; skipping");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn inline_triangle() -> Result<MeshData> {
    let normal = Vec3::new(0.0, 0.0, -1.0);
    let uv = Vec2::ZERO;
    Ok(MeshData::new(
        vec![
            Vertex::new(Vec3::new(0.0, 1.0, 0.0), normal, uv),
            Vertex::new(Vec3::new(1.5, -1.0, 0.0), normal, uv),
            Vertex::new(Vec3::new(-1.5, -1.0, 0.0), normal, uv),
        ],
        vec![0, 1, 2],
    )?)
}

fn inline_quad() -> Result<MeshData> {
    let normal = Vec3::new(0.0, 0.0, -1.0);
    let uv = Vec2::ZERO;
    Ok(MeshData::new(
        vec![
            Vertex::new(Vec3::new(0.0, 0.87, 0.0), normal, uv),
            Vertex::new(Vec3::new(0.5, 0.0, 0.0), normal, uv),
            Vertex::new(Vec3::new(-0.5, 0.0, 0.0), normal, uv),
            Vertex::new(Vec3::new(0.0, -0.87, 0.0), normal, uv),
        ],
        vec![2, 0, 1, 2, 1, 3],
    )?)
}

/// The orbit animation: advance each orbiter's angle, pulse its scale, spin
/// it about Z, and translate it around the origin.
fn animate(scene: &mut Scene, orbiters: &[Orbiter], dt: f32, total_time: f32) {
    let orbit_speed = PI / 5.0;
    let pulse = ((total_time * 3.0).sin() + 2.0) / 10.0;

    for orbiter in orbiters {
        let Some(entity) = scene.entity_mut(orbiter.id) else {
            continue;
        };
        entity.advance_angle_from_origin(orbit_speed * dt);
        let angle = entity.angle_from_origin() + orbiter.phase;
        entity.set_uniform_scale(pulse);
        entity.set_rotation_z(total_time);
        entity.set_translation(2.0 * angle.cos(), 2.0 * angle.sin());
    }
}

/// Headless wgpu pass: upload the scene's meshes and draw one frame into an
/// offscreen target. Skipped with a warning when no adapter exists.
fn run_gpu_pass(scene: &Scene, camera: &Camera, lights: &SceneLights) -> Result<()> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let Some(adapter) = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    })) else {
        tracing::warn!("no gpu adapter available; skipping gpu pass");
        return Ok(());
    };

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("glint_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
        },
        None,
    ))?;

    let (width, height) = (1280u32, 720u32);
    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let renderer = SceneRenderer::new(&device, format, width, height);
    let meshes = upload_scene_meshes(&device, scene);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen_target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&Default::default());

    renderer.render(&device, &queue, &view, scene, &meshes, camera, lights);
    let _ = device.poll(wgpu::Maintain::Wait);
    tracing::info!(
        backend = adapter.get_info().backend.to_str(),
        meshes = meshes.len(),
        "gpu pass complete"
    );

    Ok(())
}
