use crate::binding::{RecordingBinding, ShaderBinding};
use glam::Mat4;
use glint_common::SceneLights;
use glint_scene::{Camera, Scene};

/// Upload one object's constants: world/view/projection plus both lights,
/// then commit and activate. Called once per entity per frame.
pub fn prepare_object(
    binding: &mut dyn ShaderBinding,
    world: Mat4,
    view: Mat4,
    projection: Mat4,
    lights: &SceneLights,
) {
    binding.set_matrix("world", world);
    binding.set_matrix("view", view);
    binding.set_matrix("projection", projection);
    binding.set_light("light_one", &lights.light_one);
    binding.set_light("light_two", &lights.light_two);
    binding.apply();
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// Renderers read scene state and the camera's cached matrices; the frame
/// loop refreshes world matrices before calling in.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene, camera, and lights.
    fn render(&mut self, scene: &Scene, camera: &Camera, lights: &SceneLights) -> Self::Output;
}

/// Debug text renderer: the surface-free render backend.
///
/// Runs the full per-object upload path through a [`RecordingBinding`] and
/// produces a human-readable report of the frame. Useful for CLI output,
/// logging, and testing the draw loop without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    binding: RecordingBinding,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding state after the most recent frame.
    pub fn binding(&self) -> &RecordingBinding {
        &self.binding
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, camera: &Camera, lights: &SceneLights) -> String {
        let mut out = String::new();
        let pos = camera.position();
        let facing = camera.facing();
        out.push_str(&format!(
            "=== Frame (entities={}) ===\n",
            scene.entity_count()
        ));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) facing=({:.2}, {:.2}, {:.2})\n",
            pos.x, pos.y, pos.z, facing.x, facing.y, facing.z
        ));

        for (i, entity) in scene.entities().iter().enumerate() {
            let Some(mesh) = scene.mesh(entity.mesh()) else {
                continue;
            };
            let Some(material) = scene.material(entity.material()) else {
                continue;
            };
            prepare_object(
                &mut self.binding,
                entity.world_matrix(),
                camera.view_matrix(),
                camera.projection_matrix(),
                lights,
            );
            let p = entity.position();
            out.push_str(&format!(
                "  [{i}] draw indices={} mesh={} material={} textured={} pos=({:.2}, {:.2}, {:.2})\n",
                mesh.index_count(),
                entity.mesh().0,
                entity.material().0,
                material.texture.is_some(),
                p.x,
                p.y,
                p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use glint_common::{MeshData, Vertex};
    use glint_input::InputState;
    use glint_scene::{Material, ShaderHandle};

    fn demo_scene() -> Scene {
        let mut scene = Scene::new();
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let uv = Vec2::ZERO;
        let mesh = scene.add_mesh(
            MeshData::new(
                vec![
                    Vertex::new(Vec3::new(0.0, 1.0, 0.0), normal, uv),
                    Vertex::new(Vec3::new(1.5, -1.0, 0.0), normal, uv),
                    Vertex::new(Vec3::new(-1.5, -1.0, 0.0), normal, uv),
                ],
                vec![0, 1, 2],
            )
            .unwrap(),
        );
        let material = scene.add_material(Material::new(ShaderHandle(0), ShaderHandle(1)));
        scene.spawn(mesh, material).unwrap();
        scene.spawn(mesh, material).unwrap();
        scene
    }

    fn demo_camera() -> Camera {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), 2.0, 1280, 720);
        camera.update(0.0, &InputState::none());
        camera
    }

    #[test]
    fn frame_report_lists_every_draw() {
        let mut scene = demo_scene();
        scene.refresh_world_matrices();
        let camera = demo_camera();

        let mut renderer = DebugTextRenderer::new();
        let out = renderer.render(&scene, &camera, &SceneLights::default());
        assert!(out.contains("entities=2"));
        assert!(out.contains("[1] draw indices=3"));
    }

    #[test]
    fn each_draw_commits_constants_through_the_binding() {
        let mut scene = demo_scene();
        scene.refresh_world_matrices();
        let camera = demo_camera();
        let lights = SceneLights::default();

        let mut renderer = DebugTextRenderer::new();
        renderer.render(&scene, &camera, &lights);

        let binding = renderer.binding();
        assert_eq!(binding.activations(), 2);
        assert_eq!(binding.matrix("view"), Some(camera.view_matrix()));
        assert_eq!(binding.matrix("projection"), Some(camera.projection_matrix()));
        assert_eq!(
            binding.matrix("world"),
            Some(scene.entities()[1].world_matrix())
        );
        assert_eq!(binding.light("light_one"), Some(lights.light_one));
        assert_eq!(binding.light("light_two"), Some(lights.light_two));
    }

    #[test]
    fn empty_scene_renders_header_only() {
        let scene = Scene::new();
        let camera = demo_camera();
        let mut renderer = DebugTextRenderer::new();
        let out = renderer.render(&scene, &camera, &SceneLights::default());
        assert!(out.contains("entities=0"));
        assert!(!out.contains("draw"));
    }
}
