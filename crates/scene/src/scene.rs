use crate::entity::Entity;
use crate::handle::{MaterialHandle, MeshHandle};
use crate::material::Material;
use glint_common::MeshData;
use serde::{Deserialize, Serialize};

/// Index into the scene's entity arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Errors from scene operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("unknown mesh handle {0:?}")]
    UnknownMesh(MeshHandle),
    #[error("unknown material handle {0:?}")]
    UnknownMaterial(MaterialHandle),
}

/// Owns all mesh data, materials, and entities for one scene.
///
/// Meshes and materials live in arena pools and are shared by handle;
/// spawning validates handles up front so draw-time lookups cannot dangle.
/// Teardown of the scene drops everything at once.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<MeshData>,
    materials: Vec<Material>,
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move mesh data into the pool and return its handle.
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(mesh);
        handle
    }

    /// Move a material into the pool and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(material);
        handle
    }

    /// Spawn an entity referencing pooled mesh and material data.
    pub fn spawn(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
    ) -> Result<EntityId, SceneError> {
        if self.mesh(mesh).is_none() {
            return Err(SceneError::UnknownMesh(mesh));
        }
        if self.material(material).is_none() {
            return Err(SceneError::UnknownMaterial(material));
        }
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(Entity::new(mesh, material));
        Ok(id)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0 as usize)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0 as usize)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0 as usize)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Per-frame sweep: recompute every entity's cached world matrix.
    /// Required before drawing; the caches are stale otherwise.
    pub fn refresh_world_matrices(&mut self) {
        for entity in &mut self.entities {
            entity.calculate_world_matrix();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ShaderHandle;
    use glam::{Mat4, Vec2, Vec3};
    use glint_common::Vertex;

    fn triangle() -> MeshData {
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let uv = Vec2::ZERO;
        MeshData::new(
            vec![
                Vertex::new(Vec3::new(0.0, 1.0, 0.0), normal, uv),
                Vertex::new(Vec3::new(1.5, -1.0, 0.0), normal, uv),
                Vertex::new(Vec3::new(-1.5, -1.0, 0.0), normal, uv),
            ],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    fn material() -> Material {
        Material::new(ShaderHandle(0), ShaderHandle(1))
    }

    #[test]
    fn entities_share_pooled_mesh_data() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(triangle());
        let mat = scene.add_material(material());

        let a = scene.spawn(mesh, mat).unwrap();
        let b = scene.spawn(mesh, mat).unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.mesh_count(), 1);

        let mesh_a = scene.entity(a).unwrap().mesh();
        let mesh_b = scene.entity(b).unwrap().mesh();
        assert_eq!(mesh_a, mesh_b);
        assert_eq!(scene.mesh(mesh_a).unwrap().index_count(), 3);
    }

    #[test]
    fn spawn_rejects_unknown_handles() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(triangle());
        let mat = scene.add_material(material());

        assert!(matches!(
            scene.spawn(MeshHandle(7), mat),
            Err(SceneError::UnknownMesh(MeshHandle(7)))
        ));
        assert!(matches!(
            scene.spawn(mesh, MaterialHandle(7)),
            Err(SceneError::UnknownMaterial(MaterialHandle(7)))
        ));
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn refresh_recomputes_all_world_matrices() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(triangle());
        let mat = scene.add_material(material());
        let a = scene.spawn(mesh, mat).unwrap();
        let b = scene.spawn(mesh, mat).unwrap();

        scene
            .entity_mut(a)
            .unwrap()
            .set_position(Vec3::new(1.0, 0.0, 0.0));
        scene
            .entity_mut(b)
            .unwrap()
            .set_position(Vec3::new(0.0, 2.0, 0.0));
        scene.refresh_world_matrices();

        assert_ne!(scene.entity(a).unwrap().world_matrix(), Mat4::IDENTITY);
        assert_ne!(scene.entity(b).unwrap().world_matrix(), Mat4::IDENTITY);
    }
}
