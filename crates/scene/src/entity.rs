use crate::handle::{MaterialHandle, MeshHandle};
use glam::{Mat4, Vec3};
use glint_common::wrap_angle;

/// A drawable object: transform state plus mesh/material references.
///
/// The world matrix is a derived cache. Game logic mutates position,
/// rotation, and scale freely between frames; `calculate_world_matrix` must
/// run once per frame before the entity is drawn, otherwise the cached
/// matrix is stale.
#[derive(Debug, Clone)]
pub struct Entity {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    world: Mat4,
    angle_from_origin: f32,
    mesh: MeshHandle,
    material: MaterialHandle,
}

impl Entity {
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
            angle_from_origin: 0.0,
            mesh,
            material,
        }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Same factor on all three axes.
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vec3::splat(scale));
    }

    /// Rotation about Z only; clears any X/Y rotation.
    pub fn set_rotation_z(&mut self, z: f32) {
        self.set_rotation(Vec3::new(0.0, 0.0, z));
    }

    /// Move in the XY plane, keeping the current Z.
    pub fn set_translation(&mut self, x: f32, y: f32) {
        self.set_position(Vec3::new(x, y, self.position.z));
    }

    /// Advance the orbit-angle accumulator, wrapped into (-2π, 2π).
    pub fn advance_angle_from_origin(&mut self, delta: f32) {
        self.angle_from_origin = wrap_angle(self.angle_from_origin + delta);
    }

    pub fn angle_from_origin(&self) -> f32 {
        self.angle_from_origin
    }

    /// The cached world matrix as of the last `calculate_world_matrix` call.
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Recompute the world matrix: scale, then Z rotation, then translation,
    /// stored transposed for the row-vector shading convention.
    pub fn calculate_world_matrix(&mut self) {
        let world = Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale);
        self.world = world.transpose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn entity() -> Entity {
        Entity::new(MeshHandle(0), MaterialHandle(0))
    }

    #[test]
    fn translation_only_gives_transposed_translation_matrix() {
        let mut e = entity();
        e.set_position(Vec3::new(2.0, 3.0, 0.0));
        e.calculate_world_matrix();

        let m = e.world_matrix();
        assert_eq!(m.x_axis, Vec4::new(1.0, 0.0, 0.0, 2.0));
        assert_eq!(m.y_axis, Vec4::new(0.0, 1.0, 0.0, 3.0));
        assert_eq!(m.z_axis, Vec4::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(m.w_axis, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn uniform_scale_only_gives_pure_scale_matrix() {
        let mut e = entity();
        e.set_uniform_scale(2.0);
        e.calculate_world_matrix();

        let m = e.world_matrix();
        assert_eq!(m.x_axis, Vec4::new(2.0, 0.0, 0.0, 0.0));
        assert_eq!(m.y_axis, Vec4::new(0.0, 2.0, 0.0, 0.0));
        assert_eq!(m.z_axis, Vec4::new(0.0, 0.0, 2.0, 0.0));
        assert_eq!(m.w_axis, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn composition_applies_scale_then_rotation_then_translation() {
        let mut e = entity();
        e.set_uniform_scale(2.0);
        e.set_rotation_z(FRAC_PI_2);
        e.set_translation(5.0, 0.0);
        e.calculate_world_matrix();

        // A local +X point scales to (2,0,0), rotates to (0,2,0), then
        // translates to (5,2,0). The stored matrix is transposed, so
        // transform with a row vector on the left.
        let local = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let m = e.world_matrix();
        let world = Vec4::new(
            local.dot(m.x_axis),
            local.dot(m.y_axis),
            local.dot(m.z_axis),
            local.dot(m.w_axis),
        );
        assert!((world - Vec4::new(5.0, 2.0, 0.0, 1.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn world_matrix_is_stale_until_recomputed() {
        let mut e = entity();
        e.set_position(Vec3::new(9.0, 0.0, 0.0));
        assert_eq!(e.world_matrix(), Mat4::IDENTITY);

        e.calculate_world_matrix();
        assert_ne!(e.world_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn set_rotation_z_clears_other_axes() {
        let mut e = entity();
        e.set_rotation(Vec3::new(1.0, 2.0, 3.0));
        e.set_rotation_z(0.5);
        assert_eq!(e.rotation(), Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn set_translation_preserves_z() {
        let mut e = entity();
        e.set_position(Vec3::new(0.0, 0.0, 7.0));
        e.set_translation(1.0, 2.0);
        assert_eq!(e.position(), Vec3::new(1.0, 2.0, 7.0));
    }

    #[test]
    fn angle_from_origin_wraps_past_a_full_turn() {
        let mut e = entity();
        e.advance_angle_from_origin(3.0 * FRAC_PI_2);
        e.advance_angle_from_origin(PI);
        // 3π/2 + π = 5π/2, wrapped by exactly 2π.
        assert!((e.angle_from_origin() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn angle_from_origin_wraps_negative_overflow() {
        let mut e = entity();
        e.advance_angle_from_origin(-3.0 * FRAC_PI_2);
        e.advance_angle_from_origin(-PI);
        assert!((e.angle_from_origin() + FRAC_PI_2).abs() < 1e-5);
        assert!(e.angle_from_origin() > -TAU);
    }
}
