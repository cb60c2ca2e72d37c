use glam::{EulerRot, Mat4, Quat, Vec3};
use glint_common::wrap_angle;
use glint_input::InputState;
use std::f32::consts::FRAC_PI_4;

/// Fly camera: position plus a look direction derived from pitch/yaw.
///
/// Rotation accumulates from raw pixel deltas scaled by a fixed rotation
/// speed. `update` is a direct Euler integration step driven by an input
/// snapshot; the view matrix is rebuilt there and is stale in between.
/// `resize` must be called whenever the output surface changes size.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    base_direction: Vec3,
    up: Vec3,
    facing: Vec3,
    pitch: f32,
    yaw: f32,
    move_speed: f32,
    rotation_speed: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Radians of rotation per pixel of mouse travel.
    pub const ROTATION_SPEED: f32 = 0.003;

    pub fn new(position: Vec3, move_speed: f32, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position,
            base_direction: Vec3::Z,
            up: Vec3::Y,
            facing: Vec3::Z,
            pitch: 0.0,
            yaw: 0.0,
            move_speed,
            rotation_speed: Self::ROTATION_SPEED,
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.resize(width, height);
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Facing vector as of the last `update`.
    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// View matrix as of the last `update`, stored transposed.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix as of the last `resize`, stored transposed.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Accumulate pitch from a vertical pixel delta.
    pub fn rotate_x(&mut self, pixels: f32) {
        self.pitch = wrap_angle(self.pitch + pixels * self.rotation_speed);
    }

    /// Accumulate yaw from a horizontal pixel delta.
    pub fn rotate_y(&mut self, pixels: f32) {
        self.yaw = wrap_angle(self.yaw + pixels * self.rotation_speed);
    }

    /// Per-frame step: recompute facing from pitch/yaw, advance position from
    /// the input snapshot, rebuild the view matrix (look-direction, stored
    /// transposed).
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        self.facing = (rotation * self.base_direction).normalize();

        let step = self.move_speed * dt;
        if input.forward {
            self.position += self.facing * step;
        }
        if input.backward {
            self.position -= self.facing * step;
        }
        // Points right in the left-handed frame.
        let strafe = self.up.cross(self.facing);
        if input.strafe_left {
            self.position -= strafe * step;
        }
        if input.strafe_right {
            self.position += strafe * step;
        }
        if input.ascend {
            self.position.y += step;
        }
        if input.descend {
            self.position.y -= step;
        }

        self.view = Mat4::look_to_lh(self.position, self.facing, self.up).transpose();
    }

    /// Rebuild the projection for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let aspect = width as f32 / height.max(1) as f32;
        self.projection = Mat4::perspective_lh(self.fov_y, aspect, self.near, self.far).transpose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -5.0), 2.0, 1280, 720)
    }

    #[test]
    fn update_without_input_only_rebuilds_view() {
        let mut cam = camera();
        cam.update(1.0 / 60.0, &InputState::none());
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(cam.facing(), Vec3::Z);
        let expected = Mat4::look_to_lh(cam.position(), Vec3::Z, Vec3::Y).transpose();
        assert_eq!(cam.view_matrix(), expected);
    }

    #[test]
    fn forward_moves_along_facing() {
        let mut cam = camera();
        let input = InputState {
            forward: true,
            ..InputState::none()
        };
        cam.update(0.5, &input);
        // move_speed 2.0 * dt 0.5 along +Z.
        assert!((cam.position() - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn strafe_right_moves_along_cross_of_up_and_facing() {
        let mut cam = camera();
        let input = InputState {
            strafe_right: true,
            ..InputState::none()
        };
        cam.update(0.5, &input);
        assert!((cam.position() - Vec3::new(1.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn ascend_and_descend_move_along_world_y() {
        let mut cam = camera();
        let input = InputState {
            ascend: true,
            ..InputState::none()
        };
        cam.update(1.0, &input);
        assert!((cam.position().y - 2.0).abs() < 1e-5);

        let input = InputState {
            descend: true,
            ..InputState::none()
        };
        cam.update(1.0, &input);
        assert!(cam.position().y.abs() < 1e-5);
    }

    #[test]
    fn quarter_turn_yaw_faces_positive_x() {
        let mut cam = camera();
        cam.rotate_y(FRAC_PI_2 / Camera::ROTATION_SPEED);
        cam.update(0.0, &InputState::none());
        assert!((cam.facing() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn pitch_up_tilts_facing_downward_in_screen_terms() {
        // Positive vertical pixel deltas (mouse moving down) pitch the view
        // down: facing gains a negative Y component.
        let mut cam = camera();
        cam.rotate_x(FRAC_PI_2 / 2.0 / Camera::ROTATION_SPEED);
        cam.update(0.0, &InputState::none());
        assert!(cam.facing().y < 0.0);
        assert!(cam.facing().z > 0.0);
    }

    #[test]
    fn rotation_accumulator_returns_to_start_after_a_full_turn() {
        let mut cam = camera();
        let quarter = (TAU / 4.0) / Camera::ROTATION_SPEED;
        for _ in 0..4 {
            cam.rotate_y(quarter);
        }
        // Deltas summing to 2π leave the accumulator at 0 modulo a full turn.
        let residual = cam.yaw().abs().min((cam.yaw().abs() - TAU).abs());
        assert!(residual < 1e-3, "yaw residual {}", cam.yaw());

        cam.update(0.0, &InputState::none());
        assert!((cam.facing() - Vec3::Z).length() < 1e-3);
    }

    #[test]
    fn rotation_accumulator_wraps_by_exactly_one_turn() {
        let mut cam = camera();
        cam.rotate_x((TAU * 0.75) / Camera::ROTATION_SPEED);
        cam.rotate_x((TAU * 0.5) / Camera::ROTATION_SPEED);
        // 1.25 turns wraps once, landing on a quarter turn.
        assert!((cam.pitch() - TAU * 0.25).abs() < 1e-3);
    }

    #[test]
    fn resize_rebuilds_projection() {
        let mut cam = camera();
        let wide = cam.projection_matrix();
        cam.resize(720, 1280);
        assert_ne!(cam.projection_matrix(), wide);
    }
}
