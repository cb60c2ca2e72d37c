use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// A single mesh vertex: position, normal, texture coordinate.
///
/// Laid out `#[repr(C)]` so vertex lists can be uploaded to the GPU as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, texcoord: Vec2) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }
}

/// Wrap an angle accumulator back into (-2π, 2π).
///
/// A single ±2π adjustment: callers accumulate small per-frame deltas, so one
/// step is always enough to undo an overflow.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle;
    if wrapped > TAU {
        wrapped -= TAU;
    }
    if wrapped < -TAU {
        wrapped += TAU;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        // position (12) + normal (12) + texcoord (8)
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn wrap_angle_passes_small_angles_through() {
        assert_eq!(wrap_angle(1.5), 1.5);
        assert_eq!(wrap_angle(-1.5), -1.5);
    }

    #[test]
    fn wrap_angle_subtracts_exactly_one_turn() {
        let overflow = TAU + 0.25;
        assert!((wrap_angle(overflow) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn wrap_angle_adds_exactly_one_turn() {
        let underflow = -TAU - 0.25;
        assert!((wrap_angle(underflow) + 0.25).abs() < 1e-6);
    }
}
