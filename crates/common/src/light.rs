use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A directional light: plain data handed to the shader binding each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
            diffuse: Vec4::ONE,
            direction: Vec3::new(1.0, -1.0, 0.0),
        }
    }
}

/// The two directional lights the demo uploads with every draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLights {
    pub light_one: DirectionalLight,
    pub light_two: DirectionalLight,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            light_one: DirectionalLight {
                diffuse: Vec4::new(0.5, 0.5, 1.0, 1.0),
                ..DirectionalLight::default()
            },
            light_two: DirectionalLight::default(),
        }
    }
}
