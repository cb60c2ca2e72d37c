use glam::Mat4;
use glint_common::DirectionalLight;
use std::collections::BTreeMap;

/// The shader binding collaborator: named constant uploads plus a
/// commit-then-activate step.
///
/// `set_*` calls only stage data; nothing reaches the shader until `apply`,
/// which commits all pending uploads and activates the binding for the next
/// draw. Skipping `apply` loses the staged values.
pub trait ShaderBinding {
    fn set_matrix(&mut self, name: &str, value: Mat4);
    fn set_light(&mut self, name: &str, light: &DirectionalLight);
    /// Commit all pending uploads, then activate.
    fn apply(&mut self);
}

/// In-memory shader binding that records committed uploads.
///
/// Backs the debug text renderer and lets transform/upload code be tested
/// without a GPU.
#[derive(Debug, Default)]
pub struct RecordingBinding {
    staged_matrices: BTreeMap<String, Mat4>,
    staged_lights: BTreeMap<String, DirectionalLight>,
    matrices: BTreeMap<String, Mat4>,
    lights: BTreeMap<String, DirectionalLight>,
    activations: usize,
}

impl RecordingBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// A committed matrix by name (staged-only values are not visible).
    pub fn matrix(&self, name: &str) -> Option<Mat4> {
        self.matrices.get(name).copied()
    }

    /// A committed light by name.
    pub fn light(&self, name: &str) -> Option<DirectionalLight> {
        self.lights.get(name).copied()
    }

    /// How many times `apply` has activated this binding.
    pub fn activations(&self) -> usize {
        self.activations
    }
}

impl ShaderBinding for RecordingBinding {
    fn set_matrix(&mut self, name: &str, value: Mat4) {
        self.staged_matrices.insert(name.to_owned(), value);
    }

    fn set_light(&mut self, name: &str, light: &DirectionalLight) {
        self.staged_lights.insert(name.to_owned(), *light);
    }

    fn apply(&mut self) {
        self.matrices.extend(std::mem::take(&mut self.staged_matrices));
        self.lights.extend(std::mem::take(&mut self.staged_lights));
        self.activations += 1;
    }
}
