//! Rendering adapter: renderer-agnostic interface over scene state.
//!
//! # Invariants
//! - Renderers read scene state; world-matrix refresh happens before render,
//!   in the frame loop.
//! - Every draw uploads `world`, `view`, `projection` and both light structs
//!   through a [`ShaderBinding`], then commits and activates.
//!
//! The [`DebugTextRenderer`] is the surface-free backend: it runs the same
//! per-object upload path as a GPU backend and reports what it drew.

mod binding;
mod renderer;

pub use binding::{RecordingBinding, ShaderBinding};
pub use renderer::{DebugTextRenderer, Renderer, prepare_object};

pub fn crate_info() -> &'static str {
    "glint-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
