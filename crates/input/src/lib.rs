//! Per-frame input snapshots.
//!
//! The camera consumes an [`InputState`] value, never raw OS key state, so
//! transform code stays unit-testable without a live keyboard.

pub mod state;

pub use state::InputState;

pub fn crate_info() -> &'static str {
    "glint-input v0.1.0"
}
