use serde::{Deserialize, Serialize};

/// Snapshot of the discrete movement keys for one frame.
///
/// Built by whatever owns the platform event loop and passed into
/// `Camera::update`; the default snapshot has nothing held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub ascend: bool,
    pub descend: bool,
}

impl InputState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any_held(&self) -> bool {
        self.forward
            || self.backward
            || self.strafe_left
            || self.strafe_right
            || self.ascend
            || self.descend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_holds_nothing() {
        let input = InputState::none();
        assert!(!input.any_held());
    }

    #[test]
    fn any_held_sees_each_flag() {
        let input = InputState {
            descend: true,
            ..InputState::none()
        };
        assert!(input.any_held());
    }
}
