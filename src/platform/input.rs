//! Keyboard state to tick input

use crate::sim::TickInput;

/// Logical actions the keyboard can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "ArrowRight" | "d" | "D" => Some(Action::Right),
            "ArrowUp" | "w" | "W" | " " => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Held keys, updated from key events and sampled once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    jump: bool,
}

impl KeyState {
    /// Returns true if the key is one we handle (so the host can swallow it)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, held: bool) -> bool {
        match Action::from_key(key) {
            Some(Action::Left) => self.left = held,
            Some(Action::Right) => self.right = held,
            Some(Action::Jump) => self.jump = held,
            None => return false,
        }
        true
    }

    /// Drop everything held (focus lost, tab hidden)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let mut keys = KeyState::default();
        assert!(keys.key_down("ArrowLeft"));
        assert!(keys.key_down(" "));
        assert!(!keys.key_down("Escape"));

        let input = keys.snapshot();
        assert!(input.left && input.jump && !input.right);

        keys.key_up("ArrowLeft");
        assert!(!keys.snapshot().left);
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState::default();
        keys.key_down("d");
        keys.key_down("w");
        keys.release_all();
        assert_eq!(keys.snapshot(), TickInput::default());
    }
}
