//! Input vocabulary shared between the session and the shell.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The modifier that momentarily forces mark creation.
    pub fn forces_mark(&self) -> bool {
        self.shift
    }
}

/// Editing keys the session dispatches on.
///
/// Undo/redo chords are not listed: the shell routes those to the store
/// directly, independent of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modifiers_force_nothing() {
        assert!(!Modifiers::default().forces_mark());
    }

    #[test]
    fn test_shift_forces_mark() {
        let modifiers = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        assert!(modifiers.forces_mark());
    }
}
