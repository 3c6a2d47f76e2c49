//! Keyboard codes to movement intents.

use std::collections::HashMap;

use walker_shared::{InputState, Intent};

/// Key code (DOM `KeyboardEvent.code` style, e.g. `"KeyW"`) to intent table.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    map: HashMap<String, Intent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            map: HashMap::new(),
        };
        bindings.bind("KeyW", Intent::Forward);
        bindings.bind("KeyS", Intent::Backward);
        bindings.bind("KeyA", Intent::Left);
        bindings.bind("KeyD", Intent::Right);
        bindings.bind("Space", Intent::Jump);
        bindings
    }
}

impl KeyBindings {
    /// Map `code` to `intent`, replacing any previous binding of that code.
    pub fn bind(&mut self, code: impl Into<String>, intent: Intent) {
        self.map.insert(code.into(), intent);
    }

    #[inline]
    pub fn intent_for(&self, code: &str) -> Option<Intent> {
        self.map.get(code).copied()
    }

    /// Apply a key-down. Returns `false` for unbound keys.
    pub fn key_down(&self, input: &mut InputState, code: &str) -> bool {
        match self.intent_for(code) {
            Some(intent) => {
                input.press(intent);
                true
            }
            None => false,
        }
    }

    /// Apply a key-up. Returns `false` for unbound keys.
    pub fn key_up(&self, input: &mut InputState, code: &str) -> bool {
        match self.intent_for(code) {
            Some(intent) => {
                input.release(intent);
                true
            }
            None => false,
        }
    }
}
