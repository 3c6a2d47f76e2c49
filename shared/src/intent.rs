//! Current-state input sampling.
//!
//! Input callbacks write into an [`InputState`]; the controller reads it once per substep.
//! There is no event queue: the last write wins and rapid presses are not buffered, except
//! that a jump press is latched until one step consumes it.

use crate::bitmask_flags::BitmaskFlags;

crate::define_bitmask_flags!(Intent, u8, {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: BitmaskFlags<u8>,
    jump_edge: bool,
}

impl InputState {
    /// Key-down. A jump press only latches on the up-to-down transition,
    /// so auto-repeat of a held key does not re-arm it.
    pub fn press(&mut self, intent: Intent) {
        if intent == Intent::Jump && !self.held.has(Intent::Jump) {
            self.jump_edge = true;
        }
        self.held.add(intent);
    }

    /// Key-up.
    pub fn release(&mut self, intent: Intent) {
        self.held.remove(intent);
    }

    #[inline]
    pub fn is_held(&self, intent: Intent) -> bool {
        self.held.has(intent)
    }

    /// Consume the pending jump press, if any.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_edge)
    }

    /// Release everything (e.g. when the host loses focus).
    pub fn clear(&mut self) {
        self.held.clear();
        self.jump_edge = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_level_triggered() {
        let mut input = InputState::default();
        input.press(Intent::Forward);
        input.press(Intent::Left);
        assert!(input.is_held(Intent::Forward));
        assert!(input.is_held(Intent::Left));

        input.release(Intent::Forward);
        assert!(!input.is_held(Intent::Forward));
        assert!(input.is_held(Intent::Left));

        input.release(Intent::Left);
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn jump_is_edge_triggered_and_consumed_once() {
        let mut input = InputState::default();
        input.press(Intent::Jump);
        // Key repeat while held does not re-arm.
        input.press(Intent::Jump);

        assert!(input.take_jump());
        assert!(!input.take_jump());

        input.release(Intent::Jump);
        input.press(Intent::Jump);
        assert!(input.take_jump());
    }

    #[test]
    fn clear_drops_pending_jump() {
        let mut input = InputState::default();
        input.press(Intent::Jump);
        input.press(Intent::Right);
        input.clear();
        assert!(!input.take_jump());
        assert!(!input.is_held(Intent::Right));
    }
}
