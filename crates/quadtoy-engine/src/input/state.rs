use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current keyboard state for a single window.
///
/// Holds "is down" information; per-frame transitions are recorded into an
/// `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear the held set. Avoids stuck keys
                    // when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    #[test]
    fn escape_press_is_visible_same_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Escape));

        assert!(state.key_down(Key::Escape));
        assert!(frame.keys_pressed.contains(&Key::Escape));
    }

    #[test]
    fn release_clears_held_and_records_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Escape));
        frame.clear();
        state.apply_event(&mut frame, release(Key::Escape));

        assert!(!state.key_down(Key::Escape));
        assert!(frame.keys_released.contains(&Key::Escape));
        assert!(!frame.keys_pressed.contains(&Key::Escape));
    }

    #[test]
    fn repeated_press_does_not_duplicate_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Space));
        frame.clear();
        state.apply_event(&mut frame, press(Key::Space));

        assert!(state.key_down(Key::Space));
        assert!(frame.keys_pressed.is_empty());
    }

    #[test]
    fn held_modifier_survives_key_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        state.apply_event(&mut frame, InputEvent::ModifiersChanged(shift));

        // The runtime attaches the live modifier state to every translated
        // key event; a plain key press must not reset held modifiers.
        let ev = InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            modifiers: state.modifiers,
            repeat: false,
        };
        state.apply_event(&mut frame, ev);

        assert!(state.modifiers.shift);
        assert!(state.key_down(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Escape));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.key_down(Key::Escape));
        assert!(!state.focused);
    }

    #[test]
    fn frame_clear_resets_deltas() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Enter));
        frame.clear();

        assert!(frame.events.is_empty());
        assert!(frame.keys_pressed.is_empty());
        assert!(frame.keys_released.is_empty());
        // State persists across frames; only deltas are cleared.
        assert!(state.key_down(Key::Enter));
    }
}
