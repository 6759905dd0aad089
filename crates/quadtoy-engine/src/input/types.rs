/// Keyboard key, reduced to what the demos bind plus a few common keys.
///
/// Anything else maps to `Unknown` with the platform scancode preserved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Unknown(u32),
}

/// Key transition state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Current modifier key state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Platform-agnostic input event consumed by `InputState`.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },
    ModifiersChanged(Modifiers),
    Focused(bool),
}
