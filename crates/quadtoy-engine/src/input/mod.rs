//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s; applications
//! poll `InputState`/`InputFrame` once per frame instead of registering
//! callbacks.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers};
