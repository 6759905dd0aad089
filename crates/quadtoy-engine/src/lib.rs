//! Quadtoy engine crate.
//!
//! Owns the platform + GPU runtime pieces shared by the demo binaries:
//! window/event loop, wgpu device and surface, keyboard input state,
//! frame timing, and the full-screen quad renderer.

pub mod core;
pub mod device;
pub mod input;
pub mod render;
pub mod time;
pub mod window;

pub mod logging;
pub mod paint;
