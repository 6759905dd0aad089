//! Window + event loop runtime.
//!
//! Drives a single window through winit's `ApplicationHandler`, translating
//! platform events into the engine's input types and calling the app once
//! per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
