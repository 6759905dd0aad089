//! Minimal paint types.

mod color;

pub use color::Color;
