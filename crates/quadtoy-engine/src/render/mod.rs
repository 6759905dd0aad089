//! GPU rendering subsystem.
//!
//! The single renderer here draws a full-screen quad with one of two
//! embedded WGSL shader effects. It owns its GPU resources (pipeline,
//! vertex buffer, uniforms) and issues exactly one draw call per frame.
//!
//! Convention:
//! - vertex positions are clip-space units ([-1, 1] per axis), consumed
//!   directly by the rasterizer with no transform.

mod ctx;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::{QuadEffect, QuadRenderer};
