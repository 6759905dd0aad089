//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! demo applications, and provides a consistent per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
