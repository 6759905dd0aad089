//! Flat-color demo: a red full-screen quad.
//!
//! The fragment stage ignores everything beyond position and always emits
//! the same color; no uniforms are bound. Escape (or closing the window)
//! exits.

use anyhow::Result;

use quadtoy_engine::core::{App, AppControl, FrameCtx};
use quadtoy_engine::device::GpuInit;
use quadtoy_engine::input::Key;
use quadtoy_engine::logging::{LoggingConfig, init_logging};
use quadtoy_engine::paint::Color;
use quadtoy_engine::render::{QuadEffect, QuadRenderer};
use quadtoy_engine::window::{Runtime, RuntimeConfig};

struct FlatDemo {
    renderer: QuadRenderer,
}

impl App for FlatDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            log::info!("escape pressed; exiting");
            return AppControl::Exit;
        }

        let renderer = &mut self.renderer;
        let elapsed = ctx.time.elapsed;
        ctx.render(Color::black(), |rctx, target| {
            renderer.render(rctx, target, elapsed);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "quadtoy — flat quad".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(
        config,
        GpuInit::default(),
        FlatDemo {
            renderer: QuadRenderer::new(QuadEffect::Flat),
        },
    )
}
