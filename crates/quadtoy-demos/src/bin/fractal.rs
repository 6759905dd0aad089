//! Animated demo: shadertoy-style fractal palette over a full-screen quad.
//!
//! Each frame uploads the framebuffer resolution sampled that frame and the
//! elapsed time since start; the fragment stage does the rest. Escape (or
//! closing the window) exits.

use anyhow::Result;

use quadtoy_engine::core::{App, AppControl, FrameCtx};
use quadtoy_engine::device::GpuInit;
use quadtoy_engine::input::Key;
use quadtoy_engine::logging::{LoggingConfig, init_logging};
use quadtoy_engine::paint::Color;
use quadtoy_engine::render::{QuadEffect, QuadRenderer};
use quadtoy_engine::window::{Runtime, RuntimeConfig};

struct FractalDemo {
    renderer: QuadRenderer,
}

impl App for FractalDemo {
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
        title: "quadtoy — fractal".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(
        config,
        GpuInit::default(),
        FractalDemo {
            renderer: QuadRenderer::new(QuadEffect::Fractal),
        },
    )
}
