use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState, Modifiers};
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
///
/// Window title and size are passed in explicitly rather than living as
/// module-level constants.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "quadtoy".to_string(),
            initial_size: LogicalSize::new(640.0, 640.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` against a single window until it requests exit or the
    /// window is closed.
    ///
    /// Window or GPU context creation failure is fatal and propagates out
    /// as an error; callers exit nonzero.
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // Surface window/GPU creation failure after the loop unwinds.
        if let Some(err) = state.init_error.take() {
            return Err(err);
        }

        Ok(())
    }
}

struct WindowEntry {
    window: Arc<Window>,
    gpu: Gpu,

    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    init_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            initial,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            init_error: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.initial.title.clone())
            .with_inner_size(self.initial.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.gpu_init.clone()))
            .context("failed to initialize GPU context")?;

        self.entry = Some(WindowEntry {
            window,
            gpu,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
        });

        Ok(())
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.init_error = Some(e);
            self.request_exit();
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; frame pacing comes from the FIFO present.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_input_event(&entry.input_state, &event) {
            entry.input_state.apply_event(&mut entry.input_frame, ev);
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.gpu.resize(*new_size);
                entry.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.gpu.resize(new_size);
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let ft: FrameTime = entry.clock.tick();

                let control = {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            window: &entry.window,
                        },
                        gpu: &mut entry.gpu,
                        input: &entry.input_state,
                        input_frame: &entry.input_frame,
                        time: ft,
                    };

                    self.app.on_frame(&mut ctx)
                };

                // Clear per-frame deltas after the frame is consumed.
                entry.input_frame.clear();

                if control == AppControl::Exit {
                    self.request_exit();
                    event_loop.exit();
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

fn translate_input_event(state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            let ms: ModifiersState = m.state();
            Some(InputEvent::ModifiersChanged(map_modifiers(ms)))
        }

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            // Key events carry the live modifier state; winit reports
            // modifier changes separately via ModifiersChanged.
            let modifiers = state.modifiers;
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                modifiers,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            other => Key::Unknown(other as u32),
        },
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_square_640() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size.width, 640.0);
        assert_eq!(cfg.initial_size.height, 640.0);
    }

    #[test]
    fn escape_key_maps() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
    }

    #[test]
    fn unbound_keys_map_to_unknown() {
        assert!(matches!(
            map_key(PhysicalKey::Code(KeyCode::KeyQ)),
            Key::Unknown(_)
        ));
    }
}
