use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::coords::Viewport;
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{translate_key_text, translate_window_event, GamepadPoller, InputFrame, InputState};
use crate::render::{Renderer2D, RendererConfig};
use crate::time::FrameClock;

/// Window creation flags.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowFlags {
    pub maximized: bool,
    pub resizable: bool,
    /// Present with vsync. Overrides `GpuInit::vsync`.
    pub vsync: bool,
    /// No title bar or borders.
    pub undecorated: bool,
    /// Center on the current monitor after creation. Ignored when maximized.
    pub centered: bool,
    pub transparent: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            maximized: false,
            resizable: true,
            vsync: true,
            undecorated: false,
            centered: true,
            transparent: false,
        }
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub flags: WindowFlags,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tiamat".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            flags: WindowFlags::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn window_attributes(&self) -> WindowAttributes {
        let flags = self.flags;
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
            .with_resizable(flags.resizable)
            .with_maximized(flags.maximized)
            .with_decorations(!flags.undecorated)
            .with_transparent(flags.transparent)
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        self.commands.push(Command::SetVsync(vsync));
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Exit,
    SetTitle(String),
    SetVsync(bool),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits or the window closes.
    ///
    /// Window or GPU initialization failures end the loop and are returned.
    pub fn run<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        renderer_config: RendererConfig,
        app: A,
    ) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, renderer_config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Session {
    entry: WindowEntry,
    renderer: Renderer2D,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    renderer_config: RendererConfig,
    app: A,
    gamepads: GamepadPoller,

    session: Option<Session>,
    init_error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, renderer_config: RendererConfig, app: A) -> Self {
        Self {
            config,
            gpu_init,
            renderer_config,
            app,
            gamepads: GamepadPoller::new(),
            session: None,
            init_error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let window = event_loop
            .create_window(self.config.window_attributes())
            .context("failed to create window")?;

        let flags = self.config.flags;
        if flags.centered && !flags.maximized {
            center_window(&window);
        }

        let mut gpu_init = self.gpu_init.clone();
        gpu_init.vsync = flags.vsync;
        if flags.transparent && gpu_init.alpha_mode.is_none() {
            gpu_init.alpha_mode = Some(wgpu::CompositeAlphaMode::PreMultiplied);
        }

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let renderer_config = self.renderer_config;
        let mut renderer = entry.with_gpu(|gpu| {
            let size = gpu.size();
            Renderer2D::new(
                gpu.device(),
                gpu.queue(),
                gpu.surface_format(),
                Viewport::new(size.width as f32, size.height as f32),
                renderer_config,
            )
        })?;

        entry.with_window(|w| {
            let window = WindowCtx { id: w.id(), window: w };
            self.app.on_init(&window, &mut renderer);
        });

        Ok(Session { entry, renderer })
    }

    fn resize(&mut self, size: Option<PhysicalSize<u32>>) {
        let Some(Session { entry, renderer }) = self.session.as_mut() else { return };

        let size = size.unwrap_or_else(|| entry.with_window(|w| w.inner_size()));
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        renderer.set_viewport(size.width, size.height);
        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        let app = &mut self.app;
        let gamepads = &mut self.gamepads;
        if let Some(Session { entry, renderer }) = self.session.as_mut() {
            entry.with_mut(|fields| {
                gamepads.poll(fields.input_state);
                let time = fields.clock.tick();

                // Scope to ensure `ctx` is dropped before mutating frame state.
                {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: fields.window.id(),
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                        renderer,
                        input: fields.input_state,
                        input_frame: fields.input_frame,
                        time,
                        runtime: &mut runtime_ctx,
                    };

                    app_control = app.on_frame(&mut ctx);
                }

                fields.input_frame.clear();
            });
        }

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::Exit => self.request_exit(),
                Command::SetTitle(title) => {
                    if let Some(session) = self.session.as_ref() {
                        session.entry.with_window(|w| w.set_title(&title));
                    }
                }
                Command::SetVsync(vsync) => {
                    if let Some(session) = self.session.as_mut() {
                        session.entry.with_gpu_mut(|gpu| gpu.set_vsync(vsync));
                    }
                }
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match self.create_session(event_loop) {
            Ok(session) => {
                session.entry.with_window(|w| w.request_redraw());
                self.session = Some(session);
            }
            Err(e) => {
                log::error!("failed to initialize window: {e:#}");
                self.init_error = Some(e);
                self.request_exit();
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one frame per loop iteration, paced by present mode.
        if let Some(session) = self.session.as_ref() {
            session.entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let app = &mut self.app;
        let Some(session) = self.session.as_mut() else { return };

        let mut exit_from_app_event = false;
        session.entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            if let Some(ev) = translate_key_text(&event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }

            if app.on_window_event(&event) == AppControl::Exit {
                exit_from_app_event = true;
            }
        });

        if exit_from_app_event {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.session = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(Some(*new_size)),

            WindowEvent::ScaleFactorChanged { .. } => self.resize(None),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn center_window(window: &Window) {
    let Some(monitor) = window.current_monitor() else { return };

    let origin = monitor.position();
    let area = monitor.size();
    let size = window.outer_size();

    let x = origin.x + (area.width as i32 - size.width as i32) / 2;
    let y = origin.y + (area.height as i32 - size.height as i32) / 2;
    window.set_outer_position(PhysicalPosition::new(x, y));
}
