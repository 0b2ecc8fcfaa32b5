use winit::event::WindowEvent;

use crate::render::Renderer2D;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called once after the window, GPU and renderer exist, before the
    /// first frame. Load textures here.
    fn on_init(&mut self, window: &WindowCtx<'_>, renderer: &mut Renderer2D) {
        let _ = (window, renderer);
    }

    /// Called for every window event, after input state has absorbed it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
