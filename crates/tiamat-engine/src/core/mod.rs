//! Engine-facing contracts.
//!
//! The runtime owns the platform loop and calls into an [`App`] with a
//! [`FrameCtx`] that exposes input, timing and the 2D renderer.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
