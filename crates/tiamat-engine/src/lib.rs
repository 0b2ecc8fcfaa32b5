//! Tiamat engine crate.
//!
//! A small 2D runtime: one winit window with a wgpu surface, polled input
//! with a named action layer, and a batched line/sprite renderer fed through
//! growable command queues.
//!
//! Applications implement [`core::App`] and hand it to
//! [`window::Runtime::run`].

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
