//! Geometry shared by the command queues and renderers.
//!
//! `Vec2` is glam's. World space is whatever the active camera projects;
//! [`Camera::orthographic_2d`](crate::render::Camera::orthographic_2d) gives a
//! y-down pixel space with the origin top-left.

mod rect;
mod viewport;

pub use glam::Vec2;
pub use rect::Rect;
pub use viewport::Viewport;
