//! Color model shared by draw commands and renderers.
//!
//! Colors are straight (non-premultiplied) linear RGBA; the line and sprite
//! pipelines blend with `src_alpha / one_minus_src_alpha`.

pub mod color;

pub use color::Color;
