//! wgpu backend for the batch engines.

mod common;
mod lines;
mod sink;
mod sprites;
mod texture;

pub(crate) use lines::LinePipeline;
pub(crate) use sink::GpuBatchSink;
pub(crate) use sprites::SpritePipeline;
pub(crate) use texture::TextureStore;
