//! CPU-side batch engines.
//!
//! A batch stages primitives up to a fixed maximum and hands them to a
//! [`BatchSink`] in one upload + one draw. Batches never talk to wgpu
//! directly; `render::gpu::GpuBatchSink` is the wgpu-backed sink.

mod line;
mod sprite;

use bytemuck::{Pod, Zeroable};

use crate::render::Camera;

pub use line::LineBatch;
pub use sprite::SpriteBatch;

/// Default primitives per batch (lines or sprites).
pub const DEFAULT_BATCH_SIZE: usize = 1024;

// ── GPU records ───────────────────────────────────────────────────────────

/// One line-list endpoint.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-instance record for the unit-quad sprite draw.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: [f32; 4],
    pub texture: u32,
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // position
        2 => Float32x2, // size
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4, // color
        6 => Uint32     // texture slot
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

// ── sink ──────────────────────────────────────────────────────────────────

/// Receiver of batch uploads and draws.
///
/// Calls arrive in frame order: `begin_*` once per flush, then any number of
/// upload/draw pairs.
pub trait BatchSink {
    /// Starts a line flush with `camera`'s view-projection.
    fn begin_lines(&mut self, camera: &Camera);

    /// One line-list draw over `vertices` (two per segment). May be empty.
    fn draw_lines(&mut self, vertices: &[LineVertex]);

    fn begin_sprites(&mut self, camera: &Camera);

    /// Replaces the instance data used by the next [`draw_sprites`](Self::draw_sprites).
    fn upload_sprites(&mut self, instances: &[SpriteInstance]);

    /// One instanced draw of the unit quad, `count` instances.
    fn draw_sprites(&mut self, count: u32);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Sink call log.
    #[derive(Debug, Clone, PartialEq)]
    pub enum SinkCall {
        BeginLines,
        DrawLines(Vec<LineVertex>),
        BeginSprites,
        UploadSprites(Vec<SpriteInstance>),
        DrawSprites(u32),
    }

    /// Records every call instead of touching a GPU.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub calls: Vec<SinkCall>,
    }

    impl RecordingSink {
        pub fn line_draws(&self) -> Vec<&[LineVertex]> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::DrawLines(v) => Some(v.as_slice()),
                    _ => None,
                })
                .collect()
        }

        pub fn sprite_draws(&self) -> Vec<u32> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::DrawSprites(n) => Some(*n),
                    _ => None,
                })
                .collect()
        }

        pub fn sprite_uploads(&self) -> Vec<&[SpriteInstance]> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    SinkCall::UploadSprites(v) => Some(v.as_slice()),
                    _ => None,
                })
                .collect()
        }
    }

    impl BatchSink for RecordingSink {
        fn begin_lines(&mut self, _camera: &Camera) {
            self.calls.push(SinkCall::BeginLines);
        }

        fn draw_lines(&mut self, vertices: &[LineVertex]) {
            self.calls.push(SinkCall::DrawLines(vertices.to_vec()));
        }

        fn begin_sprites(&mut self, _camera: &Camera) {
            self.calls.push(SinkCall::BeginSprites);
        }

        fn upload_sprites(&mut self, instances: &[SpriteInstance]) {
            self.calls.push(SinkCall::UploadSprites(instances.to_vec()));
        }

        fn draw_sprites(&mut self, count: u32) {
            self.calls.push(SinkCall::DrawSprites(count));
        }
    }
}
