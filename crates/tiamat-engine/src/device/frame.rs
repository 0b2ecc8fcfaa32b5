/// Surface texture and encoder for one frame.
///
/// Holding a `GpuFrame` blocks acquisition of the next surface texture; hand
/// it back through [`Gpu::submit`](super::Gpu::submit) within the frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the acquired texture in physical pixels.
    ///
    /// Can lag behind the window size by a frame during a resize.
    pub fn size(&self) -> (u32, u32) {
        let texture = &self.surface_texture.texture;
        (texture.width(), texture.height())
    }
}
