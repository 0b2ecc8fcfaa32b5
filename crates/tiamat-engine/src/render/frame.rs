use crate::coords::Viewport;
use crate::paint::Color;

use super::dispatch::FlushStats;
use super::gpu::GpuBatchSink;
use super::texture::WHITE_SLOT;
use super::{Camera, RenderCtx, RenderTarget, Renderer2D};

/// One acquired frame of a [`Renderer2D`].
///
/// Each call records into the frame encoder in call order; nothing is
/// submitted until the frame closure returns.
pub struct RenderFrame<'r, 'f> {
    renderer: &'r mut Renderer2D,
    encoder: &'f mut wgpu::CommandEncoder,
    view: &'f wgpu::TextureView,
    target_size: (u32, u32),
}

impl<'r, 'f> RenderFrame<'r, 'f> {
    pub(crate) fn new(
        renderer: &'r mut Renderer2D,
        encoder: &'f mut wgpu::CommandEncoder,
        view: &'f wgpu::TextureView,
        target_size: (u32, u32),
    ) -> Self {
        Self { renderer, encoder, view, target_size }
    }

    pub fn renderer(&mut self) -> &mut Renderer2D {
        self.renderer
    }

    /// Clears the whole target to `color`.
    pub fn clear_color_buffer(&mut self, color: Color) {
        let _rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tiamat clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: color.r as f64,
                        g: color.g as f64,
                        b: color.b as f64,
                        a: color.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    /// Flushes every queued line and box through `camera`.
    pub fn draw_lines(&mut self, camera: &Camera) -> FlushStats {
        let viewport = self.pass_viewport();
        let r = &mut *self.renderer;

        let ctx = RenderCtx::new(&r.device, r.surface_format, viewport);
        r.lines.prepare(&ctx, r.dispatcher.line_batch_size() * 2);

        let mut target = RenderTarget::new(self.encoder, self.view);
        let mut sink = GpuBatchSink::new(&ctx, &mut target, &r.lines, &r.sprites);
        r.dispatcher.flush_lines(camera, &mut sink)
    }

    /// Flushes every queued sprite through `camera`.
    pub fn draw_sprites(&mut self, camera: &Camera) -> FlushStats {
        let viewport = self.pass_viewport();
        let r = &mut *self.renderer;

        let white = r.textures.white();
        r.slots.bind(white, WHITE_SLOT);

        let ctx = RenderCtx::new(&r.device, r.surface_format, viewport);
        r.sprites.prepare(&ctx, &r.textures, &r.slots, r.dispatcher.sprite_batch_size());

        let mut target = RenderTarget::new(self.encoder, self.view);
        let mut sink = GpuBatchSink::new(&ctx, &mut target, &r.lines, &r.sprites);
        r.dispatcher.flush_sprites(camera, &mut sink)
    }

    fn pass_viewport(&self) -> Viewport {
        let (w, h) = self.target_size;
        self.renderer.viewport.fit_to(w, h)
    }
}
