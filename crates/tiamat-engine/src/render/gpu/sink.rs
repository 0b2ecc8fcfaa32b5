use crate::render::batch::{BatchSink, LineVertex, SpriteInstance};
use crate::render::{Camera, RenderCtx, RenderTarget};

use super::common::{begin_load_pass, encode_upload, CameraUniform};
use super::lines::LinePipeline;
use super::sprites::SpritePipeline;

/// [`BatchSink`] that records uploads and passes into a frame encoder.
///
/// Each draw gets its own load/store pass preceded by its own upload, so
/// several batches in one frame never overwrite each other's data. Pipelines
/// must be prepared before the sink is built.
pub(crate) struct GpuBatchSink<'s, 't> {
    ctx: &'s RenderCtx<'s>,
    target: &'s mut RenderTarget<'t>,
    lines: &'s LinePipeline,
    sprites: &'s SpritePipeline,
}

impl<'s, 't> GpuBatchSink<'s, 't> {
    pub fn new(
        ctx: &'s RenderCtx<'s>,
        target: &'s mut RenderTarget<'t>,
        lines: &'s LinePipeline,
        sprites: &'s SpritePipeline,
    ) -> Self {
        Self { ctx, target, lines, sprites }
    }

    fn upload_camera(&mut self, ubo: &wgpu::Buffer, camera: &Camera) {
        let uniform = CameraUniform::from_camera(camera);
        encode_upload(self.ctx.device, self.target.encoder, ubo, bytemuck::bytes_of(&uniform));
    }
}

impl BatchSink for GpuBatchSink<'_, '_> {
    fn begin_lines(&mut self, camera: &Camera) {
        let lines = self.lines;
        let Some(camera_binding) = lines.camera.as_ref() else { return };
        self.upload_camera(&camera_binding.ubo, camera);
    }

    fn draw_lines(&mut self, vertices: &[LineVertex]) {
        if vertices.is_empty() {
            return;
        }

        let lines = self.lines;
        let Some(pipeline) = lines.pipeline.as_ref() else { return };
        let Some(camera) = lines.camera.as_ref() else { return };
        let Some(vbo) = lines.vertex_vbo.as_ref() else { return };

        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        if bytes.len() as u64 > vbo.size() {
            log::warn!("line batch exceeds vertex buffer; draw skipped");
            return;
        }
        encode_upload(self.ctx.device, self.target.encoder, vbo, bytes);

        let mut rpass = begin_load_pass(
            self.target.encoder,
            self.target.color_view,
            self.ctx.viewport,
            "tiamat line pass",
        );
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &camera.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..bytes.len() as u64));
        rpass.draw(0..vertices.len() as u32, 0..1);
    }

    fn begin_sprites(&mut self, camera: &Camera) {
        let sprites = self.sprites;
        let Some(camera_binding) = sprites.camera.as_ref() else { return };
        self.upload_camera(&camera_binding.ubo, camera);
    }

    fn upload_sprites(&mut self, instances: &[SpriteInstance]) {
        let Some(vbo) = self.sprites.instance_vbo.as_ref() else { return };

        let bytes: &[u8] = bytemuck::cast_slice(instances);
        if bytes.len() as u64 > vbo.size() {
            log::warn!("sprite batch exceeds instance buffer; upload skipped");
            return;
        }
        encode_upload(self.ctx.device, self.target.encoder, vbo, bytes);
    }

    fn draw_sprites(&mut self, count: u32) {
        if count == 0 {
            return;
        }

        let sprites = self.sprites;
        let Some(pipeline) = sprites.pipeline.as_ref() else { return };
        let Some(camera) = sprites.camera.as_ref() else { return };
        let Some(textures) = sprites.textures.as_ref() else { return };
        let Some(quad_vbo) = sprites.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = sprites.quad_ibo.as_ref() else { return };
        let Some(instance_vbo) = sprites.instance_vbo.as_ref() else { return };

        let mut rpass = begin_load_pass(
            self.target.encoder,
            self.target.color_view,
            self.ctx.viewport,
            "tiamat sprite pass",
        );
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &camera.bind_group, &[]);
        rpass.set_bind_group(1, textures, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..count);
    }
}

const QUAD_INDEX_COUNT: u32 = super::common::QUAD_INDICES.len() as u32;
