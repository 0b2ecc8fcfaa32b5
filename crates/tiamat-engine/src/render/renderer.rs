use std::path::Path;

use anyhow::{Context, Result};

use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;

use super::batch::DEFAULT_BATCH_SIZE;
use super::dispatch::DrawDispatcher;
use super::gpu::{LinePipeline, SpritePipeline, TextureStore};
use super::image::Image2D;
use super::texture::{Texture2D, TextureSlots, TextureSpec};

/// Renderer sizing options.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RendererConfig {
    /// Segments per line draw call.
    pub line_batch_size: usize,
    /// Instances per sprite draw call.
    pub sprite_batch_size: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            line_batch_size: DEFAULT_BATCH_SIZE,
            sprite_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Batched 2D renderer for one surface.
///
/// Draw calls (`add_*`) are only recorded; they reach the GPU when a
/// [`RenderFrame`](super::RenderFrame) flushes them with a camera. Owns the
/// texture store and slot table.
pub struct Renderer2D {
    pub(super) device: wgpu::Device,
    queue: wgpu::Queue,
    pub(super) surface_format: wgpu::TextureFormat,
    pub(super) viewport: Viewport,

    pub(super) dispatcher: DrawDispatcher,
    pub(super) textures: TextureStore,
    pub(super) slots: TextureSlots,

    pub(super) lines: LinePipeline,
    pub(super) sprites: SpritePipeline,
}

impl Renderer2D {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        config: RendererConfig,
    ) -> Result<Self> {
        let textures = TextureStore::new(device, queue).context("failed to create renderer textures")?;

        log::debug!(
            "renderer created ({surface_format:?}, {} lines / {} sprites per batch)",
            config.line_batch_size,
            config.sprite_batch_size
        );

        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            surface_format,
            viewport,
            dispatcher: DrawDispatcher::new(config.line_batch_size, config.sprite_batch_size),
            textures,
            slots: TextureSlots::default(),
            lines: LinePipeline::default(),
            sprites: SpritePipeline::default(),
        })
    }

    // ── draw recording ────────────────────────────────────────────────────

    pub fn add_line2d(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.dispatcher.add_line(Vec2::new(x1, y1), Vec2::new(x2, y2), color);
    }

    /// Outline of the box at `(x, y)` with size `(w, h)`.
    pub fn add_box2d(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.dispatcher.add_box(Vec2::new(x, y), Vec2::new(w, h), color);
    }

    /// Quad at `(x, y)` with size `(w, h)`, sampling `uv_rect` of the texture
    /// bound to `texture_slot` and tinted by `color`. Slot 0 is plain white.
    pub fn add_sprite(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        texture_slot: u32,
        uv_rect: Rect,
    ) {
        self.dispatcher.add_sprite(
            Vec2::new(x, y),
            Vec2::new(w, h),
            uv_rect.min(),
            uv_rect.max(),
            texture_slot,
            color,
        );
    }

    pub fn clear_line_buffer(&mut self) {
        self.dispatcher.clear_lines();
    }

    pub fn clear_sprite_buffer(&mut self) {
        self.dispatcher.clear_sprites();
    }

    pub fn pending_lines(&self) -> usize {
        self.dispatcher.pending_lines()
    }

    pub fn pending_sprites(&self) -> usize {
        self.dispatcher.pending_sprites()
    }

    // ── target ────────────────────────────────────────────────────────────

    /// Sets the render-pass viewport in physical pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width as f32, height as f32);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Binds `texture` to a sprite sampler slot.
    ///
    /// Slot 0 is rebound to white at every sprite flush. Out-of-range slots
    /// are ignored.
    pub fn bind_texture_slot(&mut self, texture: Texture2D, slot: u32) -> bool {
        self.slots.bind(texture, slot)
    }

    pub fn try_load_texture(&mut self, image: &Image2D, spec: TextureSpec) -> Result<Texture2D> {
        self.textures.upload(&self.device, &self.queue, image, spec)
    }

    pub fn try_load_texture_from_path(
        &mut self,
        path: impl AsRef<Path>,
        spec: TextureSpec,
    ) -> Result<Texture2D> {
        let image = Image2D::load(path)?;
        self.try_load_texture(&image, spec)
    }

    /// Like [`try_load_texture`](Self::try_load_texture) but logs failures and
    /// returns [`Texture2D::NULL`].
    pub fn load_texture(&mut self, image: &Image2D, spec: TextureSpec) -> Texture2D {
        self.try_load_texture(image, spec).unwrap_or_else(|e| {
            log::warn!("texture load failed: {e:#}");
            Texture2D::NULL
        })
    }

    pub fn load_texture_from_path(&mut self, path: impl AsRef<Path>, spec: TextureSpec) -> Texture2D {
        let path = path.as_ref();
        self.try_load_texture_from_path(path, spec).unwrap_or_else(|e| {
            log::warn!("texture load failed for {}: {e:#}", path.display());
            Texture2D::NULL
        })
    }

    /// Frees `texture`, unbinds it from every slot and nulls the handle.
    pub fn delete_texture(&mut self, texture: &mut Texture2D) {
        if texture.is_null() {
            return;
        }

        if self.textures.delete(texture.id()) {
            self.slots.unbind_id(texture.id());
        }
        *texture = Texture2D::NULL;
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
