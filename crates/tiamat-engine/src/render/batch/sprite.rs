use crate::render::command::SpriteCmd;

use super::{BatchSink, SpriteInstance};

/// Stages sprite instances for a single instanced quad draw.
///
/// Usage per batch: `begin`, `add` until it returns `false`, `end` (upload),
/// `draw_batch`.
#[derive(Debug)]
pub struct SpriteBatch {
    instances: Vec<SpriteInstance>,
    max_sprites: usize,
}

impl SpriteBatch {
    /// `max_sprites` is clamped to at least 1.
    pub fn new(max_sprites: usize) -> Self {
        let max_sprites = max_sprites.max(1);
        Self {
            instances: Vec::with_capacity(max_sprites),
            max_sprites,
        }
    }

    #[inline]
    pub fn max_sprites(&self) -> usize {
        self.max_sprites
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn begin(&mut self) {
        self.instances.clear();
    }

    /// Stages one sprite. `false` when full.
    pub fn add(&mut self, sprite: &SpriteCmd) -> bool {
        if self.instances.len() >= self.max_sprites {
            return false;
        }

        self.instances.push(SpriteInstance {
            position: sprite.position.to_array(),
            size: sprite.size.to_array(),
            uv_min: sprite.uv_min.to_array(),
            uv_max: sprite.uv_max.to_array(),
            color: sprite.color.to_array(),
            texture: sprite.texture,
        });
        true
    }

    /// Uploads exactly `len()` instances.
    pub fn end(&self, sink: &mut dyn BatchSink) {
        sink.upload_sprites(&self.instances);
    }

    /// No-op when nothing is staged.
    pub fn draw_batch(&self, sink: &mut dyn BatchSink) {
        if self.instances.is_empty() {
            return;
        }
        sink.draw_sprites(self.instances.len() as u32);
    }
}
