use std::collections::HashMap;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::render::image::Image2D;
use crate::render::texture::{Texture2D, TextureSpec};

pub(crate) struct GpuTexture {
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Owns every texture the renderer has uploaded.
///
/// Ids start at 1; 0 is [`Texture2D::NULL`]. The built-in white texture is
/// created with the store and never deleted.
pub(crate) struct TextureStore {
    entries: HashMap<u32, GpuTexture>,
    next_id: u32,
    white: Texture2D,
    /// Bumped on every deletion so cached bind groups can be invalidated.
    revision: u64,
}

impl TextureStore {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let mut store = Self {
            entries: HashMap::new(),
            next_id: 1,
            white: Texture2D::NULL,
            revision: 0,
        };

        let mut white = Image2D::blank(1, 1, 4);
        white.put_pixel(0, 0, [255; 4]);
        store.white = store
            .upload(device, queue, &white, TextureSpec::default())
            .context("failed to create white texture")?;
        Ok(store)
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &Image2D,
        spec: TextureSpec,
    ) -> Result<Texture2D> {
        let (width, height) = (image.width(), image.height());
        anyhow::ensure!(width > 0 && height > 0, "cannot upload a {width}x{height} image");

        let max = device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max && height <= max,
            "image {width}x{height} exceeds the device texture limit {max}"
        );

        let rgba = image.to_rgba8()?;

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("tiamat texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            rgba.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let filter = spec.filter_mode();
        let address = spec.address_mode();
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tiamat texture sampler"),
            address_mode_u: address,
            address_mode_v: address,
            address_mode_w: address,
            mag_filter: filter,
            min_filter: filter,
            ..Default::default()
        });

        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, GpuTexture { texture, view, sampler });

        log::debug!("texture {id} uploaded ({width}x{height}, {spec:?})");
        Ok(Texture2D::new(id, width, height))
    }

    /// Frees the texture behind `id`. The white texture cannot be deleted.
    pub fn delete(&mut self, id: u32) -> bool {
        if id == self.white.id() {
            log::debug!("refusing to delete the built-in white texture");
            return false;
        }

        let Some(entry) = self.entries.remove(&id) else {
            return false;
        };
        entry.texture.destroy();
        self.revision += 1;
        true
    }

    pub fn get(&self, id: u32) -> Option<&GpuTexture> {
        self.entries.get(&id)
    }

    /// Texture for `id`, falling back to white for null or deleted ids.
    pub fn get_or_white(&self, id: u32) -> Option<&GpuTexture> {
        self.get(id).or_else(|| self.get(self.white.id()))
    }

    pub fn white(&self) -> Texture2D {
        self.white
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
