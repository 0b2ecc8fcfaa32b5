use wgpu::util::DeviceExt;

use crate::render::batch::SpriteInstance;
use crate::render::texture::{TextureSlots, MAX_TEXTURE_SLOTS};
use crate::render::RenderCtx;

use super::common::{
    build_pipeline, camera_bind_group_layout, ensure_vertex_capacity, CameraBinding, PipelineDesc,
    QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};
use super::texture::TextureStore;

/// Instanced unit-quad pipeline, texture slot bindings and sprite buffers.
#[derive(Default)]
pub(crate) struct SpritePipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pub(super) pipeline: Option<wgpu::RenderPipeline>,

    camera_layout: Option<wgpu::BindGroupLayout>,
    pub(super) camera: Option<CameraBinding>,

    texture_layout: Option<wgpu::BindGroupLayout>,
    pub(super) textures: Option<wgpu::BindGroup>,
    /// Slot ids and store revision the texture bind group was built from.
    textures_key: Option<([u32; MAX_TEXTURE_SLOTS], u64)>,

    pub(super) quad_vbo: Option<wgpu::Buffer>,
    pub(super) quad_ibo: Option<wgpu::Buffer>,

    pub(super) instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl SpritePipeline {
    /// Prepares the pipeline, the current slot bindings and an instance
    /// buffer for `max_instances`.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        store: &TextureStore,
        slots: &TextureSlots,
        max_instances: usize,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_camera(ctx);
        self.ensure_textures(ctx, store, slots);
        ensure_vertex_capacity(
            ctx.device,
            &mut self.instance_vbo,
            &mut self.instance_capacity,
            max_instances,
            std::mem::size_of::<SpriteInstance>(),
            "tiamat sprite instance vbo",
        );
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let camera_layout = camera_bind_group_layout(ctx.device, "tiamat sprite camera bgl");
        let texture_layout = texture_bind_group_layout(ctx.device);
        let pipeline = build_pipeline(
            ctx.device,
            ctx.surface_format,
            &PipelineDesc {
                label: "tiamat sprite pipeline",
                wgsl: include_str!("../shaders/sprite.wgsl"),
                bind_group_layouts: &[&camera_layout, &texture_layout],
                buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.camera_layout = Some(camera_layout);
        self.texture_layout = Some(texture_layout);

        self.camera = None;
        self.textures = None;
        self.textures_key = None;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tiamat sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tiamat sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_camera(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera.is_some() {
            return;
        }
        let Some(bgl) = self.camera_layout.as_ref() else { return };
        self.camera = Some(CameraBinding::new(ctx.device, bgl, "tiamat sprite camera"));
    }

    /// Rebuilds the slot bind group when a slot or the texture set changed.
    fn ensure_textures(&mut self, ctx: &RenderCtx<'_>, store: &TextureStore, slots: &TextureSlots) {
        let key = (slots.ids(), store.revision());
        if self.textures.is_some() && self.textures_key == Some(key) {
            return;
        }
        let Some(layout) = self.texture_layout.as_ref() else { return };

        let mut bound = Vec::with_capacity(MAX_TEXTURE_SLOTS);
        for id in key.0 {
            let Some(texture) = store.get_or_white(id) else {
                log::warn!("white texture missing; sprite textures not bound");
                return;
            };
            bound.push(texture);
        }

        let entries: Vec<wgpu::BindGroupEntry<'_>> = bound
            .iter()
            .enumerate()
            .flat_map(|(slot, texture)| {
                let binding = slot as u32 * 2;
                [
                    wgpu::BindGroupEntry {
                        binding,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: binding + 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ]
            })
            .collect();

        self.textures = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tiamat sprite textures"),
            layout,
            entries: &entries,
        }));
        self.textures_key = Some(key);
        log::trace!("sprite texture slots rebound: {:?}", key.0);
    }
}

fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURE_SLOTS as u32)
        .flat_map(|slot| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: slot * 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: slot * 2 + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        })
        .collect();

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("tiamat sprite texture bgl"),
        entries: &entries,
    })
}
