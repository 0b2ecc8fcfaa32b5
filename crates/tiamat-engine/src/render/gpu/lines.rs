use crate::render::batch::LineVertex;
use crate::render::RenderCtx;

use super::common::{
    build_pipeline, camera_bind_group_layout, ensure_vertex_capacity, CameraBinding, PipelineDesc,
};

/// Line-list pipeline and the buffers a line flush draws from.
///
/// GPU objects are created lazily and rebuilt when the surface format changes.
#[derive(Default)]
pub(crate) struct LinePipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pub(super) pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pub(super) camera: Option<CameraBinding>,

    pub(super) vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl LinePipeline {
    /// Prepares the pipeline and a vertex buffer for `max_vertices`.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, max_vertices: usize) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        ensure_vertex_capacity(
            ctx.device,
            &mut self.vertex_vbo,
            &mut self.vertex_capacity,
            max_vertices,
            std::mem::size_of::<LineVertex>(),
            "tiamat line vbo",
        );
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout = camera_bind_group_layout(ctx.device, "tiamat line bgl");
        let pipeline = build_pipeline(
            ctx.device,
            ctx.surface_format,
            &PipelineDesc {
                label: "tiamat line pipeline",
                wgsl: include_str!("../shaders/line.wgsl"),
                bind_group_layouts: &[&bind_group_layout],
                buffers: &[LineVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.camera = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        self.camera = Some(CameraBinding::new(ctx.device, bgl, "tiamat line camera"));
    }
}
