use std::ops::Range;

use super::RenderCtx;
use super::common::{
    ViewportUniform, ensure_vertex_capacity, premul_alpha_blend, triangle_list,
    viewport_bind_group_layout, viewport_binding,
};
use super::mesh::SolidVertex;

/// Draws pre-tessellated, per-vertex colored triangles.
#[derive(Default)]
pub(super) struct SolidRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    capacity: usize,
}

impl SolidRenderer {
    /// Uploads this frame's vertices. Must run before the render pass begins.
    pub(super) fn prepare(&mut self, ctx: &RenderCtx<'_>, vertices: &[SolidVertex]) {
        if vertices.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        ensure_vertex_capacity(
            ctx.device,
            &mut self.vbo,
            &mut self.capacity,
            vertices.len(),
            std::mem::size_of::<SolidVertex>(),
            "reiz solid vbo",
        );

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            let u = ViewportUniform::from_ctx(ctx);
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }
        if let Some(vbo) = self.vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
        }
    }

    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("reiz solid shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/solid.wgsl").into()),
        });

        let bind_group_layout = viewport_bind_group_layout(ctx.device, "reiz solid bgl");

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("reiz solid pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("reiz solid pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[SolidVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (ubo, bind_group) = viewport_binding(ctx.device, &bind_group_layout, "reiz solid viewport");

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}
