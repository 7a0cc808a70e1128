use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use image::imageops::FilterType;
use wgpu::util::DeviceExt;

use crate::coords::{Rect, Vec2};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::RenderCtx;
use super::batch::Batch;
use super::common::{
    QUAD_INDICES, QUAD_VERTICES, QuadVertex, ViewportUniform, ensure_vertex_capacity,
    premul_alpha_blend, triangle_list, viewport_bind_group_layout, viewport_binding,
};

/// Cached textures not drawn for this many frames are released.
const EVICT_AFTER_FRAMES: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TextureKey {
    Image(u64),
    Label {
        text: String,
        family: String,
        size_bits: u32,
    },
}

struct CachedTexture {
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    last_used: u64,
}

/// Draws texts and images as textured quads, one instance per command.
#[derive(Default)]
pub(super) struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    cache: HashMap<TextureKey, CachedTexture>,
    frame: u64,

    /// Draw-list index → texture of each prepared instance, ascending by index.
    /// The position in this vector is the instance slot.
    prepared: Vec<(usize, TextureKey)>,
}

impl SpriteRenderer {
    /// Resolves textures and uploads instances for every sprite batch.
    pub(super) fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        list: &DrawList,
        batches: &[Batch],
        fonts: &mut FontSystem,
    ) {
        self.frame += 1;
        self.prepared.clear();

        let sprite_indices: Vec<usize> = batches
            .iter()
            .filter_map(|b| match b {
                Batch::Sprite(i) => Some(*i),
                Batch::Solid(_) => None,
            })
            .collect();

        if !sprite_indices.is_empty() {
            self.ensure_pipeline(ctx);
            self.ensure_static_buffers(ctx);

            let mut instances = Vec::with_capacity(sprite_indices.len());
            for index in sprite_indices {
                let Some(cmd) = list.items().get(index) else { continue };
                if let Some((key, instance)) = self.resolve(ctx, cmd, fonts) {
                    self.prepared.push((index, key));
                    instances.push(instance);
                }
            }

            if !instances.is_empty() {
                ensure_vertex_capacity(
                    ctx.device,
                    &mut self.instance_vbo,
                    &mut self.instance_capacity,
                    instances.len(),
                    std::mem::size_of::<SpriteInstance>(),
                    "reiz sprite instance vbo",
                );
                if let Some(vbo) = self.instance_vbo.as_ref() {
                    ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&instances));
                }
                if let Some(ubo) = self.viewport_ubo.as_ref() {
                    let u = ViewportUniform::from_ctx(ctx);
                    ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
                }
            }
        }

        let frame = self.frame;
        let before = self.cache.len();
        self.cache
            .retain(|_, t| frame.saturating_sub(t.last_used) <= EVICT_AFTER_FRAMES);
        if self.cache.len() != before {
            log::trace!("evicted {} sprite textures", before - self.cache.len());
        }
    }

    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, list_index: usize) {
        let Ok(slot) = self.prepared.binary_search_by_key(&list_index, |(i, _)| *i) else {
            return;
        };
        let Some(texture) = self.cache.get(&self.prepared[slot].1) else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport_bind_group) = self.viewport_bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        let slot = slot as u32;
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_bind_group, &[]);
        rpass.set_bind_group(1, &texture.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, slot..slot + 1);
    }

    /// Finds or creates the texture for `cmd` and computes its instance.
    fn resolve(
        &mut self,
        ctx: &RenderCtx<'_>,
        cmd: &DrawCmd,
        fonts: &mut FontSystem,
    ) -> Option<(TextureKey, SpriteInstance)> {
        match cmd {
            DrawCmd::Image(img) => {
                let rect = img.rect.normalized();
                if rect.is_empty() || !rect.is_finite() {
                    return None;
                }
                let key = TextureKey::Image(img.bitmap.id());
                if !self.cache.contains_key(&key) {
                    let pixels = img.bitmap.premultiplied();
                    self.upload(ctx, key.clone(), img.bitmap.width(), img.bitmap.height(), &pixels);
                }
                self.touch(&key)?;
                Some((key, SpriteInstance::new(rect, [1.0; 4])))
            }
            DrawCmd::Text(text) => {
                let key = TextureKey::Label {
                    text: text.text.clone(),
                    family: text.family.clone(),
                    size_bits: text.size.to_bits(),
                };
                if !self.cache.contains_key(&key) {
                    let Some(label) = fonts.rasterize_label(&text.family, &text.text, text.size)
                    else {
                        log::warn!("text `{}` could not be rasterized; skipped", text.text);
                        return None;
                    };
                    let pixels = label.to_premul_rgba();
                    self.upload(ctx, key.clone(), label.width, label.height, &pixels);
                }
                let (width, height) = self.touch(&key)?;
                let size = Vec2::new(width as f32, height as f32);
                let min = text.center - size * 0.5;
                let rect = Rect::new(min.x.floor(), min.y.floor(), size.x, size.y);
                Some((key, SpriteInstance::new(rect, text.color.to_array())))
            }
            _ => None,
        }
    }

    /// Marks a cached texture as used this frame and returns its size.
    fn touch(&mut self, key: &TextureKey) -> Option<(u32, u32)> {
        let entry = self.cache.get_mut(key)?;
        entry.last_used = self.frame;
        Some((entry.width, entry.height))
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, key: TextureKey, width: u32, height: u32, rgba: &[u8]) {
        let (Some(layout), Some(sampler)) = (self.texture_layout.as_ref(), self.sampler.as_ref())
        else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }

        // Oversized bitmaps are downscaled; the quad keeps the full size.
        let limit = ctx.device.limits().max_texture_dimension_2d;
        let (tex_width, tex_height) = fit_texture(width, height, limit);
        let scaled;
        let rgba = if (tex_width, tex_height) == (width, height) {
            rgba
        } else {
            let Some(full) = image::RgbaImage::from_raw(width, height, rgba.to_vec()) else {
                log::warn!("sprite pixel buffer does not match {width}x{height}; skipped");
                return;
            };
            log::warn!(
                "sprite of {width}x{height} exceeds the {limit}px texture limit; \
                 downscaled to {tex_width}x{tex_height}"
            );
            scaled = image::imageops::resize(&full, tex_width, tex_height, FilterType::Triangle);
            scaled.as_raw().as_slice()
        };

        let size = wgpu::Extent3d {
            width: tex_width,
            height: tex_height,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("reiz sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(tex_width * 4),
                rows_per_image: Some(tex_height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("reiz sprite bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.cache.insert(
            key,
            CachedTexture {
                bind_group,
                width,
                height,
                last_used: self.frame,
            },
        );
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("reiz sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let viewport_layout = viewport_bind_group_layout(ctx.device, "reiz sprite viewport bgl");
        let texture_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("reiz sprite texture bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("reiz sprite pipeline layout"),
                bind_group_layouts: &[&viewport_layout, &texture_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("reiz sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
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

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("reiz sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let (ubo, bind_group) =
            viewport_binding(ctx.device, &viewport_layout, "reiz sprite viewport");

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.texture_layout = Some(texture_layout);
        self.sampler = Some(sampler);
        self.viewport_ubo = Some(ubo);
        self.viewport_bind_group = Some(bind_group);
        // Bind groups reference the old layout.
        self.cache.clear();
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("reiz sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("reiz sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Largest size with the same aspect ratio whose sides both fit in `limit`.
fn fit_texture(width: u32, height: u32, limit: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= limit {
        return (width, height);
    }
    let scale = f64::from(limit) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, limit);
    (fit(width), fit(height))
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    tint: [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x4  // tint
    ];

    fn new(rect: Rect, tint: [f32; 4]) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self {
            dst_min: [min.x, min.y],
            dst_max: [max.x, max.y],
            tint,
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textures_within_the_limit_keep_their_size() {
        assert_eq!(fit_texture(8192, 100, 8192), (8192, 100));
        assert_eq!(fit_texture(640, 480, 8192), (640, 480));
    }

    #[test]
    fn oversized_textures_shrink_to_the_limit() {
        assert_eq!(fit_texture(9000, 100, 8192), (8192, 91));
        assert_eq!(fit_texture(100, 20000, 8192), (41, 8192));
        assert_eq!(fit_texture(16384, 16384, 8192), (8192, 8192));
    }

    #[test]
    fn extreme_aspect_ratios_keep_one_texel() {
        assert_eq!(fit_texture(100_000, 1, 8192), (8192, 1));
    }
}
