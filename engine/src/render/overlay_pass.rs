//! Overlay Render Pass
//!
//! Draws tinted, textured screen-space quads on top of the scene. This is
//! the wgpu backing for [`OverlaySurface`]: draw calls made during a frame
//! are batched on the CPU and flushed in one indexed draw.
//!
//! The pass binds a single texture. It is uploaded the first time a draw
//! call references it and kept until the pass is dropped.
//! No depth testing, uses alpha blending.

use bytemuck::{Pod, Zeroable};

use super::noise_texture::NoiseTexture;
use super::overlay_surface::{OverlaySurface, Rect};
use super::render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};

/// Most quads a single frame can draw.
pub const MAX_OVERLAY_QUADS: usize = 64;

/// Vertex for overlay rendering (NDC position, texture coordinate, tint)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub tint: [f32; 4],
}

static_assertions::assert_eq_size!(OverlayVertex, [u8; 32]);

/// CPU-side quad batch for one frame.
#[derive(Debug, Clone, Default)]
pub struct OverlayBatch {
    pub vertices: Vec<OverlayVertex>,
    pub indices: Vec<u32>,
}

impl OverlayBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Add a quad covering `rect` (pixels) on a `width` x `height` screen.
    ///
    /// The rect's top-left corner samples `(uv.x, uv.y)` and its bottom-right
    /// corner samples `(uv.max_x(), uv.max_y())`. Returns `false` when the
    /// batch is full.
    pub fn add_quad(&mut self, rect: Rect, uv: Rect, tint: [f32; 4], width: f32, height: f32) -> bool {
        if self.quad_count() >= MAX_OVERLAY_QUADS || width <= 0.0 || height <= 0.0 {
            return false;
        }

        let base = self.vertices.len() as u32;
        let corners = [
            ((rect.x, rect.y), (uv.x, uv.y)),
            ((rect.max_x(), rect.y), (uv.max_x(), uv.y)),
            ((rect.max_x(), rect.max_y()), (uv.max_x(), uv.max_y())),
            ((rect.x, rect.max_y()), (uv.x, uv.max_y())),
        ];
        for ((x, y), (u, v)) in corners {
            self.vertices.push(OverlayVertex {
                position: screen_to_ndc(x, y, width, height),
                uv: [u, v],
                tint,
            });
        }

        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        true
    }
}

/// Convert screen coordinates to NDC
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 2] {
    [(x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0]
}

/// Texture data waiting for the next `update` to reach the GPU.
struct PendingTexture {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

/// Uploaded texture plus the bind group that exposes it to the shader.
struct GpuTexture {
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    _sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
}

/// Overlay render pass. Register it with the host renderer and hand it to
/// the controller as its [`OverlaySurface`].
pub struct OverlayPass {
    enabled: bool,
    width: f32,
    height: f32,
    batch: OverlayBatch,
    pending_texture: Option<PendingTexture>,
    gpu_texture: Option<GpuTexture>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
}

impl OverlayPass {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            enabled: true,
            width: width as f32,
            height: height as f32,
            batch: OverlayBatch::new(),
            pending_texture: None,
            gpu_texture: None,
            pipeline: None,
            bind_group_layout: None,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    /// Drop last frame's quads. Call before the controller draws.
    pub fn begin_frame(&mut self) {
        self.batch.clear();
    }

    pub fn batch(&self) -> &OverlayBatch {
        &self.batch
    }

    fn has_texture(&self) -> bool {
        self.gpu_texture.is_some() || self.pending_texture.is_some()
    }

    fn upload_texture(&mut self, ctx: &RenderContext) {
        let Some(layout) = self.bind_group_layout.as_ref() else {
            return;
        };
        let Some(pending) = self.pending_texture.take() else {
            return;
        };

        let size = wgpu::Extent3d {
            width: pending.width,
            height: pending.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Hijack Noise Texture"),
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
            &pending.bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pending.width * 4),
                rows_per_image: Some(pending.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Hijack Noise Texture View"),
            ..Default::default()
        });

        // Scrolling UVs rely on repeat addressing
        let address_mode = wgpu::AddressMode::Repeat;
        let filter = wgpu::FilterMode::Nearest;
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Hijack Noise Sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Hijack Overlay Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        tracing::debug!(width = pending.width, height = pending.height, "noise texture uploaded");

        self.gpu_texture = Some(GpuTexture {
            _texture: texture,
            _view: view,
            _sampler: sampler,
            bind_group,
        });
    }
}

impl OverlaySurface for OverlayPass {
    fn screen_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn draw_textured_rect(&mut self, rect: Rect, texture: &NoiseTexture, uv: Rect, tint: [f32; 4]) {
        if !self.has_texture() {
            self.pending_texture = Some(PendingTexture {
                width: texture.width(),
                height: texture.height(),
                bytes: texture.as_bytes().to_vec(),
            });
        }
        if !self.batch.add_quad(rect, uv, tint, self.width, self.height) {
            tracing::warn!("overlay batch full, quad dropped");
        }
    }
}

impl RenderPass for OverlayPass {
    fn name(&self) -> &'static str {
        "HijackOverlay"
    }

    fn priority(&self) -> RenderPassPriority {
        RenderPassPriority::UI
    }

    fn is_enabled(&self) -> bool {
        self.enabled && !self.batch.is_empty()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn initialize(&mut self, ctx: &RenderContext) {
        if self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Hijack Overlay Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/hijack_overlay.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Hijack Overlay Bind Group Layout"),
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

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hijack Overlay Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hijack Overlay Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<OverlayVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 8,
                            shader_location: 1,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x4,
                            offset: 16,
                            shader_location: 2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Hijack Overlay Vertex Buffer"),
            size: (MAX_OVERLAY_QUADS * 4 * std::mem::size_of::<OverlayVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Hijack Overlay Index Buffer"),
            size: (MAX_OVERLAY_QUADS * 6 * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }

    fn resize(&mut self, _ctx: &RenderContext, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    fn update(&mut self, ctx: &RenderContext, _delta_time: f32) {
        if self.pending_texture.is_some() {
            self.upload_texture(ctx);
        }
    }

    fn render(&self, ctx: &RenderContext, frame: &mut FrameContext) {
        let (Some(pipeline), Some(texture), Some(vertex_buffer), Some(index_buffer)) = (
            self.pipeline.as_ref(),
            self.gpu_texture.as_ref(),
            self.vertex_buffer.as_ref(),
            self.index_buffer.as_ref(),
        ) else {
            return;
        };
        if self.batch.is_empty() {
            return;
        }

        ctx.queue.write_buffer(vertex_buffer, 0, bytemuck::cast_slice(&self.batch.vertices));
        ctx.queue.write_buffer(index_buffer, 0, bytemuck::cast_slice(&self.batch.indices));

        let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Hijack Overlay Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // Draw over the finished scene
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &texture.bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.batch.indices.len() as u32, 0, 0..1);
    }
}
