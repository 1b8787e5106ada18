use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;

use crate::geometry::{ColoredPoint2D, Point2D};
use crate::render::{RenderCtx, RenderTarget};

use super::color_ramp::ColorRampCache;
use super::fill_node::{FillNode, NodeId};
use super::material::{Material, MaterialType, MaterialUniform};

/// Draws [`FillNode`]s as triangle strips.
///
/// Per node the renderer keeps a vertex buffer and a material uniform and
/// only re-uploads them when the node's geometry or material generation
/// moved since the last frame. Gradient materials bind a color ramp from the
/// shared [`ColorRampCache`].
#[derive(Default)]
pub struct FillRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: Option<Pipelines>,

    viewport_ubo: Option<wgpu::Buffer>,
    viewport_bind_group: Option<wgpu::BindGroup>,

    slots: FxHashMap<NodeId, NodeSlot>,
}

struct Pipelines {
    viewport_bgl: wgpu::BindGroupLayout,
    material_bgl: wgpu::BindGroupLayout,
    gradient_bgl: wgpu::BindGroupLayout,

    flat: wgpu::RenderPipeline,
    colored: wgpu::RenderPipeline,
    linear: wgpu::RenderPipeline,
    radial: wgpu::RenderPipeline,
    conic: wgpu::RenderPipeline,
}

impl Pipelines {
    fn get(&self, ty: MaterialType) -> &wgpu::RenderPipeline {
        match ty {
            MaterialType::Flat => &self.flat,
            MaterialType::VertexColor => &self.colored,
            MaterialType::Linear => &self.linear,
            MaterialType::Radial => &self.radial,
            MaterialType::Conic => &self.conic,
        }
    }
}

/// GPU side of one node.
struct NodeSlot {
    vbo: Option<wgpu::Buffer>,
    vbo_capacity: u64,
    vertex_bytes: u64,
    vertex_count: u32,
    ubo: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
    geometry_generation: Option<u64>,
    material_generation: Option<u64>,
}

impl NodeSlot {
    fn new(device: &wgpu::Device) -> Self {
        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("skinny fill material ubo"),
            size: std::mem::size_of::<MaterialUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            vbo: None,
            vbo_capacity: 0,
            vertex_bytes: 0,
            vertex_count: 0,
            ubo,
            bind_group: None,
            geometry_generation: None,
            material_generation: None,
        }
    }
}

impl FillRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `nodes` in order on top of the target's content.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        ramps: &mut ColorRampCache,
        nodes: &[&FillNode],
    ) {
        if !ctx.viewport.is_valid() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_viewport(ctx);
        self.write_viewport_uniform(ctx);

        for node in nodes.iter().filter(|n| !n.is_empty()) {
            self.prepare(ctx, ramps, node);
        }

        let Some(pipelines) = self.pipelines.as_ref() else { return; };
        let Some(viewport_bg) = self.viewport_bind_group.as_ref() else { return; };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("skinny fill pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for node in nodes.iter().filter(|n| !n.is_empty()) {
            let Some(slot) = self.slots.get(&node.id()) else { continue; };
            let Some(vbo) = slot.vbo.as_ref() else { continue; };

            let ty = node.material().material_type();
            rpass.set_pipeline(pipelines.get(ty));
            rpass.set_bind_group(0, viewport_bg, &[]);

            if ty != MaterialType::VertexColor {
                let Some(bind_group) = slot.bind_group.as_ref() else { continue; };
                rpass.set_bind_group(1, bind_group, &[]);
            }

            rpass.set_vertex_buffer(0, vbo.slice(..slot.vertex_bytes));
            rpass.draw(0..slot.vertex_count, 0..1);
        }
    }

    /// Drops the GPU resources of a node that went away.
    pub fn release(&mut self, node: NodeId) {
        self.slots.remove(&node);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn prepare(&mut self, ctx: &RenderCtx<'_>, ramps: &mut ColorRampCache, node: &FillNode) {
        let Some(pipelines) = self.pipelines.as_ref() else { return; };
        let slot = self.slots.entry(node.id()).or_insert_with(|| NodeSlot::new(ctx.device));

        if slot.geometry_generation != Some(node.geometry_generation()) {
            upload_geometry(ctx, slot, node);
            slot.geometry_generation = Some(node.geometry_generation());
        }

        if slot.material_generation != Some(node.material_generation()) {
            let material = node.material();
            ctx.queue.write_buffer(&slot.ubo, 0, bytemuck::bytes_of(&material.uniform()));

            slot.bind_group = match material {
                Material::VertexColor => None,
                Material::Flat(_) => Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("skinny fill material bind group"),
                    layout: &pipelines.material_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: slot.ubo.as_entire_binding(),
                    }],
                })),
                Material::Gradient(m) => {
                    let ramp = ramps.ramp(ctx.context, m.stops(), m.spread());
                    let (view, sampler) = ramp.ensure_gpu(ctx.device, ctx.queue);
                    Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("skinny gradient bind group"),
                        layout: &pipelines.gradient_bgl,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: slot.ubo.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::TextureView(view),
                            },
                            wgpu::BindGroupEntry {
                                binding: 2,
                                resource: wgpu::BindingResource::Sampler(sampler),
                            },
                        ],
                    }))
                }
            };
            slot.material_generation = Some(node.material_generation());
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipelines.is_some() {
            return;
        }

        let device = ctx.device;

        let viewport_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skinny viewport bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX, viewport_ubo_min_binding_size())],
        });

        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skinny material bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT, material_ubo_min_binding_size())],
        });

        let gradient_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skinny gradient bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::FRAGMENT, material_ubo_min_binding_size()),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skinny flat shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/flat.wgsl").into()),
        });
        let colored_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skinny colored shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/colored.wgsl").into()),
        });
        let gradient_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skinny gradient shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/gradient.wgsl").into()),
        });

        let flat_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skinny flat pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, &material_bgl],
            immediate_size: 0,
        });
        let colored_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skinny colored pipeline layout"),
            bind_group_layouts: &[&viewport_bgl],
            immediate_size: 0,
        });
        let gradient_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skinny gradient pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, &gradient_bgl],
            immediate_size: 0,
        });

        let format = ctx.surface_format;
        let build = |label: &str, layout: &wgpu::PipelineLayout, shader: &wgpu::ShaderModule, fs: &str, vertex: wgpu::VertexBufferLayout<'static>| {
            strip_pipeline(device, format, label, layout, shader, fs, vertex)
        };

        let pipelines = Pipelines {
            flat: build("skinny flat pipeline", &flat_layout, &flat_shader, "fs_main", flat_vertex_layout()),
            colored: build("skinny colored pipeline", &colored_layout, &colored_shader, "fs_main", colored_vertex_layout()),
            linear: build("skinny linear pipeline", &gradient_layout, &gradient_shader, "fs_linear", flat_vertex_layout()),
            radial: build("skinny radial pipeline", &gradient_layout, &gradient_shader, "fs_radial", flat_vertex_layout()),
            conic: build("skinny conic pipeline", &gradient_layout, &gradient_shader, "fs_conic", flat_vertex_layout()),
            viewport_bgl,
            material_bgl,
            gradient_bgl,
        };

        self.pipeline_format = Some(format);
        self.pipelines = Some(pipelines);
        self.viewport_ubo = None;
        self.viewport_bind_group = None;

        // Bind groups of the old layouts are unusable.
        for slot in self.slots.values_mut() {
            slot.bind_group = None;
            slot.material_generation = None;
        }
    }

    fn ensure_viewport(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(pipelines) = self.pipelines.as_ref() else { return; };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("skinny viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("skinny viewport bind group"),
            layout: &pipelines.viewport_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return; };
        let viewport = ctx.viewport.uniform_size();
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform { viewport, _pad: [0.0; 2] }));
    }
}

fn upload_geometry(ctx: &RenderCtx<'_>, slot: &mut NodeSlot, node: &FillNode) {
    let geometry = node.geometry();
    let bytes = geometry.as_bytes();
    let size = bytes.len() as u64;

    if size > slot.vbo_capacity || slot.vbo.is_none() {
        let capacity = size.next_power_of_two().max(256);
        slot.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("skinny fill vbo"),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        slot.vbo_capacity = capacity;
    }

    if let Some(vbo) = slot.vbo.as_ref() {
        ctx.queue.write_buffer(vbo, 0, bytes);
    }
    slot.vertex_bytes = size;
    slot.vertex_count = geometry.vertex_count() as u32;
}

fn strip_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fs_entry: &str,
    vertex: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages, min: NonZeroU64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(min),
        },
        count: None,
    }
}

// ── blend state ───────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

fn viewport_ubo_min_binding_size() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size by construction")
}

fn material_ubo_min_binding_size() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<MaterialUniform>() as u64)
        .expect("MaterialUniform has non-zero size by construction")
}

const FLAT_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const COLORED_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

fn flat_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Point2D>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &FLAT_ATTRS,
    }
}

fn colored_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ColoredPoint2D>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &COLORED_ATTRS,
    }
}
