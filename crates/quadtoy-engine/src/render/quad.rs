use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{RenderCtx, RenderTarget};

/// Shader effect drawn over the full-screen quad.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum QuadEffect {
    /// Constant color, no uniforms.
    Flat,
    /// Animated fractal palette driven by elapsed time + resolution.
    Fractal,
}

impl QuadEffect {
    pub(crate) fn wgsl_source(self) -> &'static str {
        match self {
            QuadEffect::Flat => include_str!("shaders/flat.wgsl"),
            QuadEffect::Fractal => include_str!("shaders/fractal.wgsl"),
        }
    }

    fn label(self) -> &'static str {
        match self {
            QuadEffect::Flat => "flat",
            QuadEffect::Fractal => "fractal",
        }
    }

    fn has_uniforms(self) -> bool {
        matches!(self, QuadEffect::Fractal)
    }
}

/// Per-frame shader parameters for the animated effect.
///
/// Layout must match `SceneUniform` in `shaders/fractal.wgsl`; the trailing
/// pad keeps the struct at a 16-byte uniform stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct SceneUniform {
    pub resolution: [f32; 2],
    pub elapsed: f32,
    pub _pad: f32,
}

/// Quad vertex: 2D position in clip-space units ([-1, 1] per axis).
///
/// Stride and attribute offset must match the `@location(0) vec2<f32>`
/// declared in the vertex stage; there is no runtime check.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two clip-space triangles composing the unit square. Uploaded once,
/// immutable, drawn non-indexed (six vertices per frame).
pub(crate) const QUAD_VERTICES: [QuadVertex; 6] = [
    // lower-left triangle
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    // upper-right triangle
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
];

/// Full-screen quad renderer.
///
/// GPU resources are created lazily on first use and recreated if the
/// surface format changes. `Flat` builds a pipeline with an empty layout;
/// `Fractal` additionally owns a uniform buffer + bind group refreshed
/// every frame.
pub struct QuadRenderer {
    effect: QuadEffect,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    scene_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
}

impl QuadRenderer {
    pub fn new(effect: QuadEffect) -> Self {
        Self {
            effect,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            scene_ubo: None,
            quad_vbo: None,
        }
    }

    /// Draws the quad into `target`.
    ///
    /// For the animated effect, uploads the resolution sampled this frame
    /// and `elapsed` (seconds since app start) before the draw. Issues
    /// exactly one draw call covering all six vertices.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, elapsed: f32) {
        let effect = self.effect;

        self.ensure_pipeline(ctx, effect);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx, effect);

        if effect.has_uniforms() {
            self.write_scene_uniform(ctx, elapsed);
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadtoy quad pass"),
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

        rpass.set_pipeline(pipeline);
        if let Some(bind_group) = self.bind_group.as_ref() {
            rpass.set_bind_group(0, bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, effect: QuadEffect) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let src = effect.wgsl_source();
        log::debug!(
            "creating {} shader module ({} bytes of WGSL)",
            effect.label(),
            src.len()
        );

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(effect.label()),
            source: wgpu::ShaderSource::Wgsl(src.into()),
        });

        let bind_group_layout = effect.has_uniforms().then(|| {
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("quadtoy scene bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(scene_ubo_min_binding_size()),
                        },
                        count: None,
                    }],
                })
        });

        let bgls: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("quadtoy quad pipeline layout"),
                bind_group_layouts: &bgls,
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("quadtoy quad pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
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

                multiview_mask: None,
                cache: None,
            });

        log::info!(
            "quad pipeline ready: effect={} format={:?}",
            effect.label(),
            ctx.surface_format
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = bind_group_layout;

        self.bind_group = None;
        self.scene_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>, effect: QuadEffect) {
        if !effect.has_uniforms() {
            return;
        }
        if self.bind_group.is_some() && self.scene_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let scene_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quadtoy scene ubo"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadtoy scene bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_ubo.as_entire_binding(),
            }],
        });

        self.scene_ubo = Some(scene_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("quadtoy quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
    }

    fn write_scene_uniform(&mut self, ctx: &RenderCtx<'_>, elapsed: f32) {
        let Some(ubo) = self.scene_ubo.as_ref() else { return };
        let u = SceneUniform {
            resolution: [
                ctx.resolution.width.max(1) as f32,
                ctx.resolution.height.max(1) as f32,
            ],
            elapsed,
            _pad: 0.0,
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

/// Returns the `wgpu` minimum binding size for the scene uniform buffer.
///
/// `SceneUniform` is 16 bytes by construction, so the size is always
/// non-zero. Centralising this avoids `.unwrap()` at the pipeline-creation
/// site.
fn scene_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<SceneUniform>() as u64)
        .expect("SceneUniform has non-zero size by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn quad_is_six_vertices_in_clip_space() {
        assert_eq!(QUAD_VERTICES.len(), 6);
        for v in QUAD_VERTICES {
            assert!(v.pos[0] == -1.0 || v.pos[0] == 1.0);
            assert!(v.pos[1] == -1.0 || v.pos[1] == 1.0);
        }
    }

    fn triangle_area(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
        0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs()
    }

    #[test]
    fn triangles_cover_the_full_square() {
        let t0 = triangle_area(
            QUAD_VERTICES[0].pos,
            QUAD_VERTICES[1].pos,
            QUAD_VERTICES[2].pos,
        );
        let t1 = triangle_area(
            QUAD_VERTICES[3].pos,
            QUAD_VERTICES[4].pos,
            QUAD_VERTICES[5].pos,
        );

        // Each half-square triangle has area 2; together they tile the
        // [-1, 1] square of area 4.
        assert_eq!(t0, 2.0);
        assert_eq!(t1, 2.0);
    }

    #[test]
    fn triangles_share_the_diagonal() {
        assert_eq!(QUAD_VERTICES[2].pos, QUAD_VERTICES[3].pos);
        assert_eq!(QUAD_VERTICES[0].pos, QUAD_VERTICES[5].pos);
    }

    // ── uniform layout ────────────────────────────────────────────────────

    #[test]
    fn scene_uniform_matches_wgsl_layout() {
        assert_eq!(size_of::<SceneUniform>(), 16);
        assert_eq!(offset_of!(SceneUniform, resolution), 0);
        assert_eq!(offset_of!(SceneUniform, elapsed), 8);
    }

    #[test]
    fn vertex_stride_matches_attribute() {
        let layout = QuadVertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
    }

    // ── shader sources ────────────────────────────────────────────────────

    fn validate_wgsl(src: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(src).expect("WGSL parse failed");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("WGSL validation failed");
        module
    }

    #[test]
    fn flat_shader_validates_with_no_uniforms() {
        let module = validate_wgsl(QuadEffect::Flat.wgsl_source());
        assert_eq!(module.entry_points.len(), 2);
        assert!(module.global_variables.iter().next().is_none());
    }

    #[test]
    fn fractal_shader_validates_with_scene_uniform() {
        let module = validate_wgsl(QuadEffect::Fractal.wgsl_source());
        assert_eq!(module.entry_points.len(), 2);

        let uniforms: Vec<_> = module
            .global_variables
            .iter()
            .filter(|(_, v)| v.space == naga::AddressSpace::Uniform)
            .collect();
        assert_eq!(uniforms.len(), 1);
    }

    #[test]
    fn shaders_expose_expected_entry_points() {
        for effect in [QuadEffect::Flat, QuadEffect::Fractal] {
            let module = validate_wgsl(effect.wgsl_source());
            let names: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(names.contains(&"vs_main"));
            assert!(names.contains(&"fs_main"));
        }
    }
}
