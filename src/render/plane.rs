use super::helpers;
use crate::constants::{PLANE_SEGMENTS, PLANE_SIZE, VERSE_COLUMNS, VERSE_ROWS};
use crate::core::geometry::plane_grid;
use crate::core::scene::PlaneInstance;
use crate::core::theme::ShaderTheme;
use crate::core::uniforms::ThemeUniforms;
use wgpu::util::DeviceExt;

// Middle plane plus the full verse grid
const MAX_PLANE_INSTANCES: usize = 1 + VERSE_COLUMNS * VERSE_ROWS;

/// One themed batch: a uniform slot and the bind group reading it.
pub(crate) struct ThemeSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ThemeSlot {
    fn new(device: &wgpu::Device, label: &str, layout: &wgpu::BindGroupLayout) -> Self {
        let buffer = helpers::uniform_buffer::<ThemeUniforms>(device, label);
        let bind_group = helpers::uniform_bind_group(device, label, layout, &buffer);
        Self { buffer, bind_group }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, theme: &ShaderTheme) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&ThemeUniforms::from(theme)));
    }
}

/// Pipeline and index list for one way of drawing the shared grid.
struct PlaneDrawMode {
    pipeline: wgpu::RenderPipeline,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

pub(crate) struct PlaneResources {
    lines: PlaneDrawMode,
    fill: PlaneDrawMode,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    pub(crate) middle: ThemeSlot,
    pub(crate) verse: ThemeSlot,
}

/// Plane batches queued for one pass: instance ranges into the shared buffer.
#[derive(Default)]
pub(crate) struct PlaneBatches {
    pub(crate) middle: Option<std::ops::Range<u32>>,
    pub(crate) verse: Option<std::ops::Range<u32>>,
}

fn pack(p: &PlaneInstance) -> [f32; 4] {
    [p.offset.x, p.offset.y, p.offset.z, p.scale]
}

pub(crate) fn create_plane_resources(
    device: &wgpu::Device,
    frame_bgl: &wgpu::BindGroupLayout,
) -> PlaneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("plane_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::PLANE_WGSL.into()),
    });
    let theme_bgl = helpers::uniform_layout(
        device,
        "plane_theme_bgl",
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
    );
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("plane_pl"),
        bind_group_layouts: &[frame_bgl, &theme_bgl],
        push_constant_ranges: &[],
    });
    let line_pipeline = make_plane_pipeline(
        device,
        &layout,
        &shader,
        "plane_lines",
        wgpu::PrimitiveTopology::LineList,
    );
    let fill_pipeline = make_plane_pipeline(
        device,
        &layout,
        &shader,
        "plane_fill",
        wgpu::PrimitiveTopology::TriangleList,
    );

    let grid = plane_grid(PLANE_SIZE, PLANE_SEGMENTS);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_vertices"),
        contents: bytemuck::cast_slice(&grid.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let line_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_line_indices"),
        contents: bytemuck::cast_slice(&grid.line_indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let fill_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_fill_indices"),
        contents: bytemuck::cast_slice(&grid.triangle_indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("plane_instances"),
        size: (MAX_PLANE_INSTANCES * std::mem::size_of::<[f32; 4]>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    PlaneResources {
        lines: PlaneDrawMode {
            pipeline: line_pipeline,
            index_buffer: line_indices,
            index_count: grid.line_indices.len() as u32,
        },
        fill: PlaneDrawMode {
            pipeline: fill_pipeline,
            index_buffer: fill_indices,
            index_count: grid.triangle_indices.len() as u32,
        },
        vertex_buffer,
        instance_buffer,
        middle: ThemeSlot::new(device, "plane_theme_middle", &theme_bgl),
        verse: ThemeSlot::new(device, "plane_theme_verse", &theme_bgl),
    }
}

impl PlaneResources {
    /// Upload the visible planes: the middle plane first, then the verse grid.
    pub(crate) fn upload(
        &self,
        queue: &wgpu::Queue,
        middle: Option<&PlaneInstance>,
        verse: &[PlaneInstance],
    ) -> PlaneBatches {
        let mut packed: Vec<[f32; 4]> = Vec::with_capacity(MAX_PLANE_INSTANCES);
        packed.extend(middle.map(pack));
        let verse_start = packed.len() as u32;
        packed.extend(verse.iter().take(MAX_PLANE_INSTANCES - 1).map(pack));
        let end = packed.len() as u32;
        if !packed.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&packed));
        }
        PlaneBatches {
            middle: (verse_start > 0).then_some(0..verse_start),
            verse: (end > verse_start).then_some(verse_start..end),
        }
    }

    pub(crate) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        frame_bg: &wgpu::BindGroup,
        batches: &PlaneBatches,
        wireframe: bool,
    ) {
        let mode = if wireframe { &self.lines } else { &self.fill };
        rpass.set_pipeline(&mode.pipeline);
        rpass.set_bind_group(0, frame_bg, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        rpass.set_index_buffer(mode.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for (slot, range) in [(&self.middle, &batches.middle), (&self.verse, &batches.verse)] {
            if let Some(r) = range {
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.draw_indexed(0..mode.index_count, 0, r.clone());
            }
        }
    }
}

fn make_plane_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_plane"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 4]>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![1 => Float32x4],
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // the filled grid is seen from both sides
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_plane"),
            targets: &[Some(wgpu::ColorTargetState {
                format: helpers::HDR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
