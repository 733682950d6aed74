use super::helpers;
use crate::core::model::ModelMesh;
use crate::core::scene::SceneLights;
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightUniforms {
    model: [[f32; 4]; 4],
    spot: [f32; 4],
    color_ambient: [f32; 4],
}

impl LightUniforms {
    fn new(transform: Mat4, lights: &SceneLights) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            spot: lights.spot_position.extend(lights.spot_intensity).to_array(),
            color_ambient: [lights.color[0], lights.color[1], lights.color[2], lights.ambient],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

struct ModelBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

pub(crate) struct ModelResources {
    pipeline: wgpu::RenderPipeline,
    light_buffer: wgpu::Buffer,
    light_bg: wgpu::BindGroup,
    mesh: Option<ModelBuffers>,
}

pub(crate) fn create_model_resources(
    device: &wgpu::Device,
    frame_bgl: &wgpu::BindGroupLayout,
) -> ModelResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("model_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::MODEL_WGSL.into()),
    });
    let light_bgl = helpers::uniform_layout(
        device,
        "model_light_bgl",
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
    );
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("model_pl"),
        bind_group_layouts: &[frame_bgl, &light_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("model_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_model"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ModelVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(helpers::depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_model"),
            targets: &[Some(wgpu::ColorTargetState {
                format: helpers::HDR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let light_buffer = helpers::uniform_buffer::<LightUniforms>(device, "model_light");
    let light_bg = helpers::uniform_bind_group(device, "model_light_bg", &light_bgl, &light_buffer);
    ModelResources {
        pipeline,
        light_buffer,
        light_bg,
        mesh: None,
    }
}

impl ModelResources {
    pub(crate) fn set_mesh(&mut self, device: &wgpu::Device, mesh: &ModelMesh) {
        let vertices: Vec<ModelVertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| ModelVertex {
                position: *p,
                normal: *n,
            })
            .collect();
        self.mesh = Some(ModelBuffers {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: mesh.indices.len() as u32,
        });
    }

    pub(crate) fn write_lights(&self, queue: &wgpu::Queue, transform: Mat4, lights: &SceneLights) {
        let u = LightUniforms::new(transform, lights);
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&u));
    }

    /// No-op until the OBJ has been fetched and uploaded.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, frame_bg: &wgpu::BindGroup) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, frame_bg, &[]);
        rpass.set_bind_group(1, &self.light_bg, &[]);
        rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
        rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
