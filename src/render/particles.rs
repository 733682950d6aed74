use super::helpers;
use crate::constants::MAX_PARTICLES;
use crate::core::scene::Particle;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) color: [f32; 4],
}

pub(crate) struct ParticleResources {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
}

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    frame_bgl: &wgpu::BindGroupLayout,
) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::PARTICLES_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[frame_bgl],
        push_constant_ranges: &[],
    });
    let additive = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent::OVER,
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("particles_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_particle"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(helpers::depth_state(false)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_particle"),
            targets: &[Some(wgpu::ColorTargetState {
                format: helpers::HDR_FORMAT,
                blend: Some(additive),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("particle_instances"),
        size: (MAX_PARTICLES * std::mem::size_of::<ParticleInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    ParticleResources {
        pipeline,
        instance_buffer,
    }
}

impl ParticleResources {
    /// Upload up to `MAX_PARTICLES` tinted particles; returns the instance count.
    pub(crate) fn upload(&self, queue: &wgpu::Queue, particles: &[Particle], tint: [f32; 3]) -> u32 {
        let packed: Vec<ParticleInstance> = particles
            .iter()
            .take(MAX_PARTICLES)
            .map(|p| ParticleInstance {
                pos_size: p.position.extend(p.size).to_array(),
                color: [tint[0], tint[1], tint[2], 1.0],
            })
            .collect();
        if !packed.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&packed));
        }
        packed.len() as u32
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, frame_bg: &wgpu::BindGroup, count: u32) {
        if count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, frame_bg, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..count);
    }
}
