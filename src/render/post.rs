use super::helpers;
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
    pub(crate) _pad: [f32; 2],
}

/// Uniform slots, one per distinct pass setting. Queue writes land before the
/// submit, so passes in one encoder cannot share a buffer with different values.
pub(crate) struct PostUniformSet {
    pub(crate) base: wgpu::Buffer,
    pub(crate) blur_h: wgpu::Buffer,
    pub(crate) blur_v: wgpu::Buffer,
}

pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) uniforms: PostUniformSet,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let uniforms = PostUniformSet {
        base: helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms"),
        blur_h: helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms_h"),
        blur_v: helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms_v"),
    };
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        &shader,
        "fs_bright",
        helpers::HDR_FORMAT,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        &shader,
        "fs_blur",
        helpers::HDR_FORMAT,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        &shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        sampler,
        uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    fn source_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    }

    /// Bind groups referencing the current targets; rebuilt on every resize.
    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        PostBindGroups {
            hdr: self.source_group(device, "bg_hdr", &targets.hdr_view, &self.uniforms.base),
            from_bloom_a: self.source_group(
                device,
                "bg_from_bloom_a",
                &targets.bloom_a_view,
                &self.uniforms.blur_h,
            ),
            from_bloom_b: self.source_group(
                device,
                "bg_from_bloom_b",
                &targets.bloom_b_view,
                &self.uniforms.blur_v,
            ),
            bloom_a_only: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_bloom_a_only"),
                layout: &self.bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            }),
        }
    }

    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        resolution: [f32; 2],
        bloom_strength: f32,
        threshold: f32,
    ) {
        let at = |blur_dir: [f32; 2]| PostUniforms {
            resolution,
            blur_dir,
            bloom_strength,
            threshold,
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.uniforms.base, 0, bytemuck::bytes_of(&at([0.0, 0.0])));
        queue.write_buffer(&self.uniforms.blur_h, 0, bytemuck::bytes_of(&at([1.0, 0.0])));
        queue.write_buffer(&self.uniforms.blur_v, 0, bytemuck::bytes_of(&at([0.0, 1.0])));
    }

    /// Bright → blur h → blur v → composite into `output`. With `bloom` off the
    /// HDR scene is composited alone.
    pub(crate) fn run(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        groups: &PostBindGroups,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
        bloom: bool,
    ) {
        if bloom {
            blit(
                encoder,
                "bright_pass",
                &targets.bloom_a_view,
                &self.bright_pipeline,
                &groups.hdr,
                None,
            );
            blit(
                encoder,
                "blur_h",
                &targets.bloom_b_view,
                &self.blur_pipeline,
                &groups.from_bloom_a,
                None,
            );
            blit(
                encoder,
                "blur_v",
                &targets.bloom_a_view,
                &self.blur_pipeline,
                &groups.from_bloom_b,
                None,
            );
        }
        blit(
            encoder,
            "composite",
            output,
            &self.composite_pipeline,
            &groups.hdr,
            Some(&groups.bloom_a_only),
        );
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
