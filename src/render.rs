use crate::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::core::camera::Camera;
use crate::core::model::ModelMesh;
use crate::core::scene::{IntroScene, StageScene};
use crate::core::theme::INTRO_PLANE;
use crate::core::uniforms::{FrameUniforms, UniformBundle};
use web_sys as web;

mod helpers;
mod model;
mod particles;
mod plane;
mod post;
mod targets;

use model::ModelResources;
use particles::ParticleResources;
use plane::{PlaneBatches, PlaneResources};
use post::{PostBindGroups, PostResources};
use targets::RenderTargets;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    // Shared per-frame bundle (group 0 in every scene shader)
    frame_buffer: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,

    planes: PlaneResources,
    particles: ParticleResources,
    model: ModelResources,

    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

/// What one scene pass draws, already uploaded.
struct ScenePass {
    planes: PlaneBatches,
    particles: u32,
    model: bool,
    wireframe: bool,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits; older WebGPU impls reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let frame_bgl = helpers::uniform_layout(
            &device,
            "frame_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let frame_buffer = helpers::uniform_buffer::<FrameUniforms>(&device, "frame_uniforms");
        let frame_bg = helpers::uniform_bind_group(&device, "frame_bg", &frame_bgl, &frame_buffer);

        let planes = plane::create_plane_resources(&device, &frame_bgl);
        planes.middle.write(&queue, &INTRO_PLANE);
        let particles = particles::create_particle_resources(&device, &frame_bgl);
        let model = model::create_model_resources(&device, &frame_bgl);

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, format);
        let post_groups = post.bind_groups(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            frame_buffer,
            frame_bg,
            planes,
            particles,
            model,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen targets and the bind groups reading them
            self.targets = RenderTargets::new(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn set_model(&mut self, mesh: &ModelMesh) {
        self.model.set_mesh(&self.device, mesh);
    }

    fn write_frame(&self, camera: &Camera, bundle: &UniformBundle) {
        let (right, up) = camera.basis();
        let packed = bundle.pack(camera.view_proj(), right, up);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&packed));
    }

    /// Background model and rising embers.
    pub fn render_intro(
        &mut self,
        intro: &IntroScene,
        camera: &Camera,
        bundle: &UniformBundle,
        bloom: bool,
    ) -> Result<(), wgpu::SurfaceError> {
        self.write_frame(camera, bundle);
        self.model
            .write_lights(&self.queue, intro.model_transform, &intro.lights);
        let particles = self
            .particles
            .upload(&self.queue, &intro.embers, intro.ember_tint);
        self.present(
            ScenePass {
                planes: PlaneBatches::default(),
                particles,
                model: true,
                wireframe: true,
            },
            bloom,
        )
    }

    /// Themed planes and drifting particles, always through bloom.
    pub fn render_stage(
        &mut self,
        stage: &StageScene,
        camera: &Camera,
        bundle: &UniformBundle,
        wireframe: bool,
    ) -> Result<(), wgpu::SurfaceError> {
        self.write_frame(camera, bundle);
        self.planes.verse.write(&self.queue, stage.theme.theme());
        let middle = stage.middle_visible.then_some(&stage.middle_plane);
        let verse: &[_] = if stage.verse_visible {
            &stage.verse_planes
        } else {
            &[]
        };
        let planes = self.planes.upload(&self.queue, middle, verse);
        let particles = self
            .particles
            .upload(&self.queue, &stage.particles, stage.particle_tint);
        self.present(
            ScenePass {
                planes,
                particles,
                model: false,
                wireframe,
            },
            true,
        )
    }

    fn present(&mut self, pass: ScenePass, bloom: bool) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if pass.model {
                self.model.draw(&mut rpass, &self.frame_bg);
            }
            self.planes
                .draw(&mut rpass, &self.frame_bg, &pass.planes, pass.wireframe);
            // depth-tested against the meshes, no depth write
            self.particles
                .draw(&mut rpass, &self.frame_bg, pass.particles);
        }

        self.post.write_uniforms(
            &self.queue,
            RenderTargets::bloom_resolution(self.width, self.height),
            if bloom { BLOOM_STRENGTH } else { 0.0 },
            BLOOM_THRESHOLD,
        );
        self.post.run(
            &mut encoder,
            &self.post_groups,
            &self.targets,
            &view,
            bloom,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
