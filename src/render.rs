use folio_core::{ModelMesh, SceneContext};
use glam::{Mat3, Mat4};
use web_sys as web;

mod helpers;
mod mesh;
mod post;
mod targets;

use helpers::HDR_FORMAT;
use mesh::{MeshBuffers, MeshResources, SceneUniforms};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::RenderTargets;

pub use crate::camera::screen_to_world_ray;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh: MeshResources,
    model: Option<MeshBuffers>,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
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
        // The page shows through wherever the model is not drawn.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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

        let targets = RenderTargets::new(&device, width, height);
        let mesh = mesh::create_mesh_resources(&device, HDR_FORMAT);
        let post = post::create_post_resources(&device, HDR_FORMAT, format);
        let post_groups = post.bind_groups(&device, &targets);
        let [r, g, b, a] = crate::constants::CLEAR_RGBA;
        log::info!("[gpu] surface {}x{} {:?} {:?}", width, height, format, alpha_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh,
            model: None,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
            time_accum: 0.0,
        })
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn upload_model(&mut self, model: &ModelMesh) {
        self.model = Some(mesh::upload_mesh(&self.device, model));
        log::info!("[gpu] model uploaded ({} triangles)", model.triangle_count());
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
            self.targets = RenderTargets::new(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    /// Draw one frame. `model_matrix` is `None` until the model target exists.
    pub fn render(
        &mut self,
        dt_sec: f32,
        scene: &SceneContext,
        model_matrix: Option<Mat4>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: lit model → HDR
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
            if let (Some(buffers), Some(model)) = (&self.model, model_matrix) {
                let u = scene_uniforms(scene, model);
                self.queue
                    .write_buffer(&self.mesh.uniform_buffer, 0, bytemuck::bytes_of(&u));
                rpass.set_pipeline(&self.mesh.pipeline);
                rpass.set_bind_group(0, &self.mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, buffers.vertices.slice(..));
                rpass.set_index_buffer(buffers.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..buffers.index_count, 0, 0..1);
            }
        }

        let (bw, bh) = helpers::half_extent(self.width, self.height);
        self.post.write_uniforms(
            &self.queue,
            PostUniforms {
                resolution: [bw as f32, bh as f32],
                time: self.time_accum,
                exposure: scene.exposure(),
                blur_dir: [0.0, 0.0],
                bloom_strength: scene.bloom_strength(),
                threshold: scene.bloom_threshold(),
            },
        );

        // Pass 2: bright pass → bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::TRANSPARENT,
            &self.post.bright_pipeline,
            &self.post_groups.hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a → bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::TRANSPARENT,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        // Pass 4: blur vertical bloom_b → bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::TRANSPARENT,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn scene_uniforms(scene: &SceneContext, model: Mat4) -> SceneUniforms {
    let normal_mat = Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose());
    let key = &scene.key_light;
    let ambient = &scene.ambient;
    SceneUniforms {
        view_proj: scene.camera.view_projection().to_cols_array_2d(),
        model: model.to_cols_array_2d(),
        normal_mat: normal_mat.to_cols_array_2d(),
        light_dir: key.direction().extend(0.0).to_array(),
        light_color: (key.color * key.intensity).extend(1.0).to_array(),
        ambient: (ambient.color * ambient.intensity).extend(1.0).to_array(),
    }
}
