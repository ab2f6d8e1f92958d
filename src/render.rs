use crate::core::constants::{
    CLEAR_COLOR, SHADOW_EXTENT, SHADOW_FAR, SHADOW_MAP_SIZE, SHADOW_NEAR,
};
use crate::core::scene::{DrawItem, GeometryId, Lighting};
use crate::core::SceneContext;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod meshes;
mod pipelines;
mod targets;

use meshes::GpuMesh;
use pipelines::{GlobalUniforms, ObjectUniforms, SceneLayouts, ScenePipelines};
use targets::RenderTargets;

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    layouts: SceneLayouts,
    pipelines: ScenePipelines,
    meshes: FnvHashMap<GeometryId, GpuMesh>,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    // One `object_stride`-aligned slot per draw item, bound with a dynamic offset.
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,
    object_stride: u64,
    object_capacity: usize,
    object_staging: Vec<u8>,
    shadow_bg: wgpu::BindGroup,

    shadows: bool,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &SceneContext,
        shadows: bool,
    ) -> anyhow::Result<Self> {
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
                    // Default limits keep older WebGPU implementations happy
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

        let targets = RenderTargets::new(&device, width, height, SHADOW_MAP_SIZE);
        let layouts = pipelines::create_layouts(&device);
        let pipelines = pipelines::create_pipelines(&device, &layouts, format);
        let meshes = meshes::upload_geometries(&device, &scene.graph);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &layouts.globals,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let object_stride = helpers::align_to(
            std::mem::size_of::<ObjectUniforms>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let object_capacity = scene.graph.mesh_count().max(1);
        let (object_buffer, object_bg) =
            create_object_slots(&device, &layouts.objects, object_stride, object_capacity);

        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let shadow_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bg"),
            layout: &layouts.shadow,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });

        log::info!("[gpu] ready {}x{} format={:?} shadows={}", width, height, format, shadows);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            layouts,
            pipelines,
            meshes,
            globals_buffer,
            globals_bg,
            object_buffer,
            object_bg,
            object_stride,
            object_capacity,
            object_staging: Vec::new(),
            shadow_bg,
            shadows,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Reconfigure the swapchain and depth buffer to the canvas backing size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate_depth(&self.device, width, height);
        }
    }

    /// Draw the scene graph through the scene's camera.
    pub fn render(&mut self, scene: &SceneContext) -> anyhow::Result<()> {
        let items = scene.graph.draw_items();
        self.ensure_object_capacity(items.len());
        self.write_uniforms(scene, &items);

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.surface.configure(&self.device, &self.config);
                return Err(anyhow::anyhow!("surface {:?}, reconfigured", e));
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: sun shadow map (always cleared so it never holds stale depth)
        {
            let mut spass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if self.shadows {
                spass.set_pipeline(&self.pipelines.shadow);
                spass.set_bind_group(0, &self.globals_bg, &[]);
                for (slot, item) in items.iter().enumerate() {
                    if item.mesh.cast_shadow {
                        self.draw_item(&mut spass, slot, item);
                    }
                }
            }
        }

        // Pass 2: opaque meshes, then translucent ones back to front
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            rpass.set_bind_group(2, &self.shadow_bg, &[]);

            let (opaque, mut translucent): (Vec<_>, Vec<_>) = items
                .iter()
                .enumerate()
                .partition(|(_, item)| !is_transparent(scene, item));

            rpass.set_pipeline(&self.pipelines.opaque);
            for (slot, item) in opaque {
                self.draw_item(&mut rpass, slot, item);
            }

            let facing = scene.camera.facing();
            translucent.sort_by(|(_, a), (_, b)| {
                view_depth(a, facing).total_cmp(&view_depth(b, facing))
            });
            rpass.set_pipeline(&self.pipelines.transparent);
            for (slot, item) in translucent {
                self.draw_item(&mut rpass, slot, item);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl GpuState {
    fn draw_item(&self, pass: &mut wgpu::RenderPass<'_>, slot: usize, item: &DrawItem) {
        let Some(mesh) = self.meshes.get(&item.mesh.geometry) else {
            return;
        };
        let offset = (slot as u64 * self.object_stride) as u32;
        pass.set_bind_group(1, &self.object_bg, &[offset]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn ensure_object_capacity(&mut self, count: usize) {
        if count <= self.object_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        let (buffer, bg) =
            create_object_slots(&self.device, &self.layouts.objects, self.object_stride, capacity);
        self.object_buffer = buffer;
        self.object_bg = bg;
        self.object_capacity = capacity;
        log::info!("[gpu] object slots grown to {}", capacity);
    }

    fn write_uniforms(&mut self, scene: &SceneContext, items: &[DrawItem]) {
        let lighting = &scene.graph.lighting;
        let globals = GlobalUniforms {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            light_view_proj: light_view_projection(lighting).to_cols_array_2d(),
            sun_dir: lighting
                .sun_direction()
                .extend(if self.shadows { 1.0 } else { 0.0 })
                .to_array(),
            sun_color: scaled(lighting.sun_color, lighting.sun_intensity),
            ambient: scaled(lighting.ambient_color, lighting.ambient_intensity),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let stride = self.object_stride as usize;
        self.object_staging.clear();
        self.object_staging.resize(stride * items.len().max(1), 0);
        for (slot, item) in items.iter().enumerate() {
            let (color, params) = match scene.graph.material(item.mesh.material) {
                Some(m) => (
                    [m.color[0], m.color[1], m.color[2], m.opacity],
                    [
                        if m.lit { 1.0 } else { 0.0 },
                        if item.mesh.receive_shadow { 1.0 } else { 0.0 },
                        m.emissive,
                        0.0,
                    ],
                ),
                None => ([1.0, 0.0, 1.0, 1.0], [0.0; 4]),
            };
            let object = ObjectUniforms {
                model: item.world.to_cols_array_2d(),
                color,
                params,
            };
            let start = slot * stride;
            let bytes = bytemuck::bytes_of(&object);
            self.object_staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        self.queue
            .write_buffer(&self.object_buffer, 0, &self.object_staging);
    }
}

fn create_object_slots(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object_uniforms"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });
    (buffer, bg)
}

fn is_transparent(scene: &SceneContext, item: &DrawItem) -> bool {
    scene
        .graph
        .material(item.mesh.material)
        .map(|m| m.transparent)
        .unwrap_or(false)
}

// Larger = closer to the camera; sorting ascending draws far items first.
#[inline]
fn view_depth(item: &DrawItem, facing: Vec3) -> f32 {
    item.world.w_axis.truncate().dot(facing)
}

#[inline]
fn scaled(rgb: [f32; 3], intensity: f32) -> [f32; 4] {
    [rgb[0] * intensity, rgb[1] * intensity, rgb[2] * intensity, 1.0]
}

fn light_view_projection(lighting: &Lighting) -> Mat4 {
    let proj = Mat4::orthographic_rh(
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        SHADOW_NEAR,
        SHADOW_FAR,
    );
    let view = Mat4::look_at_rh(lighting.sun_position, lighting.sun_target, Vec3::Y);
    proj * view
}
