//! WebGPU staging scene: the subject at the origin, a camera gizmo on
//! the orbit sphere and the distance handle between them. Also owns
//! the fixed rig camera that turns pointer positions into world rays.

use glam::{Mat4, Quat, Vec3, Vec4};
use stage_core::drag::PickTarget;
use stage_core::geometry::{orientation_of, position_of, zoom_handle_position};
use stage_core::pose::SphericalPose;
use web_sys as web;
use wgpu::util::DeviceExt;

static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");

// Fixed rig camera viewing the staging scene. It never moves; the
// staged camera is what the user manipulates.
const RIG_EYE: Vec3 = Vec3::new(0.0, 2.4, 7.0);
const RIG_FOVY: f32 = std::f32::consts::FRAC_PI_4;
const RIG_NEAR: f32 = 0.1;
const RIG_FAR: f32 = 100.0;

const SUBJECT_RADIUS: f32 = 1.0;
const GIZMO_SCALE: f32 = 0.35;
const ZOOM_HANDLE_SCALE: f32 = 0.22;

const SUBJECT_COLOR: [f32; 4] = [0.82, 0.80, 0.76, 1.0];
const GIZMO_COLOR: [f32; 4] = [0.35, 0.55, 0.95, 1.0];
const ZOOM_HANDLE_COLOR: [f32; 4] = [0.95, 0.72, 0.25, 1.0];

/// Compute a world-space ray from canvas backing-store coordinates
/// using the rig camera.
///
/// Returns `(ray_origin, ray_direction)` in world space.
#[inline]
pub fn screen_to_world_ray(canvas: &web::HtmlCanvasElement, sx: f32, sy: f32) -> (Vec3, Vec3) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let ndc_x = (2.0 * sx / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height);
    let aspect = width / height.max(1.0);
    let proj = Mat4::perspective_rh(RIG_FOVY, aspect, RIG_NEAR, RIG_FAR);
    let view = Mat4::look_at_rh(RIG_EYE, Vec3::ZERO, Vec3::Y);
    let inv = (proj * view).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let rd = (p1 - RIG_EYE).normalize();
    (RIG_EYE, rd)
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

const MAX_INSTANCES: usize = 3;

/// Push one flat-shaded triangle.
fn tri(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3) {
    let n = (b - a).cross(c - a).normalize().to_array();
    out.push(Vertex { position: a.to_array(), normal: n });
    out.push(Vertex { position: b.to_array(), normal: n });
    out.push(Vertex { position: c.to_array(), normal: n });
}

/// Unit octahedron, flat normals. Used for the subject and the
/// distance handle.
fn octahedron_mesh(out: &mut Vec<Vertex>) {
    let px = Vec3::X;
    let nx = -Vec3::X;
    let py = Vec3::Y;
    let ny = -Vec3::Y;
    let pz = Vec3::Z;
    let nz = -Vec3::Z;
    // Upper four faces, counter-clockwise from outside.
    tri(out, py, pz, px);
    tri(out, py, px, nz);
    tri(out, py, nz, nx);
    tri(out, py, nx, pz);
    // Lower four.
    tri(out, ny, px, pz);
    tri(out, ny, nz, px);
    tri(out, ny, nx, nz);
    tri(out, ny, pz, nx);
}

/// Camera gizmo: a squat body with a lens pyramid pointing along -Z,
/// the gizmo's look direction.
fn gizmo_mesh(out: &mut Vec<Vertex>) {
    let apex = Vec3::new(0.0, 0.0, -1.1);
    let half = 0.55;
    let base_z = 0.35;
    let c0 = Vec3::new(-half, -half, base_z);
    let c1 = Vec3::new(half, -half, base_z);
    let c2 = Vec3::new(half, half, base_z);
    let c3 = Vec3::new(-half, half, base_z);
    // Sides of the lens pyramid.
    tri(out, apex, c1, c0);
    tri(out, apex, c2, c1);
    tri(out, apex, c3, c2);
    tri(out, apex, c0, c3);
    // Back plate.
    tri(out, c0, c1, c2);
    tri(out, c0, c2, c3);
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    octahedron_vertices: u32,
    gizmo_vertices: u32,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut vertices: Vec<Vertex> = Vec::new();
        octahedron_mesh(&mut vertices);
        let octahedron_vertices = vertices.len() as u32;
        gizmo_mesh(&mut vertices);
        let gizmo_vertices = vertices.len() as u32 - octahedron_vertices;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("marker_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stage_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marker_instances"),
            size: (std::mem::size_of::<Instance>() * MAX_INSTANCES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("markers_shader"),
            source: wgpu::ShaderSource::Wgsl(MARKERS_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stage_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stage_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stage_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("markers_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout, instance_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let depth_view = create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            instance_buffer,
            bind_group,
            vertex_buffer,
            depth_view,
            octahedron_vertices,
            gizmo_vertices,
            width,
            height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Draw one frame of the staging scene. `pulse_t` is elapsed
    /// seconds, used only to breathe the hovered handle.
    pub fn render(&mut self, pose: &SphericalPose, hover: Option<PickTarget>, pulse_t: f32) {
        let aspect = self.width as f32 / (self.height as f32).max(1.0);
        let proj = Mat4::perspective_rh(RIG_FOVY, aspect, RIG_NEAR, RIG_FAR);
        let view = Mat4::look_at_rh(RIG_EYE, Vec3::ZERO, Vec3::Y);
        let uniforms = Uniforms {
            view_proj: (proj * view).to_cols_array_2d(),
        };

        let pulse = 1.0 + 0.08 * (pulse_t * 6.0).sin();
        let gizmo_pulse = if hover == Some(PickTarget::CameraHandle) { pulse } else { 1.0 };
        let handle_pulse = if hover == Some(PickTarget::ZoomHandle) { pulse } else { 1.0 };

        let camera_pos = position_of(pose);
        let camera_rot = orientation_of(camera_pos);
        let instances = [
            Instance {
                model: Mat4::from_scale(Vec3::splat(SUBJECT_RADIUS)).to_cols_array_2d(),
                color: SUBJECT_COLOR,
            },
            Instance {
                model: Mat4::from_scale_rotation_translation(
                    Vec3::splat(ZOOM_HANDLE_SCALE * handle_pulse),
                    Quat::IDENTITY,
                    zoom_handle_position(pose),
                )
                .to_cols_array_2d(),
                color: ZOOM_HANDLE_COLOR,
            },
            Instance {
                model: Mat4::from_scale_rotation_translation(
                    Vec3::splat(GIZMO_SCALE * gizmo_pulse),
                    camera_rot,
                    camera_pos,
                )
                .to_cols_array_2d(),
                color: GIZMO_COLOR,
            },
        ];

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                log::warn!("surface error: {:?}", e);
                return;
            }
        };
        let view_tex = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("stage_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stage_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view_tex,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.07,
                            g: 0.07,
                            b: 0.09,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            // Subject and zoom handle share the octahedron mesh.
            pass.draw(0..self.octahedron_vertices, 0..2);
            // Camera gizmo uses the lens mesh.
            pass.draw(
                self.octahedron_vertices..self.octahedron_vertices + self.gizmo_vertices,
                2..3,
            );
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("stage_depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth24Plus,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
