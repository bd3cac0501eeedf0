//! Frame presentation: turns a [`Frame`] into one wgpu render pass.
//!
//! [`FrameBatch`] is the pure half: it resolves the command stream into GPU
//! instance records without touching a device. [`SceneRenderer`] owns the GPU
//! half and implements [`FrameSink`].

use std::collections::HashMap;

use glam::DMat4;
use glam::DVec3;
use solar_system::{DrawCommand, Frame, FrameSink, MaterialParams, PointLight};

use crate::body_pipeline::{BodyInstance, BodyPipeline, LightUniform};
use crate::buffer::{BufferAllocator, IndexData, InstanceBuffer, MeshBuffer};
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, SurfaceError};
use crate::mesh::{orbit_circle, uv_sphere};
use crate::pass::{FrameEncoder, RenderPassBuilder, clear_color};
use crate::ring_pipeline::{CameraUniform, RingInstance, RingPipeline};
use crate::shader::{ShaderError, ShaderKind, ShaderLibrary};

/// Tessellation of the shared unit sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    pub sphere_slices: u32,
    pub sphere_stacks: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_slices: 40,
            sphere_stacks: 32,
        }
    }
}

/// One draw call, in frame order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Ring { segments: u32, instance: RingInstance },
    Sphere { instance: BodyInstance },
}

/// GPU-ready contents of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBatch {
    pub clear_color: [f32; 4],
    pub camera: CameraUniform,
    pub light: LightUniform,
    pub depth_test: bool,
    pub ops: Vec<DrawOp>,
}

impl FrameBatch {
    /// Resolve `frame` into draw operations.
    ///
    /// A material command shades the next sphere only. The light is a single
    /// uniform, so the last light command of the frame lights all of it.
    /// Rings with no segments or zero radius are dropped.
    pub fn from_frame(frame: &Frame) -> Self {
        let mut ops = Vec::with_capacity(frame.commands.len());
        let mut light: Option<PointLight> = None;
        let mut material: Option<MaterialParams> = None;

        for command in &frame.commands {
            match command {
                DrawCommand::Light(point) => light = Some(*point),
                DrawCommand::Material(params) => material = Some(*params),
                DrawCommand::OrbitRing {
                    transform,
                    radius,
                    segments,
                    color,
                } => {
                    if *segments == 0 || *radius <= 0.0 {
                        continue;
                    }
                    let model = *transform * DMat4::from_scale(DVec3::splat(*radius));
                    ops.push(DrawOp::Ring {
                        segments: *segments,
                        instance: RingInstance {
                            model: model.as_mat4().to_cols_array_2d(),
                            color: *color,
                        },
                    });
                }
                DrawCommand::Sphere {
                    transform,
                    radius,
                    color,
                } => {
                    let model = (*transform * DMat4::from_scale(DVec3::splat(*radius))).as_mat4();
                    let instance = match material.take() {
                        Some(params) => BodyInstance::lit(model, *color, &params),
                        None => BodyInstance::flat(model, *color),
                    };
                    ops.push(DrawOp::Sphere { instance });
                }
            }
        }

        Self {
            clear_color: frame.clear_color,
            camera: CameraUniform::new(frame.view_projection().as_mat4(), frame.eye.as_vec3()),
            light: LightUniform::new(light.as_ref(), frame.lighting),
            depth_test: frame.depth_test,
            ops,
        }
    }

    pub fn ring_instances(&self) -> Vec<RingInstance> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Ring { instance, .. } => Some(*instance),
                DrawOp::Sphere { .. } => None,
            })
            .collect()
    }

    pub fn body_instances(&self) -> Vec<BodyInstance> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Sphere { instance } => Some(*instance),
                DrawOp::Ring { .. } => None,
            })
            .collect()
    }

    /// Distinct ring resolutions used by this frame.
    pub fn ring_segments(&self) -> Vec<u32> {
        let mut segments: Vec<u32> = self
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Ring { segments, .. } => Some(*segments),
                DrawOp::Sphere { .. } => None,
            })
            .collect();
        segments.sort_unstable();
        segments.dedup();
        segments
    }
}

/// wgpu presenter for [`Frame`]s.
pub struct SceneRenderer {
    context: RenderContext,
    depth: DepthBuffer,
    shaders: ShaderLibrary,
    rings: RingPipeline,
    bodies: BodyPipeline,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    ring_camera_bind_group: wgpu::BindGroup,
    body_camera_bind_group: wgpu::BindGroup,
    light_bind_group: wgpu::BindGroup,
    sphere_mesh: MeshBuffer,
    ring_meshes: HashMap<u32, MeshBuffer>,
    ring_instances: InstanceBuffer<RingInstance>,
    body_instances: InstanceBuffer<BodyInstance>,
}

impl SceneRenderer {
    pub fn new(context: RenderContext, settings: &SceneSettings) -> Result<Self, ShaderError> {
        let device = &context.device;
        let (width, height) = context.size();

        let shaders = ShaderLibrary::compile_all(device);
        let ring_shader = shaders.get(ShaderKind::Ring)?;
        let rings = RingPipeline::new(device, &ring_shader, context.surface_format);
        let body_shader = shaders.get(ShaderKind::Body)?;
        let bodies = BodyPipeline::new(device, &body_shader, context.surface_format);

        let uniform = |label: &str, size: u64| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let camera_buffer = uniform("camera-uniform", CameraUniform::SIZE);
        let light_buffer = uniform("light-uniform", LightUniform::SIZE);

        let bind = |label: &str, layout: &wgpu::BindGroupLayout, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };
        let ring_camera_bind_group = bind("ring-camera-bg", &rings.camera_bind_group_layout, &camera_buffer);
        let body_camera_bind_group = bind("body-camera-bg", &bodies.camera_bind_group_layout, &camera_buffer);
        let light_bind_group = bind("light-bg", &bodies.light_bind_group_layout, &light_buffer);

        let (vertices, indices) = uv_sphere(settings.sphere_slices, settings.sphere_stacks);
        let sphere_mesh = BufferAllocator::new(device).create_mesh("unit-sphere", &vertices, IndexData::U32(&indices));

        let ring_instances = InstanceBuffer::new(device, "ring-instances", 16);
        let body_instances = InstanceBuffer::new(device, "body-instances", 16);
        let depth = DepthBuffer::new(device, width, height);

        log::info!(
            "Scene renderer ready: {}x{}, sphere {}x{}",
            width,
            height,
            settings.sphere_slices,
            settings.sphere_stacks
        );

        Ok(Self {
            context,
            depth,
            shaders,
            rings,
            bodies,
            camera_buffer,
            light_buffer,
            ring_camera_bind_group,
            body_camera_bind_group,
            light_bind_group,
            sphere_mesh,
            ring_meshes: HashMap::new(),
            ring_instances,
            body_instances,
        })
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn shaders(&self) -> &ShaderLibrary {
        &self.shaders
    }

    /// Resize the surface and depth buffer together.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.depth.resize(&self.context.device, width, height);
        log::info!("Surface resized to {}x{}", width.max(1), height.max(1));
    }

    /// Upload `frame`, draw it in one pass and present.
    pub fn render(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        let batch = FrameBatch::from_frame(frame);
        self.prepare(&batch);

        let surface_texture = self.context.get_current_texture()?;
        let mut encoder = FrameEncoder::new(&self.context.device, surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .clear_color(clear_color(batch.clear_color))
                .depth(&self.depth.view, DepthBuffer::CLEAR_VALUE)
                .label("solar-scene");
            let mut pass = encoder.begin_render_pass(&builder);
            self.encode(&mut pass, &batch);
        }
        encoder.submit(&self.context.queue);
        Ok(())
    }

    fn prepare(&mut self, batch: &FrameBatch) {
        let device = &self.context.device;
        let queue = &self.context.queue;

        for segments in batch.ring_segments() {
            self.ring_meshes.entry(segments).or_insert_with(|| {
                log::debug!("Building orbit ring mesh with {segments} segments");
                BufferAllocator::new(device).create_strip("orbit-ring", &orbit_circle(segments))
            });
        }

        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&batch.camera));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&batch.light));
        self.ring_instances.upload(device, queue, &batch.ring_instances());
        self.body_instances.upload(device, queue, &batch.body_instances());
    }

    fn encode(&self, pass: &mut wgpu::RenderPass<'_>, batch: &FrameBatch) {
        let (mut ring, mut body) = (0u32, 0u32);

        for op in &batch.ops {
            match op {
                DrawOp::Ring { segments, .. } => {
                    let index = ring;
                    ring += 1;
                    let Some(mesh) = self.ring_meshes.get(segments) else {
                        continue;
                    };
                    pass.set_pipeline(self.rings.pipeline(batch.depth_test));
                    pass.set_bind_group(0, &self.ring_camera_bind_group, &[]);
                    pass.set_vertex_buffer(1, self.ring_instances.slice());
                    mesh.draw_instanced(pass, index..index + 1);
                }
                DrawOp::Sphere { .. } => {
                    let index = body;
                    body += 1;
                    pass.set_pipeline(self.bodies.pipeline(batch.depth_test));
                    pass.set_bind_group(0, &self.body_camera_bind_group, &[]);
                    pass.set_bind_group(1, &self.light_bind_group, &[]);
                    pass.set_vertex_buffer(1, self.body_instances.slice());
                    self.sphere_mesh.draw_instanced(pass, index..index + 1);
                }
            }
        }
    }
}

impl FrameSink for SceneRenderer {
    fn present(&mut self, frame: &Frame) {
        match self.render(frame) {
            Ok(()) => {}
            Err(SurfaceError::Timeout) => log::debug!("Surface timeout, frame skipped"),
            Err(e) => log::error!("Failed to present frame: {e}"),
        }
    }
}
