//! Sphere pipeline with per-fragment point lighting.
//!
//! Lighting follows the fixed-function model: emission, plus the scene and
//! light ambient terms scaled by the material ambient, plus Lambert diffuse and
//! Blinn-Phong specular from the single point light. Spheres drawn without a
//! material, or while lighting is off, take their flat instance color.

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use solar_system::{MaterialParams, PointLight};

use crate::buffer::VertexPositionNormal;
use crate::depth::DepthBuffer;
use crate::ring_pipeline::camera_bind_group_layout;

/// Global ambient added to every lit surface.
pub const SCENE_AMBIENT: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub scene_ambient: [f32; 4],
    /// x = lighting enabled, y = a light was configured this frame.
    pub flags: [f32; 4],
}

impl LightUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(light: Option<&PointLight>, lighting: bool) -> Self {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        let light = light.copied();
        let source = light.unwrap_or_default();
        Self {
            position: source.position,
            ambient: source.ambient,
            diffuse: source.diffuse,
            specular: source.specular,
            scene_ambient: SCENE_AMBIENT,
            flags: [flag(lighting), flag(light.is_some()), 0.0, 0.0],
        }
    }
}

impl Default for LightUniform {
    fn default() -> Self {
        Self::new(None, false)
    }
}

/// One sphere: the unit mesh placed by `model`, with its surface terms.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    /// x = shininess, y = 1 when a material applies.
    pub params: [f32; 4],
}

impl BodyInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
            8 => Float32x4,
            9 => Float32x4,
            10 => Float32x4,
            11 => Float32x4,
        ],
    };

    /// Flat-colored sphere.
    pub fn flat(model: glam::Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            ambient: [0.0; 4],
            diffuse: [0.0; 4],
            specular: [0.0; 4],
            emission: [0.0; 4],
            params: [0.0; 4],
        }
    }

    /// Sphere shaded with `material`.
    pub fn lit(model: glam::Mat4, color: [f32; 4], material: &MaterialParams) -> Self {
        Self {
            ambient: material.ambient,
            diffuse: material.diffuse,
            specular: material.specular,
            emission: material.emission,
            params: [material.shininess, 1.0, 0.0, 0.0],
            ..Self::flat(model, color)
        }
    }

    pub fn is_lit(&self) -> bool {
        self.params[1] != 0.0
    }
}

pub struct BodyPipeline {
    pub depth_tested: wgpu::RenderPipeline,
    pub overlay: wgpu::RenderPipeline,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    pub light_bind_group_layout: wgpu::BindGroupLayout,
}

impl BodyPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let camera_bind_group_layout = camera_bind_group_layout(device, "body-camera-bgl");
        let light_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("body-light-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(LightUniform::SIZE),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &light_bind_group_layout],
            immediate_size: 0,
        });

        let build = |depth_test: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(if depth_test { "body-pipeline" } else { "body-overlay-pipeline" }),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[VertexPositionNormal::LAYOUT, BodyInstance::LAYOUT],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(DepthBuffer::stencil_state(depth_test)),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multiview_mask: None,
                cache: None,
            })
        };

        Self {
            depth_tested: build(true),
            overlay: build(false),
            camera_bind_group_layout,
            light_bind_group_layout,
        }
    }

    pub fn pipeline(&self, depth_test: bool) -> &wgpu::RenderPipeline {
        if depth_test { &self.depth_tested } else { &self.overlay }
    }
}

pub const BODY_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
};

struct LightUniform {
    position: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    scene_ambient: vec4<f32>,
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> light: LightUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) ambient: vec4<f32>,
    @location(8) diffuse: vec4<f32>,
    @location(9) specular: vec4<f32>,
    @location(10) emission: vec4<f32>,
    @location(11) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) ambient: vec4<f32>,
    @location(4) diffuse: vec4<f32>,
    @location(5) specular: vec4<f32>,
    @location(6) emission: vec4<f32>,
    @location(7) params: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
    let world = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    // Uniform scale: the model matrix transforms normals directly.
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = instance.color;
    out.ambient = instance.ambient;
    out.diffuse = instance.diffuse;
    out.specular = instance.specular;
    out.emission = instance.emission;
    out.params = instance.params;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (light.flags.x == 0.0 || in.params.y == 0.0) {
        return in.color;
    }

    var rgb = in.emission.rgb + light.scene_ambient.rgb * in.ambient.rgb;

    if (light.flags.y != 0.0) {
        let n = normalize(in.world_normal);
        var l = normalize(light.position.xyz);
        if (light.position.w != 0.0) {
            l = normalize(light.position.xyz / light.position.w - in.world_position);
        }
        let v = normalize(camera.eye.xyz - in.world_position);

        rgb += light.ambient.rgb * in.ambient.rgb;

        let n_dot_l = max(dot(n, l), 0.0);
        rgb += n_dot_l * light.diffuse.rgb * in.diffuse.rgb;

        if (n_dot_l > 0.0) {
            let h = normalize(l + v);
            let highlight = pow(max(dot(n, h), 0.0), in.params.x);
            rgb += highlight * light.specular.rgb * in.specular.rgb;
        }
    }

    return vec4<f32>(clamp(rgb, vec3<f32>(0.0), vec3<f32>(1.0)), in.diffuse.a);
}
"#;
