//! wgpu backend: surface management, sphere and orbit-ring pipelines, and the
//! [`SceneRenderer`] that turns a [`solar_system::Frame`] into pixels.

pub mod body_pipeline;
pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod mesh;
pub mod pass;
pub mod ring_pipeline;
pub mod scene;
pub mod shader;

pub use body_pipeline::{BODY_SHADER_SOURCE, BodyInstance, BodyPipeline, LightUniform};
pub use buffer::{BufferAllocator, IndexData, InstanceBuffer, MeshBuffer, VertexPosition, VertexPositionNormal};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use mesh::{orbit_circle, uv_sphere};
pub use pass::{FrameEncoder, RenderPassBuilder, clear_color};
pub use ring_pipeline::{CameraUniform, RING_SHADER_SOURCE, RingInstance, RingPipeline};
pub use scene::{DrawOp, FrameBatch, SceneRenderer, SceneSettings};
pub use shader::{ShaderError, ShaderKind, ShaderLibrary};
