//! Reverse-Z depth buffer.
//!
//! The near plane maps to 1.0 and the far plane to 0.0. With a far plane tens
//! of millions of units away, this keeps float precision where the orbits are.

pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthBuffer {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// The far plane.
    pub const CLEAR_VALUE: f32 = 0.0;

    /// Closer fragments have larger depth values.
    pub const COMPARE_FUNCTION: wgpu::CompareFunction = wgpu::CompareFunction::GreaterEqual;

    /// A depth target matching a `width` x `height` surface. Zero sizes become 1.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("solar-depth"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("solar-depth-view"),
            aspect: wgpu::TextureAspect::DepthOnly,
            ..Default::default()
        });
        Self { texture, view }
    }

    /// Follow a surface resize. Keeps the texture when the size is unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.size() != (width.max(1), height.max(1)) {
            *self = Self::new(device, width, height);
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }

    /// Depth state for a pipeline. Overlay pipelines (`depth_test == false`)
    /// draw over everything and leave the buffer untouched.
    pub fn stencil_state(depth_test: bool) -> wgpu::DepthStencilState {
        let depth_compare = match depth_test {
            true => Self::COMPARE_FUNCTION,
            false => wgpu::CompareFunction::Always,
        };
        wgpu::DepthStencilState {
            format: Self::FORMAT,
            depth_write_enabled: depth_test,
            depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }
    }
}

/// Headless device and queue for GPU-backed unit tests. `None` on machines
/// without an adapter.
#[cfg(test)]
pub(crate) fn create_test_gpu() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok()?;

        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}
