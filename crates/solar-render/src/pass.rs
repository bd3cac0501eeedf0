//! Per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes the clear and depth setup of a pass;
//! [`FrameEncoder`] owns the acquired surface texture until submission.

/// Convert an RGBA clear color to wgpu's double-precision form.
pub fn clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

#[derive(Debug)]
struct DepthAttachment<'a> {
    view: &'a wgpu::TextureView,
    clear_value: f32,
}

/// Fluent description of a render pass that clears its targets.
#[derive(Debug)]
pub struct RenderPassBuilder<'a> {
    clear_color: wgpu::Color,
    depth: Option<DepthAttachment<'a>>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPassBuilder<'a> {
    /// Black clear, no depth attachment.
    pub fn new() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
            depth: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth buffer, cleared to `clear_value` when the pass begins.
    pub fn depth(mut self, view: &'a wgpu::TextureView, clear_value: f32) -> Self {
        self.depth = Some(DepthAttachment { view, clear_value });
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    fn begin<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        color_view: &'e wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame's command encoder and the surface texture it draws into.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            surface_texture,
            view,
        }
    }

    pub fn begin_render_pass(&mut self, builder: &RenderPassBuilder<'_>) -> wgpu::RenderPass<'_> {
        builder.begin(&mut self.encoder, &self.view)
    }

    /// Submit the recorded commands and present the surface texture.
    pub fn submit(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        self.surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_conversion() {
        let color = clear_color([0.7, 0.7, 0.7, 0.1]);
        assert!((color.r - 0.7).abs() < 1e-6);
        assert!((color.a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_builder_defaults() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color, wgpu::Color::BLACK);
        assert!(!builder.has_depth());
        assert!(builder.label.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let builder = RenderPassBuilder::default()
            .clear_color(clear_color([0.7, 0.7, 0.7, 0.1]))
            .label("scene");
        assert_eq!(builder.label, Some("scene"));
        assert!((builder.clear_color.g - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_depth_attachment_is_recorded() {
        let Some((device, _queue)) = crate::depth::create_test_gpu() else {
            return;
        };
        let depth = crate::DepthBuffer::new(&device, 4, 4);
        let builder = RenderPassBuilder::new().depth(&depth.view, crate::DepthBuffer::CLEAR_VALUE);
        assert!(builder.has_depth());
    }
}
