//! Window surface, adapter and device.
//!
//! [`RenderContext`] owns the device and the configured window surface. The
//! orrery needs no optional GPU features, so any adapter able to present to
//! the window is accepted.

use std::sync::Arc;
use winit::window::Window;

#[derive(Debug, thiserror::Error)]
pub enum RenderContextError {
    #[error("no GPU adapter can present to this window")]
    NoAdapter,

    #[error("GPU device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("window surface creation failed: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Why no surface texture could be acquired for a frame.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// Still unusable after one reconfiguration.
    #[error("surface lost")]
    Lost,

    #[error("out of GPU memory")]
    OutOfMemory,

    /// The frame can simply be skipped.
    #[error("timed out acquiring surface texture")]
    Timeout,
}

pub struct RenderContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
    pub adapter_info: wgpu::AdapterInfo,
}

impl RenderContext {
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(|_| RenderContextError::NoAdapter)?;
        let adapter_info = adapter.get_info();
        log::info!(
            "Using GPU {} ({:?}, {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("solar-device"),
                ..Default::default()
            })
            .await?;

        let surface_config =
            surface_configuration(&surface.get_capabilities(&adapter), size.width, size.height, vsync)?;
        surface.configure(&device, &surface_config);
        log::info!(
            "Surface {}x{} {:?}, {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            surface_config.present_mode
        );

        Ok(Self {
            surface_format: surface_config.format,
            device,
            queue,
            surface,
            surface_config,
            adapter_info,
        })
    }

    /// Reconfigure the surface for a new window size. Zero sizes become 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Next texture to draw into. A lost or outdated surface is reconfigured
    /// and retried once.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, SurfaceError> {
        let error = match self.surface.get_current_texture() {
            Ok(texture) => return Ok(texture),
            Err(error) => error,
        };
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                log::warn!("Surface {error:?}, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface.get_current_texture().map_err(|_| SurfaceError::Lost)
            }
            wgpu::SurfaceError::Timeout => Err(SurfaceError::Timeout),
            wgpu::SurfaceError::OutOfMemory => Err(SurfaceError::OutOfMemory),
            wgpu::SurfaceError::Other => {
                log::error!("Unrecognized surface error");
                Err(SurfaceError::Lost)
            }
        }
    }
}

/// Block on [`RenderContext::new`].
pub fn init_render_context_blocking(
    window: Arc<Window>,
    vsync: bool,
) -> Result<RenderContext, RenderContextError> {
    pollster::block_on(RenderContext::new(window, vsync))
}

fn surface_configuration(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
    vsync: bool,
) -> Result<wgpu::SurfaceConfiguration, RenderContextError> {
    let format = select_preferred_srgb_format(&caps.formats).ok_or(RenderContextError::NoSurfaceFormat)?;
    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: select_present_mode(&caps.present_modes, vsync),
        alpha_mode: caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

/// Prefer Bgra8UnormSrgb, then Rgba8UnormSrgb, then any sRGB format, then
/// whatever comes first. `None` only when the surface reports no formats.
fn select_preferred_srgb_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ]
    .into_iter()
    .find(|f| formats.contains(f))
    .or_else(|| formats.iter().copied().find(|f| f.is_srgb()))
    .or_else(|| formats.first().copied())
}

/// Fifo with vsync. Without it, the lowest-latency mode the surface offers.
fn select_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|mode| available.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selection_prefers_bgra_srgb() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        assert_eq!(
            select_preferred_srgb_format(&formats),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn test_format_selection_fallback_rgba_srgb() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        assert_eq!(
            select_preferred_srgb_format(&formats),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn test_format_selection_fallback_first() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(
            select_preferred_srgb_format(&formats),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn test_format_selection_empty() {
        assert_eq!(select_preferred_srgb_format(&[]), None);
    }

    #[test]
    fn test_vsync_uses_fifo() {
        let modes = [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Fifo];
        assert_eq!(select_present_mode(&modes, true), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn test_no_vsync_prefers_mailbox_then_immediate() {
        let all = [
            wgpu::PresentMode::Fifo,
            wgpu::PresentMode::Immediate,
            wgpu::PresentMode::Mailbox,
        ];
        assert_eq!(select_present_mode(&all, false), wgpu::PresentMode::Mailbox);

        let no_mailbox = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate];
        assert_eq!(
            select_present_mode(&no_mailbox, false),
            wgpu::PresentMode::Immediate
        );

        assert_eq!(
            select_present_mode(&[wgpu::PresentMode::Fifo], false),
            wgpu::PresentMode::Fifo
        );
    }

    #[test]
    fn test_surface_configuration_clamps_size() {
        let caps = wgpu::SurfaceCapabilities {
            formats: vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb],
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        };
        let config = surface_configuration(&caps, 0, 700, true).unwrap();
        assert_eq!((config.width, config.height), (1, 700));
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.alpha_mode, wgpu::CompositeAlphaMode::Opaque);
    }

    #[test]
    fn test_surface_configuration_without_formats() {
        let caps = wgpu::SurfaceCapabilities::default();
        assert!(matches!(
            surface_configuration(&caps, 700, 700, true),
            Err(RenderContextError::NoSurfaceFormat)
        ));
    }
}
