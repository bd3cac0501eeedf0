//! Per-frame scene description handed from the system to the renderer.

use glam::{DMat4, DVec3};

use crate::shading::{MaterialParams, PointLight};

/// Light gray with a near-transparent alpha.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 0.1];

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect_ratio: 1.0,
            near: 1.0,
            far: 40_000_000.0,
        }
    }
}

impl Projection {
    /// Right-handed perspective matrix with reverse-Z (near maps to 1, far to 0).
    pub fn matrix(&self) -> DMat4 {
        DMat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.far,
            self.near,
        )
    }

    /// Recompute the aspect ratio from a surface size. Zero heights are ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f64 / height as f64;
        }
    }
}

/// One step of a body's draw sequence.
///
/// A [`Material`](DrawCommand::Material) command applies to the next
/// [`Sphere`](DrawCommand::Sphere) only; a sphere with no preceding material
/// command is drawn flat in its own color. A [`Light`](DrawCommand::Light)
/// command sets the scene light for the rest of the frame.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Light(PointLight),
    Material(MaterialParams),
    /// Circle of `radius` in the XY plane of `transform`, centered on its origin.
    OrbitRing {
        transform: DMat4,
        radius: f64,
        segments: u32,
        color: [f32; 4],
    },
    /// Sphere of `radius` centered on the origin of `transform`.
    Sphere {
        transform: DMat4,
        radius: f64,
        color: [f32; 4],
    },
}

/// Everything needed to render one image of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub projection: Projection,
    pub view: DMat4,
    pub eye: DVec3,
    pub lighting: bool,
    pub depth_test: bool,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn view_projection(&self) -> DMat4 {
        self.projection.matrix() * self.view
    }

    /// World-space centers of every sphere drawn this frame, in draw order.
    pub fn sphere_centers(&self) -> Vec<DVec3> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Sphere { transform, .. } => Some(transform.transform_point3(DVec3::ZERO)),
                _ => None,
            })
            .collect()
    }
}

/// Receiver of finished frames. The sink clears, draws and presents.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame);
}

/// Sink that keeps every frame it receives.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FrameRecorder {
    pub frames: Vec<Frame>,
}

#[cfg(test)]
impl FrameSink for FrameRecorder {
    fn present(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
