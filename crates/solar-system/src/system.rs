//! The body arena and the three host-facing callbacks.

use glam::DVec3;
use tracing::{debug, info, trace, warn};

use crate::body::{BodyDescriptor, BodyId, CelestialBody, DEFAULT_ORBIT_SEGMENTS};
use crate::camera::CameraController;
use crate::frame::{DEFAULT_CLEAR_COLOR, Frame, FrameSink, Projection};

/// An ordered collection of bodies plus the camera that looks at them.
///
/// Bodies live in insertion order and refer to their parent by [`BodyId`].
/// A parent must exist before its satellites can be added, so iteration
/// order is always parent-before-child.
#[derive(Clone, Debug)]
pub struct OrbitalSystem {
    bodies: Vec<CelestialBody>,
    camera: CameraController,
    projection: Projection,
    clear_color: [f32; 4],
    orbit_segments: u32,
    ticks: u64,
}

impl OrbitalSystem {
    pub fn builder() -> OrbitalSystemBuilder {
        OrbitalSystemBuilder::default()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    /// Look up a body by name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name() == name).map(BodyId)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    /// Number of update ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// World-space center of a body as it is drawn this frame.
    pub fn position(&self, id: BodyId) -> Option<DVec3> {
        let body = self.body(id)?;
        Some(body.position(self.parent_of(body)))
    }

    fn parent_of(&self, body: &CelestialBody) -> Option<&CelestialBody> {
        body.parent().and_then(|id| self.bodies.get(id.0))
    }

    /// Build the frame for the current state without presenting it.
    pub fn frame(&self) -> Frame {
        let mut commands = Vec::with_capacity(self.bodies.len() * 4);
        for body in &self.bodies {
            body.draw(self.parent_of(body), self.orbit_segments, &mut commands);
        }

        Frame {
            clear_color: self.clear_color,
            projection: self.projection,
            view: self.camera.view_matrix(),
            eye: self.camera.eye,
            lighting: true,
            depth_test: true,
            commands,
        }
    }

    /// Render the current state to `sink`.
    pub fn on_display<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        let frame = self.frame();
        trace!(commands = frame.commands.len(), "display");
        sink.present(&frame);
    }

    /// Advance every body by `time_delta` days without drawing.
    pub fn advance(&mut self, time_delta: f64) {
        for body in &mut self.bodies {
            body.update(time_delta);
        }
        self.ticks += 1;
        trace!(tick = self.ticks, time_delta, "bodies advanced");
    }

    /// Advance every body, then render.
    pub fn on_update<S: FrameSink + ?Sized>(&mut self, time_delta: f64, sink: &mut S) {
        self.advance(time_delta);
        self.on_display(sink);
    }

    /// Forward a key press to the camera. Cursor coordinates are ignored.
    pub fn on_keyboard(&mut self, key: char, _x: i32, _y: i32) {
        if self.camera.handle_key(key) {
            debug!(key = %key, eye = ?self.camera.eye, "camera moved");
        }
    }
}

/// Incremental construction of an [`OrbitalSystem`].
#[derive(Clone, Debug)]
pub struct OrbitalSystemBuilder {
    bodies: Vec<CelestialBody>,
    camera: CameraController,
    projection: Projection,
    clear_color: [f32; 4],
    orbit_segments: u32,
}

impl Default for OrbitalSystemBuilder {
    fn default() -> Self {
        Self {
            bodies: Vec::new(),
            camera: CameraController::default(),
            projection: Projection::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
            orbit_segments: DEFAULT_ORBIT_SEGMENTS,
        }
    }
}

impl OrbitalSystemBuilder {
    /// Add a body with no parent.
    pub fn add_root(&mut self, descriptor: BodyDescriptor) -> BodyId {
        self.push(descriptor, None)
    }

    /// Add a body orbiting `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this builder.
    pub fn add_satellite(&mut self, parent: BodyId, descriptor: BodyDescriptor) -> BodyId {
        assert!(
            parent.0 < self.bodies.len(),
            "parent {parent:?} must be added before its satellites"
        );
        self.push(descriptor, Some(parent))
    }

    fn push(&mut self, descriptor: BodyDescriptor, parent: Option<BodyId>) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(CelestialBody::new(descriptor, parent));
        id
    }

    pub fn camera(mut self, camera: CameraController) -> Self {
        self.camera = camera;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn orbit_segments(mut self, segments: u32) -> Self {
        self.orbit_segments = segments;
        self
    }

    pub fn build(self) -> OrbitalSystem {
        let roots = self.bodies.iter().filter(|b| b.parent().is_none()).count();
        if roots > 1 {
            warn!(roots, "orbital system has more than one root body");
        }
        info!(bodies = self.bodies.len(), "orbital system built");

        OrbitalSystem {
            bodies: self.bodies,
            camera: self.camera,
            projection: self.projection,
            clear_color: self.clear_color,
            orbit_segments: self.orbit_segments,
            ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{DrawCommand, FrameRecorder};
    use crate::shading::BodyKind;

    const EPS: f64 = 1e-9;

    /// Root, a child on a 100-day orbit, and a grandchild on a 10-day orbit.
    fn three_body() -> (OrbitalSystem, BodyId, BodyId, BodyId) {
        let mut builder = OrbitalSystem::builder();
        let root = builder.add_root(BodyDescriptor::new("root", 10.0, 0.0, 0.0).with_kind(BodyKind::radiant()));
        let child = builder.add_satellite(root, BodyDescriptor::new("child", 5.0, 100.0, 100.0));
        let grandchild = builder.add_satellite(child, BodyDescriptor::new("grandchild", 1.0, 10.0, 10.0));
        (builder.build(), root, child, grandchild)
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let (system, root, child, grandchild) = three_body();
        assert_eq!(root.index(), 0);
        assert_eq!(child.index(), 1);
        assert_eq!(grandchild.index(), 2);
        assert_eq!(system.len(), 3);
        assert_eq!(system.find("child"), Some(child));
        assert_eq!(system.find("nobody"), None);
    }

    #[test]
    #[should_panic(expected = "must be added before")]
    fn test_satellite_of_unknown_parent_panics() {
        let mut builder = OrbitalSystem::builder();
        builder.add_satellite(BodyId(3), BodyDescriptor::new("orphan", 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_nested_revolutions_after_one_hundred_ticks() {
        let (mut system, root, child, grandchild) = three_body();
        let mut sink = FrameRecorder::default();
        for _ in 0..100 {
            system.on_update(1.0, &mut sink);
        }

        assert_eq!(system.ticks(), 100);
        assert_eq!(sink.frames.len(), 100);
        assert_eq!(system.body(root).map(|b| b.angle()), Some(0.0));
        let child_angle = system.body(child).map(|b| b.angle()).unwrap_or_default();
        let grandchild_angle = system.body(grandchild).map(|b| b.angle()).unwrap_or_default();
        assert!((child_angle - 360.0).abs() < 1e-9, "child angle {child_angle}");
        assert!((grandchild_angle - 3600.0).abs() < 1e-9, "grandchild angle {grandchild_angle}");
    }

    #[test]
    fn test_angle_after_n_ticks_is_linear() {
        let (mut system, _, child, _) = three_body();
        for _ in 0..37 {
            system.advance(1.0);
        }
        let body = system.body(child).unwrap();
        assert!((body.angle() - 37.0 * 3.6).abs() < EPS);
        assert_eq!(body.self_angle(), 0.0);
    }

    #[test]
    fn test_satellite_position_composes_parent_and_own_offset() {
        let (mut system, _, child, grandchild) = three_body();
        for _ in 0..7 {
            system.advance(1.0);
        }

        let theta_p = system.body(child).unwrap().angle().to_radians();
        let theta_s = system.body(grandchild).unwrap().angle().to_radians();

        // The satellite's own angle is measured in its parent's rotated frame.
        let parent_offset = DVec3::new(100.0 * theta_p.cos(), 100.0 * theta_p.sin(), 0.0);
        let own_offset = DVec3::new(
            10.0 * (theta_p + theta_s).cos(),
            10.0 * (theta_p + theta_s).sin(),
            0.0,
        );

        let p = system.position(grandchild).unwrap();
        assert!((p - (parent_offset + own_offset)).length() < 1e-9, "got {p:?}");
        assert!((system.position(child).unwrap() - parent_offset).length() < 1e-9);
    }

    #[test]
    fn test_display_twice_is_identical() {
        let (mut system, ..) = three_body();
        system.advance(3.0);
        let mut sink = FrameRecorder::default();
        system.on_display(&mut sink);
        system.on_display(&mut sink);
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(sink.frames[0], sink.frames[1]);
        assert_eq!(system.ticks(), 1);
    }

    #[test]
    fn test_update_is_visible_in_same_frame() {
        let (mut system, _, child, _) = three_body();
        let mut sink = FrameRecorder::default();
        system.on_update(25.0, &mut sink);

        let centers = sink.frames[0].sphere_centers();
        let expected = system.position(child).unwrap();
        assert!((centers[1] - expected).length() < EPS);
        assert!((expected - DVec3::new(0.0, 100.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_frame_draws_bodies_in_order() {
        let (system, ..) = three_body();
        let frame = system.frame();

        assert!(frame.lighting);
        assert!(frame.depth_test);
        assert_eq!(frame.clear_color, DEFAULT_CLEAR_COLOR);
        assert_eq!(frame.eye, system.camera().eye);
        // Light + material + ring + sphere for the root, ring + sphere for the others.
        assert_eq!(frame.commands.len(), 4 + 2 + 2);
        assert!(matches!(frame.commands[0], DrawCommand::Light(_)));
        assert!(matches!(frame.commands[7], DrawCommand::Sphere { radius, .. } if radius == 1.0));
    }

    #[test]
    fn test_keyboard_moves_camera_and_ignores_cursor() {
        let (mut system, ..) = three_body();
        system.on_keyboard('d', 123, -4);
        assert_eq!(system.camera().eye.x, 20.0);
        system.on_keyboard('?', 0, 0);
        assert_eq!(system.camera().eye.x, 20.0);
        system.on_keyboard('r', 0, 0);
        assert_eq!(system.camera().eye, DVec3::new(0.0, -700.0, 700.0));
    }

    #[test]
    fn test_keyboard_changes_view_of_next_frame() {
        let (mut system, ..) = three_body();
        let before = system.frame().view;
        system.on_keyboard('w', 0, 0);
        assert_ne!(system.frame().view, before);
    }

    #[test]
    fn test_builder_settings_reach_frame() {
        let mut builder = OrbitalSystem::builder()
            .clear_color([0.0, 0.0, 0.0, 1.0])
            .orbit_segments(90)
            .projection(Projection {
                aspect_ratio: 2.0,
                ..Projection::default()
            });
        builder.add_root(BodyDescriptor::new("solo", 1.0, 5.0, 10.0));
        let frame = builder.build().frame();

        assert_eq!(frame.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.projection.aspect_ratio, 2.0);
        assert!(matches!(frame.commands[0], DrawCommand::OrbitRing { segments: 90, .. }));
    }
}
