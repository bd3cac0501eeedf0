//! A single orbiting body and its per-tick motion.

use glam::{DMat4, DVec3};

use crate::frame::DrawCommand;
use crate::shading::BodyKind;

/// Vertices used to approximate an orbit ring.
pub const DEFAULT_ORBIT_SEGMENTS: u32 = 1440;

/// Index of a body inside its [`OrbitalSystem`](crate::OrbitalSystem).
///
/// Ids are handed out in insertion order and are only valid for the system
/// that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Angular speed in degrees per day for an orbital period in days.
///
/// Non-positive periods mean the body does not orbit.
pub fn orbital_speed(period_days: f64) -> f64 {
    if period_days > 0.0 {
        360.0 / period_days
    } else {
        0.0
    }
}

/// Construction parameters for a [`CelestialBody`].
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    pub name: String,
    pub radius: f64,
    pub distance: f64,
    pub period: f64,
    pub self_speed: f64,
    pub color: [f32; 4],
    pub kind: BodyKind,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, radius: f64, distance: f64, period: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            distance,
            period,
            self_speed: 0.0,
            color: [1.0, 1.0, 1.0, 1.0],
            kind: BodyKind::Plain,
        }
    }

    pub fn with_self_speed(mut self, degrees_per_tick: f64) -> Self {
        self.self_speed = degrees_per_tick;
        self
    }

    /// Set an opaque RGB color.
    pub fn with_color(mut self, rgb: [f32; 3]) -> Self {
        self.color = [rgb[0], rgb[1], rgb[2], 1.0];
        self
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A sphere that orbits its parent in the XY plane and spins about its own
/// Z axis.
///
/// Angles accumulate without wrapping; they are only ever fed to rotations.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    name: String,
    radius: f64,
    distance: f64,
    speed: f64,
    self_speed: f64,
    angle: f64,
    self_angle: f64,
    color: [f32; 4],
    parent: Option<BodyId>,
    kind: BodyKind,
}

impl CelestialBody {
    pub fn new(descriptor: BodyDescriptor, parent: Option<BodyId>) -> Self {
        Self {
            speed: orbital_speed(descriptor.period),
            name: descriptor.name,
            radius: descriptor.radius,
            distance: descriptor.distance,
            self_speed: descriptor.self_speed,
            angle: 0.0,
            self_angle: 0.0,
            color: descriptor.color,
            parent,
            kind: descriptor.kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Orbit radius around the parent's center.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Orbital angular speed in degrees per day.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Spin in degrees per tick, independent of the time step.
    pub fn self_speed(&self) -> f64 {
        self.self_speed
    }

    /// Accumulated orbital angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Accumulated spin angle in degrees.
    pub fn self_angle(&self) -> f64 {
        self.self_angle
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    /// Advance orbit by `time_delta` days and spin by one tick.
    pub fn update(&mut self, time_delta: f64) {
        self.angle += time_delta * self.speed;
        self.self_angle += self.self_speed;
    }

    /// Frame whose origin is the center of this body's orbit.
    ///
    /// A parent only offsets the orbit when it is itself displaced from the
    /// origin; a body orbiting a centered root orbits the origin.
    pub fn orbit_frame(&self, parent: Option<&CelestialBody>) -> DMat4 {
        match parent {
            Some(parent) if parent.distance > 0.0 => {
                rotation_z(parent.angle) * DMat4::from_translation(DVec3::X * parent.distance)
            }
            _ => DMat4::IDENTITY,
        }
    }

    /// Frame of the sphere itself: orbit frame, orbital rotation, radial
    /// translation, then spin.
    pub fn model_transform(&self, parent: Option<&CelestialBody>) -> DMat4 {
        self.orbit_frame(parent)
            * rotation_z(self.angle)
            * DMat4::from_translation(DVec3::X * self.distance)
            * rotation_z(self.self_angle)
    }

    /// World-space center.
    pub fn position(&self, parent: Option<&CelestialBody>) -> DVec3 {
        self.model_transform(parent).transform_point3(DVec3::ZERO)
    }

    /// Append this body's draw sequence to `out`.
    ///
    /// The caller resolves `parent` from [`parent`](Self::parent); passing a
    /// different body draws the orbit around that body instead.
    pub fn draw(&self, parent: Option<&CelestialBody>, orbit_segments: u32, out: &mut Vec<DrawCommand>) {
        if let Some(light) = self.kind.light() {
            out.push(DrawCommand::Light(*light));
        }
        if let Some(material) = self.kind.material() {
            out.push(DrawCommand::Material(material.with_emission(self.color)));
        }

        let orbit_frame = self.orbit_frame(parent);
        out.push(DrawCommand::OrbitRing {
            transform: orbit_frame,
            radius: self.distance,
            segments: orbit_segments,
            color: self.color,
        });
        out.push(DrawCommand::Sphere {
            transform: self.model_transform(parent),
            radius: self.radius,
            color: self.color,
        });
    }
}

fn rotation_z(degrees: f64) -> DMat4 {
    DMat4::from_rotation_z(degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::{Material, PointLight};

    const EPS: f64 = 1e-9;

    fn earth() -> CelestialBody {
        CelestialBody::new(
            BodyDescriptor::new("Earth", 19.13, 168.0, 365.0)
                .with_self_speed(3.0)
                .with_color([0.0, 1.0, 0.0])
                .with_kind(BodyKind::lit()),
            Some(BodyId(0)),
        )
    }

    fn command_names(commands: &[DrawCommand]) -> Vec<&'static str> {
        commands
            .iter()
            .map(|c| match c {
                DrawCommand::Light(_) => "light",
                DrawCommand::Material(_) => "material",
                DrawCommand::OrbitRing { .. } => "ring",
                DrawCommand::Sphere { .. } => "sphere",
            })
            .collect()
    }

    #[test]
    fn test_orbital_speed_from_period() {
        assert!((orbital_speed(365.0) - 360.0 / 365.0).abs() < EPS);
        assert!((orbital_speed(30.0) - 12.0).abs() < EPS);
        assert_eq!(orbital_speed(0.0), 0.0);
        assert_eq!(orbital_speed(-5.0), 0.0);
    }

    #[test]
    fn test_new_body_starts_at_zero_angles() {
        let body = earth();
        assert_eq!(body.angle(), 0.0);
        assert_eq!(body.self_angle(), 0.0);
        assert_eq!(body.color(), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(body.parent(), Some(BodyId(0)));
    }

    #[test]
    fn test_update_advances_both_angles() {
        let mut body = earth();
        body.update(1.0);
        assert!((body.angle() - 360.0 / 365.0).abs() < EPS);
        assert!((body.self_angle() - 3.0).abs() < EPS);

        body.update(2.5);
        assert!((body.angle() - 3.5 * 360.0 / 365.0).abs() < EPS);
        assert!((body.self_angle() - 6.0).abs() < EPS);
    }

    #[test]
    fn test_zero_time_step_still_spins() {
        let mut body = earth();
        body.update(0.0);
        assert_eq!(body.angle(), 0.0);
        assert!((body.self_angle() - 3.0).abs() < EPS);
    }

    #[test]
    fn test_non_orbiting_body_keeps_angle() {
        let mut sun = CelestialBody::new(
            BodyDescriptor::new("Sun", 48.74, 0.0, 0.0).with_self_speed(3.0),
            None,
        );
        for _ in 0..100 {
            sun.update(1.0);
        }
        assert_eq!(sun.angle(), 0.0);
        assert!((sun.self_angle() - 300.0).abs() < EPS);
    }

    #[test]
    fn test_negative_time_step_reverses_orbit() {
        let mut body = earth();
        body.update(-1.0);
        assert!((body.angle() + 360.0 / 365.0).abs() < EPS);
    }

    #[test]
    fn test_position_after_quarter_orbit() {
        let mut body = CelestialBody::new(BodyDescriptor::new("Probe", 1.0, 100.0, 360.0), None);
        body.update(90.0);
        let p = body.position(None);
        assert!(p.x.abs() < 1e-9, "x = {}", p.x);
        assert!((p.y - 100.0).abs() < 1e-9, "y = {}", p.y);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn test_centered_parent_does_not_offset_orbit() {
        let mut sun = CelestialBody::new(BodyDescriptor::new("Sun", 48.74, 0.0, 0.0), None);
        sun.update(1.0);
        let body = earth();
        assert_eq!(body.orbit_frame(Some(&sun)), DMat4::IDENTITY);
        assert!((body.position(Some(&sun)) - DVec3::new(168.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_satellite_orbits_displaced_parent() {
        let mut parent = CelestialBody::new(BodyDescriptor::new("Planet", 10.0, 100.0, 360.0), None);
        parent.update(90.0);
        let moon = CelestialBody::new(BodyDescriptor::new("Moon", 1.0, 10.0, 30.0), Some(BodyId(0)));

        let center = moon.orbit_frame(Some(&parent)).transform_point3(DVec3::ZERO);
        assert!((center - parent.position(None)).length() < 1e-9);

        // Moon at angle 0 sits one orbit radius further out along the parent's radial line.
        let p = moon.position(Some(&parent));
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_orbit_radius_is_distance() {
        let body = earth();
        let p = body.position(None);
        assert!((p.length() - 168.0).abs() < EPS);
    }

    #[test]
    fn test_spin_does_not_move_center() {
        let mut a = earth();
        let b = earth();
        a.self_angle = 123.0;
        assert!((a.position(None) - b.position(None)).length() < EPS);
    }

    #[test]
    fn test_plain_draw_sequence() {
        let body = CelestialBody::new(
            BodyDescriptor::new("Rock", 2.0, 50.0, 10.0).with_color([0.5, 0.5, 0.5]),
            None,
        );
        let mut out = Vec::new();
        body.draw(None, 64, &mut out);
        assert_eq!(command_names(&out), ["ring", "sphere"]);

        match &out[0] {
            DrawCommand::OrbitRing { radius, segments, color, .. } => {
                assert_eq!(*radius, 50.0);
                assert_eq!(*segments, 64);
                assert_eq!(*color, [0.5, 0.5, 0.5, 1.0]);
            }
            other => panic!("expected ring, got {other:?}"),
        }
        match &out[1] {
            DrawCommand::Sphere { radius, .. } => assert_eq!(*radius, 2.0),
            other => panic!("expected sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_material_draw_sequence() {
        let body = earth();
        let mut out = Vec::new();
        body.draw(None, DEFAULT_ORBIT_SEGMENTS, &mut out);
        assert_eq!(command_names(&out), ["material", "ring", "sphere"]);

        match &out[0] {
            DrawCommand::Material(params) => {
                assert_eq!(*params, Material::default().with_emission([0.0, 1.0, 0.0, 1.0]));
            }
            other => panic!("expected material, got {other:?}"),
        }
    }

    #[test]
    fn test_light_emitting_draw_sequence() {
        let sun = CelestialBody::new(
            BodyDescriptor::new("Sun", 48.74, 0.0, 0.0)
                .with_color([1.0, 0.0, 0.0])
                .with_kind(BodyKind::radiant()),
            None,
        );
        let mut out = Vec::new();
        sun.draw(None, DEFAULT_ORBIT_SEGMENTS, &mut out);
        assert_eq!(command_names(&out), ["light", "material", "ring", "sphere"]);
        assert_eq!(out[0], DrawCommand::Light(PointLight::default()));
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let body = earth();
        let before = body.clone();
        let mut out = Vec::new();
        body.draw(None, 16, &mut out);
        body.draw(None, 16, &mut out);
        assert_eq!(body, before);
        assert_eq!(out.len(), 6);
    }
}
