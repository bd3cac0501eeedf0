//! The stock solar system: the Sun, eight planets and the Moon.
//!
//! Radii and distances are display units, not astronomical ones. Periods are
//! in days.

use crate::body::BodyDescriptor;
use crate::shading::BodyKind;
use crate::system::{OrbitalSystem, OrbitalSystemBuilder};

/// Spin in degrees per tick shared by every body.
pub const SELF_ROTATION_SPEED: f64 = 3.0;

pub const BODY_COUNT: usize = 10;

struct Entry {
    name: &'static str,
    radius: f64,
    distance: f64,
    period: f64,
    color: [f32; 3],
}

const fn entry(name: &'static str, radius: f64, distance: f64, period: f64, color: [f32; 3]) -> Entry {
    Entry {
        name,
        radius,
        distance,
        period,
        color,
    }
}

const SUN: Entry = entry("Sun", 48.74, 0.0, 0.0, [1.0, 0.0, 0.0]);
const EARTH: Entry = entry("Earth", 19.13, 168.00, 365.0, [0.0, 1.0, 0.0]);
const MOON: Entry = entry("Moon", 6.15, 26.01, 30.0, [1.0, 1.0, 0.0]);

const INNER: [Entry; 2] = [
    entry("Mercury", 7.32, 62.06, 87.0, [0.2, 0.2, 0.5]),
    entry("Venus", 18.15, 115.56, 225.0, [1.0, 0.7, 0.0]),
];

const OUTER: [Entry; 5] = [
    entry("Mars", 10.19, 228.00, 687.0, [1.0, 0.5, 0.5]),
    entry("Jupiter", 42.90, 333.40, 1298.4, [1.0, 1.0, 0.5]),
    entry("Saturn", 36.16, 428.10, 3225.6, [0.5, 1.0, 0.5]),
    entry("Uranus", 25.56, 848.00, 3066.4, [0.4, 0.4, 0.4]),
    entry("Neptune", 24.78, 949.10, 6014.8, [0.5, 0.5, 1.0]),
];

fn descriptor(entry: &Entry, kind: BodyKind) -> BodyDescriptor {
    BodyDescriptor::new(entry.name, entry.radius, entry.distance, entry.period)
        .with_self_speed(SELF_ROTATION_SPEED)
        .with_color(entry.color)
        .with_kind(kind)
}

/// Add the stock bodies to `builder`, Sun first and the Moon right after Earth.
pub fn solar_system_builder(mut builder: OrbitalSystemBuilder) -> OrbitalSystemBuilder {
    let sun = builder.add_root(descriptor(&SUN, BodyKind::radiant()));
    for planet in &INNER {
        builder.add_satellite(sun, descriptor(planet, BodyKind::lit()));
    }
    let earth = builder.add_satellite(sun, descriptor(&EARTH, BodyKind::lit()));
    builder.add_satellite(earth, descriptor(&MOON, BodyKind::lit()));
    for planet in &OUTER {
        builder.add_satellite(sun, descriptor(planet, BodyKind::lit()));
    }
    builder
}

/// The stock solar system with default camera and projection.
pub fn solar_system() -> OrbitalSystem {
    solar_system_builder(OrbitalSystem::builder()).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::orbital_speed;

    #[test]
    fn test_catalog_order_and_size() {
        let system = solar_system();
        let names: Vec<_> = system.bodies().iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["Sun", "Mercury", "Venus", "Earth", "Moon", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        assert_eq!(system.len(), BODY_COUNT);
    }

    #[test]
    fn test_single_root_and_one_nested_satellite() {
        let system = solar_system();
        let sun = system.find("Sun").unwrap();
        let earth = system.find("Earth").unwrap();

        let roots: Vec<_> = system.bodies().iter().filter(|b| b.parent().is_none()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].distance(), 0.0);

        for body in system.bodies().iter().skip(1) {
            let expected = if body.name() == "Moon" { earth } else { sun };
            assert_eq!(body.parent(), Some(expected), "{}", body.name());
        }
    }

    #[test]
    fn test_only_the_sun_emits_light() {
        let system = solar_system();
        for body in system.bodies() {
            let emits = body.kind().light().is_some();
            assert_eq!(emits, body.name() == "Sun", "{}", body.name());
            assert!(body.kind().material().is_some(), "{} should be lit", body.name());
        }
    }

    #[test]
    fn test_speeds_derive_from_periods() {
        let system = solar_system();
        for body in system.bodies() {
            assert_eq!(body.self_speed(), SELF_ROTATION_SPEED);
        }
        let sun = system.body(system.find("Sun").unwrap()).unwrap();
        assert_eq!(sun.speed(), 0.0);
        let jupiter = system.body(system.find("Jupiter").unwrap()).unwrap();
        assert!((jupiter.speed() - orbital_speed(1298.4)).abs() < 1e-12);
    }

    #[test]
    fn test_moon_trails_earth() {
        let mut system = solar_system();
        for _ in 0..50 {
            system.advance(1.0);
        }
        let earth = system.position(system.find("Earth").unwrap()).unwrap();
        let moon = system.position(system.find("Moon").unwrap()).unwrap();
        assert!(((moon - earth).length() - 26.01).abs() < 1e-9);
    }
}
