//! Orrery core: celestial bodies, their orbital hierarchy, and the camera.
//!
//! The platform layer drives an [`OrbitalSystem`] through three callbacks:
//! [`on_update`](OrbitalSystem::on_update) from the idle loop,
//! [`on_display`](OrbitalSystem::on_display) when a frame is due, and
//! [`on_keyboard`](OrbitalSystem::on_keyboard) for key presses. Each display
//! builds a [`Frame`] (an ordered list of [`DrawCommand`]s) and hands it to a
//! [`FrameSink`], which owns the actual graphics surface.

pub mod body;
pub mod camera;
pub mod catalog;
pub mod frame;
pub mod shading;
pub mod system;

pub use body::{BodyDescriptor, BodyId, CelestialBody, DEFAULT_ORBIT_SEGMENTS, orbital_speed};
pub use camera::{CameraAction, CameraController, DEFAULT_REST_DISTANCE, DEFAULT_STEP};
pub use catalog::{BODY_COUNT, SELF_ROTATION_SPEED, solar_system, solar_system_builder};
pub use frame::{DEFAULT_CLEAR_COLOR, DrawCommand, Frame, FrameSink, Projection};
pub use shading::{BodyKind, Material, MaterialParams, PointLight};
pub use system::{OrbitalSystem, OrbitalSystemBuilder};
