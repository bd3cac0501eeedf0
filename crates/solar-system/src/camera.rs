//! Key-driven look-at camera.

use glam::{DMat4, DVec3};

/// World units moved per key press.
pub const DEFAULT_STEP: f64 = 20.0;

/// Distance along -Y and +Z of the resting eye from the origin.
pub const DEFAULT_REST_DISTANCE: f64 = 700.0;

/// A single camera mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraAction {
    /// `w`: eye.y += step
    Forward,
    /// `x`: eye.y -= step
    Back,
    /// `s`: eye.z += step
    Ascend,
    /// `S`: eye.z -= step
    Descend,
    /// `a`: eye.x -= step
    Left,
    /// `d`: eye.x += step
    Right,
    /// `r`: return to the resting pose
    Reset,
}

impl CameraAction {
    /// Map a typed character to an action. Case matters: `s` and `S` differ.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Forward),
            'x' => Some(Self::Back),
            's' => Some(Self::Ascend),
            'S' => Some(Self::Descend),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            'r' => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Eye, target and up vector of a look-at camera.
///
/// Nothing keeps the up vector away from the view direction; moving the eye
/// straight above the target produces a degenerate view.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraController {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    step: f64,
    rest_distance: f64,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, DEFAULT_REST_DISTANCE)
    }
}

impl CameraController {
    /// Create a camera in its resting pose.
    pub fn new(step: f64, rest_distance: f64) -> Self {
        let mut camera = Self {
            eye: DVec3::ZERO,
            target: DVec3::ZERO,
            up: DVec3::Z,
            step,
            rest_distance,
        };
        camera.reset();
        camera
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn rest_distance(&self) -> f64 {
        self.rest_distance
    }

    /// The pose [`reset`](Self::reset) returns to, as (eye, target, up).
    pub fn rest_pose(&self) -> (DVec3, DVec3, DVec3) {
        (
            DVec3::new(0.0, -self.rest_distance, self.rest_distance),
            DVec3::ZERO,
            DVec3::Z,
        )
    }

    pub fn reset(&mut self) {
        (self.eye, self.target, self.up) = self.rest_pose();
    }

    pub fn apply(&mut self, action: CameraAction) {
        match action {
            CameraAction::Forward => self.eye.y += self.step,
            CameraAction::Back => self.eye.y -= self.step,
            CameraAction::Ascend => self.eye.z += self.step,
            CameraAction::Descend => self.eye.z -= self.step,
            CameraAction::Left => self.eye.x -= self.step,
            CameraAction::Right => self.eye.x += self.step,
            CameraAction::Reset => self.reset(),
        }
    }

    /// Apply the action bound to `key`. Returns `false` for unbound keys.
    pub fn handle_key(&mut self, key: char) -> bool {
        match CameraAction::from_key(key) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }
}
