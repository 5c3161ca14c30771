use glam::Vec3;

use crate::camera::Camera;
use crate::input::Command;

/// Movement flags for the six translation axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveState {
    pub forward: bool,
    pub left: bool,
    pub back: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
}

impl MoveState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.forward || self.left || self.back || self.right || self.ascend || self.descend
    }
}

/// Translates input events into camera motion.
///
/// Speed and sensitivity start from configurable values; speed itself is
/// unbounded and scales by powers of two through dedicated key releases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controller {
    pub movement: MoveState,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(0.01, 0.1)
    }
}

impl Controller {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            movement: MoveState::default(),
            speed,
            sensitivity,
        }
    }

    /// Feeds one key transition. Translation commands track the key state;
    /// speed changes fire on release only.
    pub fn handle_command(&mut self, command: Command, pressed: bool) {
        match command {
            Command::Forward => self.movement.forward = pressed,
            Command::Left => self.movement.left = pressed,
            Command::Back => self.movement.back = pressed,
            Command::Right => self.movement.right = pressed,
            Command::Ascend => self.movement.ascend = pressed,
            Command::Descend => self.movement.descend = pressed,
            Command::SpeedUp => {
                if !pressed {
                    self.speed *= 2.0;
                }
            }
            Command::SpeedDown => {
                if !pressed {
                    self.speed /= 2.0;
                }
            }
            Command::Unlock => {}
        }
    }

    /// Applies a raw mouse delta in pixels to the camera orientation.
    /// Vertical motion tilts the polar angle, horizontal motion swings the
    /// azimuth the opposite way.
    pub fn apply_mouse_delta(&self, camera: &mut Camera, dx: f32, dy: f32) {
        camera.apply_look(self.sensitivity * dy, -self.sensitivity * dx);
    }

    /// Advances the camera by one frame of movement.
    ///
    /// Per-axis contributions are summed and scaled by speed without
    /// normalization, so diagonal movement covers more ground per frame.
    /// Forward/back/left/right stay in the horizontal plane; descend uses
    /// fixed world-down rather than the negated up vector.
    pub fn step(&self, camera: &mut Camera) {
        if !self.movement.any() {
            return;
        }
        let dir = camera.dir();
        let up = camera.up;
        let right = dir.cross(up).normalize();
        let back = right.cross(up).normalize();
        let left = up.cross(dir).normalize();
        let forward = up.cross(right).normalize();
        let descend = Vec3::new(0.0, 0.0, -1.0);

        let mut delta = Vec3::ZERO;
        if self.movement.forward {
            delta += forward;
        }
        if self.movement.left {
            delta += left;
        }
        if self.movement.back {
            delta += back;
        }
        if self.movement.right {
            delta += right;
        }
        if self.movement.ascend {
            delta += up;
        }
        if self.movement.descend {
            delta += descend;
        }
        camera.eye += delta * self.speed;
    }
}
