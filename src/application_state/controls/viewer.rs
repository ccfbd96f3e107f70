//! # Viewer
//!
//! The first-person pose moved around by the control schemes.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Point3, Rad, Vector3};

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// A first-person position and orientation.
///
/// # Fields
/// - `position`: The eye position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    /// The eye position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Viewer {
    /// Creates a level viewer looking along +X.
    pub fn new<V: Into<Point3<f32>>>(position: V) -> Self {
        Viewer {
            position: position.into(),
            yaw: Rad(0.0),
            pitch: Rad(0.0),
        }
    }

    /// Unit vector pointing forward along the ground.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_cos, 0.0, yaw_sin).normalize()
    }

    /// Unit vector pointing right along the ground.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos).normalize()
    }

    /// Moves along the ground by `forward` and `right` units.
    pub fn walk(&mut self, forward: f32, right: f32) {
        self.position += self.forward() * forward + self.right() * right;
    }

    /// Turns by screen-space deltas scaled by `sensitivity` radians per pixel.
    ///
    /// Moving right turns right and moving down looks down. Pitch is clamped just short of
    /// straight up and straight down.
    pub fn turn(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.yaw += Rad(delta_x * sensitivity);
        self.pitch += Rad(-delta_y * sensitivity);

        // Clamp pitch to prevent gimbal lock
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}
