//! # Desktop Controls
//!
//! Keyboard movement and mouse look.
//!
//! - `W`/`S` or the up/down arrows walk forward and back
//! - `A`/`D` or the left/right arrows strafe
//! - Either shift key sprints
//! - Mouse motion turns the view

use cgmath::{InnerSpace, Vector2};
use winit::keyboard::KeyCode;

use super::viewer::Viewer;
use crate::{
    application_state::input_state::ProcessedInputState, engine_state::config::ControlsConfig,
};

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const BACKWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const SPRINT_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];

/// Keyboard and mouse controls.
#[derive(Debug, Clone)]
pub struct DesktopScheme {
    /// The pose being controlled
    pub viewer: Viewer,
    walk_speed: f32,
    sprint_speed: f32,
    mouse_sensitivity: f32,
    enabled: bool,
}

impl DesktopScheme {
    /// Creates enabled desktop controls for `viewer`.
    pub fn new(viewer: Viewer, config: &ControlsConfig) -> Self {
        DesktopScheme {
            viewer,
            walk_speed: config.walk_speed,
            sprint_speed: config.sprint_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            enabled: true,
        }
    }

    /// Applies one frame of input.
    ///
    /// Diagonal movement is normalised so it is no faster than straight movement.
    pub fn update(&mut self, dt: f32, input: &ProcessedInputState) {
        if !self.enabled {
            return;
        }

        if let Some((delta_x, delta_y)) = input.get_mouse_delta() {
            self.viewer
                .turn(delta_x as f32, delta_y as f32, self.mouse_sensitivity);
        }

        let direction = Vector2::new(
            key_axis(input, &FORWARD_KEYS, &BACKWARD_KEYS),
            key_axis(input, &RIGHT_KEYS, &LEFT_KEYS),
        );
        if direction == Vector2::new(0.0, 0.0) {
            return;
        }

        let speed = if input.any_active(&SPRINT_KEYS) {
            self.sprint_speed
        } else {
            self.walk_speed
        };
        let step = direction.normalize() * speed * dt;
        self.viewer.walk(step.x, step.y);
    }

    /// Resumes reacting to input.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops reacting to input until enabled again.
    pub fn disable(&mut self) {
        self.enabled = false;
    }
}

/// `1` if only a positive key is down, `-1` if only a negative one is, `0` otherwise.
fn key_axis(input: &ProcessedInputState, positive: &[KeyCode], negative: &[KeyCode]) -> f32 {
    (input.any_active(positive) as i32 - input.any_active(negative) as i32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::input_state::RawInputState;
    use cgmath::{Point3, Rad};

    fn input(keys: &[KeyCode]) -> ProcessedInputState {
        let mut input = ProcessedInputState::default();
        for key in keys {
            input.keyboard_states.insert(*key, RawInputState::Held);
        }
        input
    }

    fn scheme() -> DesktopScheme {
        DesktopScheme::new(Viewer::new([0.0, 70.0, 0.0]), &ControlsConfig::default())
    }

    #[test]
    fn walks_and_sprints_forward() {
        let mut desktop = scheme();
        desktop.update(1.0, &input(&[KeyCode::KeyW]));
        assert!((desktop.viewer.position.x - 4.317).abs() < 1e-4);

        let mut desktop = scheme();
        desktop.update(1.0, &input(&[KeyCode::ArrowUp, KeyCode::ShiftRight]));
        assert!((desktop.viewer.position.x - 5.612).abs() < 1e-4);
        assert_eq!(desktop.viewer.position.y, 70.0);
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let mut desktop = scheme();
        desktop.update(1.0, &input(&[KeyCode::KeyW, KeyCode::KeyD]));
        let moved = desktop.viewer.position - Point3::new(0.0, 70.0, 0.0);
        assert!((moved.magnitude() - 4.317).abs() < 1e-4);
        assert!(moved.z > 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut desktop = scheme();
        desktop.update(1.0, &input(&[KeyCode::KeyA, KeyCode::KeyD]));
        assert_eq!(desktop.viewer.position, Point3::new(0.0, 70.0, 0.0));
    }

    #[test]
    fn mouse_turns_the_view() {
        let mut desktop = scheme();
        let mut frame = input(&[]);
        frame.mouse_delta = Some((100.0, 0.0));
        desktop.update(0.016, &frame);
        assert!((desktop.viewer.yaw.0 - 0.2).abs() < 1e-6);
        assert_eq!(desktop.viewer.pitch, Rad(0.0));
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut desktop = scheme();
        desktop.disable();
        desktop.update(1.0, &input(&[KeyCode::KeyW]));
        assert_eq!(desktop.viewer.position, Point3::new(0.0, 70.0, 0.0));
        desktop.enable();
        desktop.update(1.0, &input(&[KeyCode::KeyW]));
        assert!(desktop.viewer.position.x > 0.0);
    }
}
