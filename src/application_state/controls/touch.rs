//! # Touch Controls
//!
//! A virtual joystick for movement and free touches for looking around.
//!
//! A touch that starts within the joystick's hit area drives movement until it is
//! lifted. The first touch starting anywhere else turns the view as it moves.

use cgmath::{InnerSpace, Point2, Vector2};
use winit::event::TouchPhase;

use super::viewer::Viewer;
use crate::{
    application_state::input_state::{ProcessedInputState, TouchSample},
    engine_state::config::ControlsConfig,
};

/// The hit area of the joystick, as a multiple of its radius.
const JOYSTICK_HIT_SCALE: f32 = 1.5;

/// Touch-screen controls.
#[derive(Debug, Clone)]
pub struct TouchScheme {
    /// The pose being controlled
    pub viewer: Viewer,
    joystick_center: Point2<f32>,
    joystick_radius: f32,
    dead_zone: f32,
    look_sensitivity: f32,
    walk_speed: f32,
    /// Finger currently driving the joystick
    joystick_touch: Option<u64>,
    /// Finger currently looking around, with its last position
    look_touch: Option<(u64, Point2<f32>)>,
    /// Joystick deflection in `[-1, 1]` per axis, `y` pointing forward
    move_vector: Vector2<f32>,
    enabled: bool,
}

impl TouchScheme {
    /// Creates touch controls for `viewer`.
    pub fn new(viewer: Viewer, config: &ControlsConfig) -> Self {
        TouchScheme {
            viewer,
            joystick_center: Point2::from(config.joystick_center),
            joystick_radius: config.joystick_radius,
            dead_zone: config.joystick_dead_zone,
            look_sensitivity: config.touch_sensitivity,
            walk_speed: config.walk_speed,
            joystick_touch: None,
            look_touch: None,
            move_vector: Vector2::new(0.0, 0.0),
            enabled: true,
        }
    }

    /// Applies one frame of touch input and then moves by the joystick deflection.
    pub fn update(&mut self, dt: f32, input: &ProcessedInputState) {
        if !self.enabled {
            return;
        }

        for touch in input.touches.iter() {
            self.handle_touch(touch);
        }

        if self.move_vector.magnitude2() > 0.0 {
            let forward = self.move_vector.y * self.walk_speed * dt;
            let right = self.move_vector.x * self.walk_speed * dt;
            self.viewer.walk(forward, right);
        }
    }

    fn handle_touch(&mut self, touch: &TouchSample) {
        match touch.phase {
            TouchPhase::Started => {
                if self.joystick_touch.is_none() && self.is_on_joystick(touch.location) {
                    self.joystick_touch = Some(touch.id);
                    self.move_joystick(touch.location);
                } else if self.look_touch.is_none() {
                    self.look_touch = Some((touch.id, touch.location));
                }
            }
            TouchPhase::Moved => {
                if self.joystick_touch == Some(touch.id) {
                    self.move_joystick(touch.location);
                } else if let Some((id, last)) = self.look_touch {
                    if id == touch.id {
                        let delta = touch.location - last;
                        self.viewer.turn(delta.x, delta.y, self.look_sensitivity);
                        self.look_touch = Some((id, touch.location));
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.joystick_touch == Some(touch.id) {
                    self.joystick_touch = None;
                    self.reset_joystick();
                } else if matches!(self.look_touch, Some((id, _)) if id == touch.id) {
                    self.look_touch = None;
                }
            }
        }
    }

    fn is_on_joystick(&self, location: Point2<f32>) -> bool {
        (location - self.joystick_center).magnitude() <= self.joystick_radius * JOYSTICK_HIT_SCALE
    }

    /// Sets the deflection from a finger position, limited to the joystick radius.
    ///
    /// Screen `y` grows downwards, so it is inverted to make pushing up walk forward.
    fn move_joystick(&mut self, location: Point2<f32>) {
        let offset = location - self.joystick_center;
        let distance = offset.magnitude();
        if distance <= self.joystick_radius * self.dead_zone {
            self.move_vector = Vector2::new(0.0, 0.0);
            return;
        }

        let limited = offset * (distance.min(self.joystick_radius) / distance);
        self.move_vector = Vector2::new(
            limited.x / self.joystick_radius,
            -limited.y / self.joystick_radius,
        );
    }

    fn reset_joystick(&mut self) {
        self.move_vector = Vector2::new(0.0, 0.0);
    }

    /// Current joystick deflection, `y` pointing forward.
    pub fn move_vector(&self) -> Vector2<f32> {
        self.move_vector
    }

    /// Resumes reacting to touches.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Centres the joystick, forgets the fingers in use and ignores touches until enabled.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.joystick_touch = None;
        self.look_touch = None;
        self.reset_joystick();
    }
}
