//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse and cursor movement
//! - Touch event collection
//! - Programmatic input for scripted runs

use std::collections::HashMap;

use cgmath::Point2;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, Touch, TouchPhase, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{ProcessedInputState, RawInputState, TouchSample};

const KEY_CODES: [KeyCode; 10] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::ShiftLeft,
    KeyCode::ShiftRight,
];

/// Manages the state of all input devices and processes input events.
///
/// This struct maintains the current state of keyboard, mouse and touch inputs
/// and provides methods to process input events from the windowing system.
#[derive(Debug)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
    /// Last known cursor position, used to turn cursor moves into deltas
    last_cursor_position: Option<PhysicalPosition<f64>>,

    /// Touch events since the last frame
    pub touches: Vec<TouchSample>,
}

impl InputManager {
    /// Creates a new InputManager with default state.
    ///
    /// Initializes all tracked keyboard keys to 'released' state and sets up
    /// empty mouse and touch state.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs_old.insert(key_code, false);
            keyboard_inputs_new.insert(key_code, false);
        }

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_delta: None,
            last_cursor_position: None,
            touches: Vec::new(),
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    ///
    /// This should be called at the end of each frame to ensure that the "old" state
    /// is properly updated for the next frame's comparisons.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// Handles keyboard, cursor and touch events, updating the internal state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                self.set_key(*key, *state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.last_cursor_position {
                    self.intake_mouse_motion((position.x - last.x, position.y - last.y));
                }
                self.last_cursor_position = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_cursor_position = None;
            }
            WindowEvent::Touch(Touch {
                id,
                phase,
                location,
                ..
            }) => {
                self.intake_touch(*id, *phase, location.x as f32, location.y as f32);
            }
            _ => {}
        }
    }

    /// Sets the current state of a tracked key. Untracked keys are ignored.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Adds to the mouse movement delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last update
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Records a touch event at screen position `(x, y)`.
    pub fn intake_touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) {
        self.touches.push(TouchSample {
            id,
            phase,
            location: Point2::new(x, y),
        });
    }

    /// Creates a processed input state from the current raw states.
    ///
    /// This translates the raw boolean states into RawInputState enum values
    /// that represent the state transitions (pressed, held, released, not pressed).
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_delta: self.mouse_delta,
            touches: std::mem::take(&mut self.touches),
        }
    }

    /// Returns the processed input state and resets internal state.
    ///
    /// This method should be called once per frame to get the
    /// processed input state and reset the internal state for the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Resets per-frame input state.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_delta = None;
        self.touches.clear();
    }

    /// Releases every key, typically when the window loses focus.
    pub fn release_all(&mut self) {
        for state in self.keyboard_inputs_new.values_mut() {
            *state = false;
        }
        self.last_cursor_position = None;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
