//! # Application State Management
//!
//! This module drives the world from player input, including:
//! - Input handling
//! - Control scheme selection and updates
//! - The per-frame update order
//! - Application lifecycle events

pub mod controls;
pub mod input_manager;
pub mod input_state;

use controls::{ControlScheme, DeviceProfile};
use input_manager::InputManager;

use cgmath::Point3;
use winit::event::WindowEvent;

use crate::engine_state::{
    config::{ConfigError, ControlsConfig, WorldConfig},
    EngineState,
};

/// The application state container that manages the application's lifecycle.
///
/// This struct holds the engine state together with the input and controls that
/// move the viewpoint through it.
pub struct ApplicationState {
    /// The core engine state and world
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// The active control scheme
    pub controls: ControlScheme,

    /// Control tuning, kept for scheme switches
    controls_config: ControlsConfig,

    /// Timestamp of the last frame for delta time calculations
    pub last_frame_time: web_time::Instant,
}

impl ApplicationState {
    /// Builds the engine and the controls the device prefers, placing the viewer at the
    /// configured spawn point.
    ///
    /// # Errors
    /// Returns the validation error if the configuration is malformed.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        let engine_state = EngineState::new(config)?;
        let controls =
            ControlScheme::for_device(&config.device, Point3::from(config.spawn), &config.controls);

        Ok(Self {
            engine_state,
            input_manager: InputManager::new(),
            controls,
            controls_config: config.controls.clone(),
            last_frame_time: web_time::Instant::now(),
        })
    }

    /// Handles window events relevant to input.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn window_event(&mut self, event: &WindowEvent) {
        self.input_manager.intake_input(event);

        if let WindowEvent::Focused(false) = event {
            self.input_manager.release_all();
        }
    }

    /// The control tuning the schemes were built with.
    pub fn controls_config(&self) -> &ControlsConfig {
        &self.controls_config
    }

    /// Re-evaluates the control scheme after the device changed, e.g. on resize.
    pub fn device_changed(&mut self, profile: &DeviceProfile) {
        self.controls.reselect(profile, &self.controls_config);
    }

    /// Runs one frame: input into controls, controls into the viewpoint, viewpoint into the world.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the previous frame
    pub fn frame(&mut self, dt: web_time::Duration) {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.controls.update(dt.as_secs_f32(), &processed_input);

        let position = self.controls.current_position();
        self.engine_state.update(position, dt);
    }

    /// Runs one frame timed against the previous call.
    pub fn frame_now(&mut self) {
        let now = web_time::Instant::now();
        let dt = now - self.last_frame_time;
        self.last_frame_time = now;
        self.frame(dt);
    }

    /// Stops the controls and releases the world.
    pub fn dispose(&mut self) {
        self.controls.release();
        self.engine_state.dispose();
    }
}
