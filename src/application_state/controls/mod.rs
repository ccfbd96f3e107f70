//! # Controls
//!
//! Turns per-frame input into movement of the viewer.
//!
//! Two schemes exist, chosen from the [`DeviceProfile`]:
//! - [`DesktopScheme`]: keyboard movement and mouse look
//! - [`TouchScheme`]: virtual joystick movement and touch look
//!
//! The world only ever asks the active scheme for its current position.

use cgmath::Point3;
use log::info;

use super::input_state::ProcessedInputState;
use crate::engine_state::config::ControlsConfig;

mod desktop;
mod device;
mod touch;
mod viewer;

pub use desktop::DesktopScheme;
pub use device::{DeviceProfile, SchemeKind};
pub use touch::TouchScheme;
pub use viewer::Viewer;

/// The active control scheme.
#[derive(Debug, Clone)]
pub enum ControlScheme {
    /// Keyboard and mouse
    Desktop(DesktopScheme),
    /// Virtual joystick and touch look
    Touch(TouchScheme),
}

impl ControlScheme {
    /// Creates the scheme of the given kind around `viewer`.
    pub fn new(kind: SchemeKind, viewer: Viewer, config: &ControlsConfig) -> Self {
        match kind {
            SchemeKind::Desktop => ControlScheme::Desktop(DesktopScheme::new(viewer, config)),
            SchemeKind::Touch => ControlScheme::Touch(TouchScheme::new(viewer, config)),
        }
    }

    /// Creates the scheme the device prefers, placing the viewer at `position`.
    pub fn for_device(
        profile: &DeviceProfile,
        position: Point3<f32>,
        config: &ControlsConfig,
    ) -> Self {
        let kind = profile.preferred_scheme();
        info!("Using {:?} controls", kind);
        Self::new(kind, Viewer::new(position), config)
    }

    /// Which scheme this is.
    pub fn kind(&self) -> SchemeKind {
        match self {
            ControlScheme::Desktop(_) => SchemeKind::Desktop,
            ControlScheme::Touch(_) => SchemeKind::Touch,
        }
    }

    /// Applies one frame of input.
    pub fn update(&mut self, dt: f32, input: &ProcessedInputState) {
        match self {
            ControlScheme::Desktop(desktop) => desktop.update(dt, input),
            ControlScheme::Touch(touch) => touch.update(dt, input),
        }
    }

    /// The pose being controlled.
    pub fn viewer(&self) -> &Viewer {
        match self {
            ControlScheme::Desktop(desktop) => &desktop.viewer,
            ControlScheme::Touch(touch) => &touch.viewer,
        }
    }

    /// The viewer's position in world space.
    pub fn current_position(&self) -> Point3<f32> {
        self.viewer().position
    }

    /// Resumes reacting to input.
    pub fn enable(&mut self) {
        match self {
            ControlScheme::Desktop(desktop) => desktop.enable(),
            ControlScheme::Touch(touch) => touch.enable(),
        }
    }

    /// Stops reacting to input, dropping any held finger or key state.
    pub fn disable(&mut self) {
        match self {
            ControlScheme::Desktop(desktop) => desktop.disable(),
            ControlScheme::Touch(touch) => touch.disable(),
        }
    }

    /// Stops the scheme and drops any input it is tracking.
    ///
    /// A released scheme ignores all input until [`ControlScheme::enable`] is called.
    pub fn release(&mut self) {
        self.disable();
    }

    /// Switches schemes if the device now prefers another one, keeping the viewer's pose.
    ///
    /// # Returns
    /// `true` if the scheme changed.
    pub fn reselect(&mut self, profile: &DeviceProfile, config: &ControlsConfig) -> bool {
        let kind = profile.preferred_scheme();
        if kind == self.kind() {
            return false;
        }

        info!("Switching from {:?} to {:?} controls", self.kind(), kind);
        let viewer = *self.viewer();
        self.release();
        *self = Self::new(kind, viewer, config);
        true
    }
}
