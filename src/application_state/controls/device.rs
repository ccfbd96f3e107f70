//! # Device Profile
//!
//! Describes the device the world is viewed on and derives the control scheme
//! and material quality that suit it.

use serde::Deserialize;

use crate::engine_state::rendering::MaterialQuality;

/// User agent fragments that identify phones and tablets, lowercase.
const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Viewports at most this wide count as small screens.
const SMALL_SCREEN_WIDTH: u32 = 768;

/// Assumed memory, in gigabytes, when the device does not report it.
const DEFAULT_MEMORY_GB: f32 = 4.0;

/// Which control scheme a device should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    /// Keyboard and mouse
    Desktop,
    /// Virtual joystick and touch look
    Touch,
}

/// What is known about the display device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Whether the device accepts touch input
    pub has_touch: bool,
    /// Maximum simultaneous touch points
    pub max_touch_points: u32,
    /// The browser or platform user agent string
    pub user_agent: String,
    /// Platform name, e.g. `MacIntel`
    pub platform: String,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Physical screen width in pixels
    pub screen_width: u32,
    /// Physical screen height in pixels
    pub screen_height: u32,
    /// Ratio of physical to logical pixels
    pub pixel_ratio: f32,
    /// Device memory in gigabytes, if reported
    pub memory_gb: Option<f32>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        DeviceProfile {
            has_touch: false,
            max_touch_points: 0,
            user_agent: String::new(),
            platform: String::new(),
            viewport_width: 1920,
            viewport_height: 1080,
            screen_width: 1920,
            screen_height: 1080,
            pixel_ratio: 1.0,
            memory_gb: None,
        }
    }
}

impl DeviceProfile {
    fn agent_contains(&self, fragment: &str) -> bool {
        self.user_agent.to_lowercase().contains(fragment)
    }

    /// A touch device that is either a known mobile agent or has a small viewport.
    pub fn is_mobile(&self) -> bool {
        let mobile_agent = MOBILE_AGENTS.iter().any(|agent| self.agent_contains(agent));
        let small_screen = self.viewport_width <= SMALL_SCREEN_WIDTH;
        self.has_touch && (mobile_agent || small_screen)
    }

    /// An iPad (including ones reporting a desktop platform) or an Android tablet.
    pub fn is_tablet(&self) -> bool {
        let ipad = self.agent_contains("ipad")
            || (self.platform == "MacIntel" && self.max_touch_points > 1);
        let android_tablet = self.agent_contains("android") && !self.agent_contains("mobile");
        ipad || android_tablet
    }

    /// Whether the viewport is wider than it is tall.
    pub fn is_landscape(&self) -> bool {
        self.viewport_width > self.viewport_height
    }

    /// Low memory, a small high-density screen, or a tiny screen.
    pub fn is_low_end(&self) -> bool {
        let memory = self.memory_gb.unwrap_or(DEFAULT_MEMORY_GB);
        let screen_area = self.screen_width as u64 * self.screen_height as u64;
        memory < 4.0 || (screen_area < 800_000 && self.pixel_ratio > 2.0) || screen_area < 400_000
    }

    /// The material quality this device can afford.
    pub fn recommended_quality(&self) -> MaterialQuality {
        if self.is_low_end() {
            MaterialQuality::Low
        } else if self.is_mobile() && !self.is_tablet() {
            MaterialQuality::Medium
        } else {
            MaterialQuality::High
        }
    }

    /// Touch controls on mobile devices, desktop controls everywhere else.
    pub fn preferred_scheme(&self) -> SchemeKind {
        if self.is_mobile() {
            SchemeKind::Touch
        } else {
            SchemeKind::Desktop
        }
    }
}
