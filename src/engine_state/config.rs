//! # World Configuration
//!
//! Startup configuration for the voxel world, loaded from JSON.
//!
//! Every field has a default, so an empty object `{}` is a valid configuration.
//! Values are checked by [`WorldConfig::validate`] before a world is built; a
//! configuration that fails validation is a fatal startup error.

use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::{
    rendering::MaterialQuality,
    voxels::{
        chunk::{ChunkDimensions, TerrainFill},
        world::MAX_RENDER_DISTANCE,
    },
};
use crate::application_state::controls::DeviceProfile;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The chunk edge length must be at least one voxel.
    #[error("chunk edge length must be positive, got {0}")]
    ChunkEdge(i32),
    /// The world height must be at least one voxel.
    #[error("world height must be positive, got {0}")]
    WorldHeight(i32),
    /// The render distance is a chunk count between zero and [`MAX_RENDER_DISTANCE`].
    #[error("render distance must be within [0, 64], got {0}")]
    RenderDistance(i32),
    /// A random terrain fill needs a probability.
    #[error("random fill density must be within [0, 1], got {0}")]
    Density(f64),
    /// The configuration file could not be read.
    #[error("could not read configuration file {path:?}")]
    Io {
        /// The path that was read
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for [`WorldConfig`].
    #[error("could not parse configuration")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for the player controls.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Walking speed in blocks per second
    pub walk_speed: f32,
    /// Sprinting speed in blocks per second
    pub sprint_speed: f32,
    /// Radians turned per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Radians turned per pixel of touch motion
    pub touch_sensitivity: f32,
    /// Radius of the virtual joystick in pixels
    pub joystick_radius: f32,
    /// Fraction of the joystick radius that produces no movement
    pub joystick_dead_zone: f32,
    /// Screen position of the virtual joystick's center, in pixels
    pub joystick_center: [f32; 2],
}

impl Default for ControlsConfig {
    fn default() -> Self {
        ControlsConfig {
            walk_speed: 4.317,
            sprint_speed: 5.612,
            mouse_sensitivity: 0.002,
            touch_sensitivity: 0.003,
            joystick_radius: 60.0,
            joystick_dead_zone: 0.15,
            joystick_center: [100.0, 500.0],
        }
    }
}

/// Everything needed to build a world and its controls.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk edge length along x and z, in voxels
    pub chunk_edge: i32,
    /// Chunk height along y, in voxels
    pub world_height: i32,
    /// Chebyshev radius, in chunks, of the loaded area
    pub render_distance: i32,
    /// Contents of newly loaded chunks
    pub terrain: TerrainFill,
    /// Control tuning
    pub controls: ControlsConfig,
    /// Initial viewpoint in world coordinates
    pub spawn: [f32; 3],
    /// Material quality; chosen from the device profile when absent
    pub quality: Option<MaterialQuality>,
    /// The device being played on
    pub device: DeviceProfile,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_edge: 16,
            world_height: 256,
            render_distance: 4,
            terrain: TerrainFill::default(),
            controls: ControlsConfig::default(),
            spawn: [8.0, 66.62, 8.0],
            quality: None,
            device: DeviceProfile::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks every value that the world relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions()?;
        if !(0..=MAX_RENDER_DISTANCE as i32).contains(&self.render_distance) {
            return Err(ConfigError::RenderDistance(self.render_distance));
        }
        if let TerrainFill::Random { density, .. } = self.terrain {
            if !(0.0..=1.0).contains(&density) {
                return Err(ConfigError::Density(density));
            }
        }
        Ok(())
    }

    /// The chunk dimensions described by this configuration.
    pub fn dimensions(&self) -> Result<ChunkDimensions, ConfigError> {
        ChunkDimensions::new(self.chunk_edge, self.world_height)
    }

    /// The configured quality, or the one recommended for the device.
    pub fn material_quality(&self) -> MaterialQuality {
        self.quality
            .unwrap_or_else(|| self.device.recommended_quality())
    }
}
