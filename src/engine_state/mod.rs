//! # Engine State Module
//!
//! The core engine module that owns the voxel world and tracks per-frame statistics.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `config` - Startup configuration and its validation errors
//! * `rendering` - Scene and material interfaces and mesh generation
//! * `voxels` - Block registry, chunks, and the world manager
//!
//! ## Architecture
//!
//! The engine state follows a component-based architecture where each subsystem is
//! responsible for one aspect of the world. `EngineState` coordinates them: each frame it
//! forwards the viewpoint to the world, which streams and remeshes chunks as needed.

use cgmath::Point3;
use log::debug;
use web_time::Duration;

use config::{ConfigError, WorldConfig};
use rendering::{BatchScene, ColorMaterials};
use voxels::world::World;

pub mod config;
pub mod rendering;
pub mod voxels;

/// Timing collected over the frames driven so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Number of frames driven
    pub frames: u64,
    /// Sum of all frame durations
    pub total_time: Duration,
    /// Duration of the most recent frame
    pub last_frame: Duration,
    /// Longest frame seen
    pub slowest_frame: Duration,
}

impl FrameStats {
    /// Records one frame.
    pub fn record(&mut self, dt: Duration) {
        self.frames += 1;
        self.total_time += dt;
        self.last_frame = dt;
        self.slowest_frame = self.slowest_frame.max(dt);
    }

    /// Mean frames per second, or zero before any time has passed.
    pub fn average_fps(&self) -> f64 {
        let seconds = self.total_time.as_secs_f64();
        if seconds > 0.0 {
            self.frames as f64 / seconds
        } else {
            0.0
        }
    }
}

/// The main state container for the voxel engine.
///
/// Owns the world, which in turn owns the scene its batches are displayed in and the
/// materials they are drawn with.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::engine_state::{config::WorldConfig, EngineState};
/// use web_time::Duration;
///
/// let config = WorldConfig {
///     chunk_edge: 8,
///     world_height: 16,
///     render_distance: 1,
///     ..WorldConfig::default()
/// };
/// let mut engine_state = EngineState::new(&config).unwrap();
/// engine_state.update(Point3::new(20.0, 10.0, 4.0), Duration::from_millis(16));
/// assert_eq!(engine_state.world.viewpoint().x, 2);
/// ```
pub struct EngineState {
    /// The voxel world and its scene
    pub world: World<BatchScene, ColorMaterials>,
    /// Frame timing
    stats: FrameStats,
}

impl EngineState {
    /// Builds the world described by `config` and loads the chunks around the origin.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the configuration is malformed.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        let materials = ColorMaterials::with_quality(config.material_quality());
        let mut world = World::new(config, BatchScene::new(), materials)?;
        world.initialize();

        Ok(Self {
            world,
            stats: FrameStats::default(),
        })
    }

    /// Moves the world's viewpoint and records the frame.
    ///
    /// # Arguments
    ///
    /// * `viewpoint` - The viewer's position in world space
    /// * `dt` - The time elapsed since the last frame
    pub fn update(&mut self, viewpoint: Point3<f32>, dt: Duration) {
        self.world.set_viewpoint(viewpoint.x, viewpoint.z);
        self.stats.record(dt);
        debug!(
            "Frame {} at {:?}: {} chunks, {} batches",
            self.stats.frames,
            self.world.viewpoint(),
            self.world.loaded_count(),
            self.world.scene().batch_count()
        );
    }

    /// Timing collected over every frame so far.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Releases the world and everything it put into the scene.
    pub fn dispose(&mut self) {
        self.world.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_stats_track_the_slowest_frame() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.average_fps(), 0.0);
        stats.record(Duration::from_millis(10));
        stats.record(Duration::from_millis(30));
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.slowest_frame, Duration::from_millis(30));
        assert_eq!(stats.last_frame, Duration::from_millis(30));
        assert!((stats.average_fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn engine_applies_the_configured_quality() {
        let config = WorldConfig {
            chunk_edge: 4,
            world_height: 8,
            render_distance: 0,
            quality: Some(rendering::MaterialQuality::Low),
            ..WorldConfig::default()
        };
        let engine_state = EngineState::new(&config).unwrap();
        let materials = engine_state.world.materials();
        let handle = rendering::MaterialProvider::material_for(materials, 1).unwrap();
        assert_eq!(
            materials.material(handle).unwrap().shading,
            rendering::Shading::Basic
        );
        assert_eq!(engine_state.world.loaded_count(), 1);
    }
}
