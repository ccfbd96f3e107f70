#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world model with greedy meshing and viewpoint-driven chunk streaming.
//!
//! The crate owns the voxel data and turns it into drawable geometry; drawing itself is left
//! to a scene collaborator reached through the [`engine_state::rendering::Scene`] trait.
//!
//! ## Key Modules
//!
//! * `application_state` - Input handling, control schemes, and the per-frame update order
//! * `engine_state` - Configuration, the world manager, chunks, the block registry, and meshing
//!
//! ## Architecture
//!
//! The world is split into fixed-size chunk columns kept in a hash map around the viewpoint:
//! * Chunks store block ids in one flat array
//! * Greedy meshing merges coplanar faces of the same block kind into large quads
//! * Chunks within the render distance are loaded; chunks one further out are unloaded
//! * Block edits remesh the edited chunk and any neighbour sharing the edited face
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::run();
//! }
//! ```

use std::error::Error;

use application_state::{controls::SchemeKind, ApplicationState};
use engine_state::config::{ConfigError, WorldConfig};
use log::{error, info, LevelFilter};
use winit::{event::TouchPhase, keyboard::KeyCode};

pub mod application_state;
pub mod engine_state;

/// Frames driven by the headless run.
pub const SCRIPTED_FRAMES: u32 = 600;

/// Fixed frame time of the headless run.
pub const SCRIPTED_FRAME_TIME: web_time::Duration = web_time::Duration::from_micros(16_667);

/// Finger id used for the scripted joystick touch.
const SCRIPTED_TOUCH_ID: u64 = 0;

/// Runs the world headless: loads configuration, walks the viewer through the world for a
/// fixed number of frames, and reports what the scene ended up holding.
///
/// The configuration is read from the JSON file named by the first command line argument,
/// or the defaults are used when there is none. An invalid configuration ends the process
/// with a non-zero exit status.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut state = match load_config().and_then(|config| ApplicationState::new(&config)) {
        Ok(state) => state,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            if let Some(source) = err.source() {
                error!("Caused by: {}", source);
            }
            std::process::exit(1);
        }
    };

    let start = web_time::Instant::now();
    scripted_walk(&mut state, SCRIPTED_FRAMES);

    let world = &state.engine_state.world;
    let stats = state.engine_state.stats();
    info!(
        "Drove {} frames in {:?}, ending at {:?} in chunk {:?}",
        stats.frames,
        start.elapsed(),
        state.controls.current_position(),
        world.viewpoint()
    );
    info!(
        "Scene holds {} batches with {} quads for {} chunks ({} batches added, {} removed)",
        world.scene().batch_count(),
        world.scene().total_quads(),
        world.loaded_count(),
        world.scene().added_total(),
        world.scene().removed_total()
    );

    state.dispose();
    info!("World disposed");
}

/// Reads the configuration named on the command line, or the defaults.
fn load_config() -> Result<WorldConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            WorldConfig::from_path(path)
        }
        None => {
            info!("No configuration file given, using defaults");
            let config = WorldConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Walks the viewer forward for `frames` fixed-length frames while slowly turning.
///
/// Desktop controls hold `W` and drift the mouse; touch controls hold the joystick forward.
pub fn scripted_walk(state: &mut ApplicationState, frames: u32) {
    match state.controls.kind() {
        SchemeKind::Desktop => state.input_manager.set_key(KeyCode::KeyW, true),
        SchemeKind::Touch => {
            let [x, y] = state.controls_config().joystick_center;
            let radius = state.controls_config().joystick_radius;
            state
                .input_manager
                .intake_touch(SCRIPTED_TOUCH_ID, TouchPhase::Started, x, y - radius);
        }
    }

    for _ in 0..frames {
        match state.controls.kind() {
            SchemeKind::Desktop => state.input_manager.intake_mouse_motion((2.0, 0.0)),
            SchemeKind::Touch => {}
        }
        state.frame(SCRIPTED_FRAME_TIME);
    }

    match state.controls.kind() {
        SchemeKind::Desktop => state.input_manager.set_key(KeyCode::KeyW, false),
        SchemeKind::Touch => {
            let [x, y] = state.controls_config().joystick_center;
            state
                .input_manager
                .intake_touch(SCRIPTED_TOUCH_ID, TouchPhase::Ended, x, y);
        }
    }
    state.frame(SCRIPTED_FRAME_TIME);
}
