//! # Voxel World Entry Point
//!
//! This is the entry point for the headless voxel world driver.
//! It simply calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- config/world.json
//! ```

fn main() {
    voxel_world::run();
}
