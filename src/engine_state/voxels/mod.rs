//! # Voxel World Model
//!
//! This module contains the voxel world model, providing the foundation for representing,
//! manipulating and streaming a chunked voxel world.
//!
//! ## Architecture
//!
//! The voxel system is organized into three components, leaf first:
//!
//! * **Block**: The static registry of block kinds and their properties
//! * **Chunk**: A fixed-size column of blocks stored in one flat array
//! * **World**: Loads, unloads and remeshes chunks around a moving viewpoint
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. World delegates to the chunk owning the position
//! 3. Changes mark the chunk dirty and trigger remeshing of it and its border neighbours
//! 4. Finished batches are handed to the scene
//!
//! ## Threading
//!
//! The world is single-threaded and frame-driven. The world is the only writer to its
//! chunks, and meshing runs to completion inside the frame that requests it.

pub mod block;
pub mod chunk;
pub mod world;
