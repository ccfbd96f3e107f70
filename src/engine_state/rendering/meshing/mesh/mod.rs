//! Mesh generation for voxel chunks.
//!
//! This module converts chunk voxel data into quads. The production path is
//! greedy meshing, which merges adjacent coplanar faces of the same block kind
//! into maximal rectangles. A naive one-quad-per-face mesher is kept alongside it
//! as the reference the greedy output is checked against.
//!
//! # Architecture
//! - [`ChunkMesh`]: quads of one chunk grouped by block kind
//! - [`Quad`]: one merged rectangle of faces
//! - [`FaceDescriptor`]: one unit face, used to compare meshes
//!
//! # Usage
//! ```
//! use voxel_world::engine_state::{
//!     rendering::meshing::mesh::greedy,
//!     voxels::{
//!         block::block_type::BlockType,
//!         chunk::{Chunk, ChunkDimensions, ChunkPosition, TerrainFill},
//!     },
//! };
//!
//! let dimensions = ChunkDimensions::new(4, 4).unwrap();
//! let fill = TerrainFill::Solid { block: BlockType::STONE.id() };
//! let chunk = Chunk::generate(ChunkPosition::new(0, 0), dimensions, &fill);
//! let mesh = greedy(&chunk, &mut Vec::new());
//! assert_eq!(mesh.quad_count(), 6);
//! ```

mod face;
mod greedy;
mod mesh;
mod naive;

pub use face::{FaceDescriptor, Quad};
pub use greedy::greedy;
pub use mesh::*;
pub use naive::naive;
