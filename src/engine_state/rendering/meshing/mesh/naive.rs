//! Unoptimised per-face meshing.
//!
//! Emits one unit quad for every face of a solid voxel whose neighbour across
//! that face is not solid. The result covers exactly the same surface as
//! [`greedy`](super::greedy()) and serves as its reference.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, solid_of},
    chunk::Chunk,
};

use super::{face::Quad, mesh::ChunkMesh};

/// Builds the one-quad-per-exposed-face mesh of `chunk`.
pub fn naive(chunk: &Chunk) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();
    for (position, block_id) in chunk.solid_voxels() {
        if !solid_of(block_id) {
            continue;
        }
        for side in BlockSide::all() {
            let neighbour = position + side.normal();
            if !solid_of(chunk.get(neighbour.x, neighbour.y, neighbour.z)) {
                mesh.push(Quad::unit(position, side, block_id));
            }
        }
    }
    mesh
}
