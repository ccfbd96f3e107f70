//! # Chunk Iteration Module
//!
//! An iterator over the non-air voxels of a chunk in storage order.

use cgmath::Point3;

use crate::engine_state::voxels::block::{BlockId, AIR};

use super::{Chunk, ChunkDimensions};

/// Iterates over every non-air voxel in a chunk, yielding its local position and id.
///
/// Voxels are visited in storage order (x fastest, then z, then y), skipping air.
pub struct SolidVoxels<'a> {
    blocks: &'a [BlockId],
    dimensions: ChunkDimensions,
    /// Next storage offset to examine.
    offset: usize,
}

impl<'a> SolidVoxels<'a> {
    /// Creates an iterator positioned before the first voxel of `chunk`.
    pub fn new(chunk: &'a Chunk) -> Self {
        SolidVoxels {
            blocks: chunk.blocks(),
            dimensions: chunk.dimensions(),
            offset: 0,
        }
    }
}

impl Iterator for SolidVoxels<'_> {
    type Item = (Point3<i32>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.blocks.len() {
            let offset = self.offset;
            self.offset += 1;
            let block_id = self.blocks[offset];
            if block_id != AIR {
                return Some((self.dimensions.position_of(offset), block_id));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.blocks.len() - self.offset))
    }
}
