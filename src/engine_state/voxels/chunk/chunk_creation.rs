//! # Chunk Creation Module
//!
//! Placeholder terrain fills applied to a chunk when it is first loaded.
//!
//! Real terrain generation is out of scope for the world model; these fills
//! exist so that the world has something to mesh and so that tests can build
//! chunks with known contents.

use serde::Deserialize;

use crate::engine_state::voxels::block::{block_type::BlockType, BlockId, AIR};

use super::Chunk;

/// The ground level used by flat terrain unless configured otherwise.
pub const DEFAULT_GROUND_LEVEL: usize = 64;

/// The initial contents written into a freshly created chunk.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainFill {
    /// Layered flat ground: stone, three layers of dirt, one layer of grass.
    Flat {
        /// Height of the grass layer.
        #[serde(default = "default_ground_level")]
        ground_level: usize,
    },
    /// Nothing but air.
    Empty,
    /// Every voxel set to one block.
    Solid {
        /// The block id to fill with.
        block: BlockId,
    },
    /// A 3D checkerboard of `block` and air.
    Checkerboard {
        /// The block id used for the filled cells.
        block: BlockId,
    },
    /// Randomly scattered blocks, reproducible per chunk for a given seed.
    Random {
        /// Block id to scatter, or a random solid type per voxel when absent.
        #[serde(default)]
        block: Option<BlockId>,
        /// Probability that a voxel is filled, in `[0, 1]`.
        density: f64,
        /// Base seed, mixed with the chunk position.
        #[serde(default)]
        seed: u64,
    },
}

fn default_ground_level() -> usize {
    DEFAULT_GROUND_LEVEL
}

impl Default for TerrainFill {
    fn default() -> Self {
        TerrainFill::Flat {
            ground_level: DEFAULT_GROUND_LEVEL,
        }
    }
}

impl TerrainFill {
    /// Writes this fill into every voxel of `chunk`.
    pub fn fill(&self, chunk: &mut Chunk) {
        let [size_x, size_y, size_z] = chunk.dimensions().extents();
        let mut rng = match self {
            TerrainFill::Random { seed, .. } => Some(fastrand::Rng::with_seed(Self::chunk_seed(
                *seed,
                chunk.position().x,
                chunk.position().z,
            ))),
            _ => None,
        };

        for y in 0..size_y {
            for z in 0..size_z {
                for x in 0..size_x {
                    let block_id = match self {
                        TerrainFill::Flat { ground_level } => Self::flat_block(y, *ground_level),
                        TerrainFill::Empty => AIR,
                        TerrainFill::Solid { block } => *block,
                        TerrainFill::Checkerboard { block } => {
                            if (x + y + z) % 2 == 0 {
                                *block
                            } else {
                                AIR
                            }
                        }
                        TerrainFill::Random { block, density, .. } => match rng.as_mut() {
                            Some(rng) => {
                                if rng.f64() < *density {
                                    match block {
                                        Some(block) => *block,
                                        None => BlockType::random_solid(rng).id(),
                                    }
                                } else {
                                    AIR
                                }
                            }
                            None => AIR,
                        },
                    };
                    chunk.set(x as i32, y as i32, z as i32, block_id);
                }
            }
        }
    }

    /// The block at height `y` in flat terrain.
    fn flat_block(y: usize, ground_level: usize) -> BlockId {
        if y + 3 < ground_level {
            BlockType::STONE.id()
        } else if y < ground_level {
            BlockType::DIRT.id()
        } else if y == ground_level {
            BlockType::GRASS.id()
        } else {
            AIR
        }
    }

    fn chunk_seed(seed: u64, x: i32, z: i32) -> u64 {
        let packed = ((x as u32 as u64) << 32) | (z as u32 as u64);
        seed ^ packed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
