//! # Block Type Module
//!
//! This module defines the named block kinds of the voxel world and the
//! conversion between the compact on-disk/in-chunk id and the rich enum.

use std::fmt;

use num_derive::FromPrimitive;

use super::{block_kind, BlockId, BlockKind};

/// Enumerates every block kind in the catalog.
///
/// The discriminant of each variant is its block id, so `BlockType::STONE as BlockId`
/// is the value stored in chunk arrays. The `FromPrimitive` derive allows conversion
/// back from raw ids read out of a chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Always non-solid.
    AIR = 0,
    /// Grass-topped ground, the surface layer of flat terrain.
    GRASS = 1,
    /// Dirt, the layers just below the surface.
    DIRT = 2,
    /// Stone, the bulk of flat terrain.
    STONE = 3,
    /// Cobblestone.
    COBBLESTONE = 4,
    /// Wood.
    WOOD = 5,
    /// Leaves.
    LEAVES = 6,
    /// Sand.
    SAND = 7,
    /// Water. Coloured but non-solid, so it never produces faces.
    WATER = 8,
    /// Glass. Solid and translucent.
    GLASS = 9,
}

impl BlockType {
    /// Every block type, in id order.
    pub const ALL: [BlockType; 10] = [
        BlockType::AIR,
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::COBBLESTONE,
        BlockType::WOOD,
        BlockType::LEAVES,
        BlockType::SAND,
        BlockType::WATER,
        BlockType::GLASS,
    ];

    /// Converts a raw block id into a `BlockType`.
    ///
    /// Returns `None` for ids that are not in the catalog.
    pub fn from_id(id: BlockId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// The raw id stored in chunk arrays.
    pub fn id(self) -> BlockId {
        self as BlockId
    }

    /// The catalog entry for this type.
    pub fn kind(self) -> Option<&'static BlockKind> {
        block_kind(self.id())
    }

    /// Picks a random solid, opaque type. Used by the random test fill.
    pub fn random_solid(rng: &mut fastrand::Rng) -> Self {
        const SOLIDS: [BlockType; 7] = [
            BlockType::GRASS,
            BlockType::DIRT,
            BlockType::STONE,
            BlockType::COBBLESTONE,
            BlockType::WOOD,
            BlockType::LEAVES,
            BlockType::SAND,
        ];
        SOLIDS[rng.usize(..SOLIDS.len())]
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{}", kind.name),
            None => write!(f, "{:?}", self),
        }
    }
}
