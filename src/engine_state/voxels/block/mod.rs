//! # Block Module
//!
//! The block registry: a static catalog of block kinds and their solidity and
//! display attributes. The catalog is fixed at compile time and is never mutated.
//!
//! Lookups never fail loudly. An id that is not in the catalog behaves like air:
//! non-solid and without a colour.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block ids in chunk storage.
pub type BlockId = u8;

/// The id reserved for empty space.
pub const AIR: BlockId = 0;

/// An immutable catalog entry describing one kind of block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockKind {
    /// Numeric id stored in chunks. `0` is air.
    pub id: BlockId,
    /// Lowercase name, unique within the catalog.
    pub name: &'static str,
    /// Whether the block occludes its neighbours and produces faces.
    pub solid: bool,
    /// Display colour as `0xRRGGBB`, `None` for air.
    pub color: Option<u32>,
    /// Whether the material for this block should blend with what is behind it.
    pub translucent: bool,
}

/// Maps each block id to its catalog entry.
pub static BLOCK_KINDS: phf::Map<u8, BlockKind> = phf::phf_map! {
    0u8 => BlockKind { id: 0, name: "air", solid: false, color: None, translucent: false },
    1u8 => BlockKind { id: 1, name: "grass", solid: true, color: Some(0x7CFC00), translucent: false },
    2u8 => BlockKind { id: 2, name: "dirt", solid: true, color: Some(0x8B4513), translucent: false },
    3u8 => BlockKind { id: 3, name: "stone", solid: true, color: Some(0x808080), translucent: false },
    4u8 => BlockKind { id: 4, name: "cobblestone", solid: true, color: Some(0x696969), translucent: false },
    5u8 => BlockKind { id: 5, name: "wood", solid: true, color: Some(0x8B4513), translucent: false },
    6u8 => BlockKind { id: 6, name: "leaves", solid: true, color: Some(0x228B22), translucent: false },
    7u8 => BlockKind { id: 7, name: "sand", solid: true, color: Some(0xF4A460), translucent: false },
    8u8 => BlockKind { id: 8, name: "water", solid: false, color: Some(0x006994), translucent: true },
    9u8 => BlockKind { id: 9, name: "glass", solid: true, color: Some(0xFFFFFF), translucent: true },
};

/// Looks up the catalog entry for `id`.
pub fn block_kind(id: BlockId) -> Option<&'static BlockKind> {
    BLOCK_KINDS.get(&id)
}

/// Looks up a catalog entry by its name.
pub fn block_by_name(name: &str) -> Option<&'static BlockKind> {
    BLOCK_KINDS.values().find(|kind| kind.name == name)
}

/// Whether blocks with this id are solid. Unknown ids are not.
#[inline]
pub fn solid_of(id: BlockId) -> bool {
    block_kind(id).map_or(false, |kind| kind.solid)
}

/// The display colour of this id, if it has one.
pub fn color_of(id: BlockId) -> Option<u32> {
    block_kind(id).and_then(|kind| kind.color)
}

/// Iterates over every catalog entry in id order.
pub fn all_kinds() -> impl Iterator<Item = &'static BlockKind> {
    BlockType::ALL.into_iter().filter_map(BlockType::kind)
}
