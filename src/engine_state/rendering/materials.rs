//! Flat-coloured block materials.
//!
//! One material per block kind that has a display colour. Air has no colour and
//! therefore no material; meshing simply produces no batch for it.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use super::{MaterialHandle, MaterialProvider};
use crate::engine_state::voxels::block::{all_kinds, block_type::BlockType, BlockId, BlockKind};

/// How expensive the materials may be to draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialQuality {
    /// Unlit colours, for low-end devices.
    Low,
    /// Keep whatever shading the materials already use.
    Medium,
    /// Lit colours.
    High,
}

/// Lighting model of a material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Diffuse lighting with flat shading.
    Lambert,
    /// No lighting at all.
    Basic,
}

/// A drawable flat-coloured material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// The block kind this material draws
    pub block_id: BlockId,
    /// Colour as `0xRRGGBB`
    pub color: u32,
    /// Lighting model
    pub shading: Shading,
    /// Whether the material blends with what is behind it
    pub transparent: bool,
    /// Opacity in `[0, 1]`, only meaningful when transparent
    pub opacity: f32,
    /// Whether back faces are drawn too
    pub double_sided: bool,
}

impl Material {
    fn for_kind(kind: &BlockKind, color: u32) -> Self {
        let opacity = match BlockType::from_id(kind.id) {
            Some(BlockType::WATER) => 0.8,
            _ if kind.translucent => 0.3,
            _ => 1.0,
        };
        Material {
            block_id: kind.id,
            color,
            shading: Shading::Lambert,
            transparent: kind.translucent,
            opacity,
            double_sided: kind.translucent,
        }
    }

    /// The colour as normalised `[r, g, b]`.
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xFF) as f32 / 255.0,
            ((self.color >> 8) & 0xFF) as f32 / 255.0,
            (self.color & 0xFF) as f32 / 255.0,
        ]
    }
}

/// Material table built from the block registry's colours.
#[derive(Debug)]
pub struct ColorMaterials {
    materials: Vec<Material>,
    by_block: HashMap<BlockId, MaterialHandle>,
}

impl ColorMaterials {
    /// Creates one lit material for every coloured block kind.
    pub fn new() -> Self {
        let mut materials = Vec::new();
        let mut by_block = HashMap::new();
        for kind in all_kinds() {
            if let Some(color) = kind.color {
                by_block.insert(kind.id, MaterialHandle(materials.len()));
                materials.push(Material::for_kind(kind, color));
            }
        }
        ColorMaterials {
            materials,
            by_block,
        }
    }

    /// Creates the table and applies `quality` to it.
    pub fn with_quality(quality: MaterialQuality) -> Self {
        let mut materials = Self::new();
        materials.set_quality(quality);
        materials
    }

    /// The material behind a handle.
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0)
    }

    /// Number of materials in the table.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Swaps shading in place. Handles stay valid.
    pub fn set_quality(&mut self, quality: MaterialQuality) {
        debug!("Setting material quality to {:?}", quality);
        for material in self.materials.iter_mut() {
            match quality {
                MaterialQuality::Low => material.shading = Shading::Basic,
                MaterialQuality::High => material.shading = Shading::Lambert,
                MaterialQuality::Medium => {}
            }
        }
    }
}

impl Default for ColorMaterials {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialProvider for ColorMaterials {
    fn material_for(&self, block_id: BlockId) -> Option<MaterialHandle> {
        self.by_block.get(&block_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::AIR;

    #[test]
    fn every_coloured_kind_has_a_material() {
        let materials = ColorMaterials::new();
        assert_eq!(materials.len(), 9);
        assert!(materials.material_for(AIR).is_none());
        assert!(materials.material_for(250).is_none());

        let stone = materials.material_for(BlockType::STONE.id()).unwrap();
        let stone = materials.material(stone).unwrap();
        assert_eq!(stone.color, 0x808080);
        assert!(!stone.transparent);
        assert_eq!(stone.opacity, 1.0);
    }

    #[test]
    fn water_and_glass_are_transparent() {
        let materials = ColorMaterials::new();
        let water = materials
            .material(materials.material_for(BlockType::WATER.id()).unwrap())
            .unwrap();
        let glass = materials
            .material(materials.material_for(BlockType::GLASS.id()).unwrap())
            .unwrap();
        assert!(water.transparent && water.double_sided);
        assert_eq!(water.opacity, 0.8);
        assert!(glass.transparent);
        assert_eq!(glass.opacity, 0.3);
    }

    #[test]
    fn quality_swaps_shading_in_place() {
        let mut materials = ColorMaterials::with_quality(MaterialQuality::Low);
        let handle = materials.material_for(BlockType::GRASS.id()).unwrap();
        assert_eq!(materials.material(handle).unwrap().shading, Shading::Basic);

        materials.set_quality(MaterialQuality::Medium);
        assert_eq!(materials.material(handle).unwrap().shading, Shading::Basic);

        materials.set_quality(MaterialQuality::High);
        assert_eq!(materials.material_for(BlockType::GRASS.id()), Some(handle));
        assert_eq!(materials.material(handle).unwrap().shading, Shading::Lambert);
    }

    #[test]
    fn rgb_is_normalised() {
        let materials = ColorMaterials::new();
        let grass = materials
            .material(materials.material_for(BlockType::GRASS.id()).unwrap())
            .unwrap();
        let [r, g, b] = grass.rgb();
        assert!((r - 124.0 / 255.0).abs() < 1e-6);
        assert!((g - 252.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }
}
