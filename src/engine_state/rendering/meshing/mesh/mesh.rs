//! Mesh data structures and operations for voxel rendering.
//!
//! A [`ChunkMesh`] is the block-kind-grouped list of quads produced for one
//! chunk. It converts into [`SurfaceBatch`]es, one per drawable block kind, with
//! the vertex and index layout the rendering collaborator expects.

use std::collections::BTreeMap;

use cgmath::Point3;
use log::warn;

use super::face::{FaceDescriptor, Quad};
use crate::engine_state::{
    rendering::{MaterialProvider, SurfaceBatch, Vertex},
    voxels::block::BlockId,
};

/// The quads covering the visible surface of a chunk, grouped by block kind.
///
/// Groups are kept in ascending block id order so the batches built from a mesh
/// come out in a stable order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMesh {
    quads: BTreeMap<BlockId, Vec<Quad>>,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        ChunkMesh {
            quads: BTreeMap::new(),
        }
    }

    /// Appends a quad to its block kind's group.
    pub fn push(&mut self, quad: Quad) {
        self.quads.entry(quad.block_id).or_default().push(quad);
    }

    /// Total number of quads across all groups.
    pub fn quad_count(&self) -> usize {
        self.quads.values().map(Vec::len).sum()
    }

    /// Whether the mesh has no quads.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// The quads of one block kind.
    pub fn quads_of(&self, block_id: BlockId) -> &[Quad] {
        self.quads.get(&block_id).map_or(&[], Vec::as_slice)
    }

    /// Iterates over every quad, grouped by ascending block id.
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.values().flatten()
    }

    /// Expands every quad into the unit faces it covers, in sorted order.
    ///
    /// Duplicates are kept, so a mesh that covers some face twice expands to a
    /// longer list than one that covers it once.
    pub fn unit_faces(&self) -> Vec<FaceDescriptor> {
        let mut faces: Vec<FaceDescriptor> = self.iter().flat_map(|quad| quad.unit_faces()).collect();
        faces.sort_unstable();
        faces
    }

    /// Converts the mesh into one batch per block kind, positioned at `origin`.
    ///
    /// Block kinds the material provider has no material for are skipped.
    pub fn into_batches<M: MaterialProvider>(
        self,
        origin: Point3<i32>,
        materials: &M,
    ) -> Vec<SurfaceBatch> {
        let mut batches = Vec::with_capacity(self.quads.len());
        for (block_id, quads) in self.quads {
            let Some(material) = materials.material_for(block_id) else {
                warn!(
                    "No material for block id {}, skipping {} quads",
                    block_id,
                    quads.len()
                );
                continue;
            };

            let mut vertices = Vec::with_capacity(quads.len() * 4);
            let mut indices = Vec::with_capacity(quads.len() * 6);
            for (quads_generated, quad) in quads.iter().enumerate() {
                vertices.extend(Self::generate_quad_vertices(quad));
                indices.extend(Self::generate_quad_indices(quad, quads_generated as u32));
            }

            batches.push(SurfaceBatch {
                block_id,
                material,
                origin,
                vertices,
                indices,
            });
        }
        batches
    }

    /// Generates the four corner vertices of a quad, all carrying its normal.
    pub fn generate_quad_vertices(quad: &Quad) -> [Vertex; 4] {
        let normal = quad.side.normal();
        quad.corners().map(|corner| Vertex::new(corner, normal))
    }

    /// Generates index data for a quad, adjusted by the number of previously generated quads.
    pub fn generate_quad_indices(quad: &Quad, quads_generated: u32) -> [u32; 6] {
        quad.indices(quads_generated * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::{ColorMaterials, MaterialHandle},
        voxels::block::{block_side::BlockSide, block_type::BlockType},
    };

    struct OnlyStone;

    impl MaterialProvider for OnlyStone {
        fn material_for(&self, block_id: BlockId) -> Option<MaterialHandle> {
            (block_id == BlockType::STONE.id()).then_some(MaterialHandle(7))
        }
    }

    fn quad(side: BlockSide, block_id: BlockId) -> Quad {
        Quad {
            side,
            plane: 2,
            u: 0,
            v: 1,
            width: 3,
            height: 2,
            block_id,
        }
    }

    #[test]
    fn groups_quads_by_block_kind() {
        let mut mesh = ChunkMesh::new();
        mesh.push(quad(BlockSide::TOP, 3));
        mesh.push(quad(BlockSide::LEFT, 1));
        mesh.push(quad(BlockSide::RIGHT, 3));
        assert_eq!(mesh.quad_count(), 3);
        assert_eq!(mesh.quads_of(3).len(), 2);
        assert!(mesh.quads_of(9).is_empty());
        assert_eq!(mesh.unit_faces().len(), 18);
    }

    #[test]
    fn batches_without_material_are_skipped() {
        let mut mesh = ChunkMesh::new();
        mesh.push(quad(BlockSide::TOP, BlockType::STONE.id()));
        mesh.push(quad(BlockSide::TOP, BlockType::DIRT.id()));

        let batches = mesh.into_batches(Point3::new(16, 0, -16), &OnlyStone);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].block_id, BlockType::STONE.id());
        assert_eq!(batches[0].material, MaterialHandle(7));
        assert_eq!(batches[0].origin, Point3::new(16, 0, -16));
    }

    #[test]
    fn batch_layout_is_four_vertices_and_six_indices_per_quad() {
        let mut mesh = ChunkMesh::new();
        mesh.push(quad(BlockSide::TOP, 3));
        mesh.push(quad(BlockSide::BOTTOM, 3));

        let batches = mesh.into_batches(Point3::new(0, 0, 0), &ColorMaterials::new());
        let batch = &batches[0];
        assert_eq!(batch.vertices.len(), 8);
        assert_eq!(batch.indices, vec![0, 1, 2, 0, 2, 3, 4, 6, 5, 4, 7, 6]);
        assert_eq!(batch.quad_count(), 2);
        assert_eq!(batch.triangle_count(), 4);
        assert!(batch.vertices[..4].iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
        assert!(batch.vertices[4..].iter().all(|v| v.normal == [0.0, -1.0, 0.0]));
    }
}
