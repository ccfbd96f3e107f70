//! Mesh generation for the voxel world.
//!
//! The [`MeshBuilder`] turns a chunk into surface batches:
//! 1. Greedy meshing produces the chunk's quads, grouped by block kind
//! 2. Each group becomes one [`SurfaceBatch`] positioned at the chunk origin
//!
//! Groups whose block kind has no material are dropped with a warning.

use log::debug;
use web_time::Instant;

use crate::engine_state::{
    rendering::{MaterialProvider, SurfaceBatch},
    voxels::chunk::Chunk,
};

/// Core mesh generation algorithms and data structures.
pub mod mesh;

pub use mesh::ChunkMesh;

/// Builds meshes for chunks, one chunk at a time.
///
/// The builder owns the scratch mask used by greedy meshing so that its
/// allocation is reused from one chunk to the next.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    /// Scratch space for the per-plane face mask
    mask: Vec<i16>,
}

impl MeshBuilder {
    /// Creates a new mesh builder with an empty scratch mask.
    pub fn new() -> Self {
        MeshBuilder { mask: Vec::new() }
    }

    /// Generates the greedy mesh of `chunk`.
    pub fn build_mesh(&mut self, chunk: &Chunk) -> ChunkMesh {
        mesh::greedy(chunk, &mut self.mask)
    }

    /// Generates the surface batches for `chunk`, one per drawable block kind.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to mesh
    /// * `materials` - Supplies the material of each block kind
    ///
    /// # Returns
    /// Batches in ascending block id order, positioned at the chunk's origin.
    pub fn build_batches<M: MaterialProvider>(
        &mut self,
        chunk: &Chunk,
        materials: &M,
    ) -> Vec<SurfaceBatch> {
        let start = Instant::now();
        let mesh = self.build_mesh(chunk);
        let quad_count = mesh.quad_count();
        let batches = mesh.into_batches(chunk.origin(), materials);
        debug!(
            "Meshed chunk {:?}: {} quads in {} batches in {:?}",
            chunk.position(),
            quad_count,
            batches.len(),
            start.elapsed()
        );
        batches
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cgmath::{InnerSpace, Point3, Vector3};

    use super::*;
    use crate::engine_state::{
        rendering::ColorMaterials,
        voxels::{
            block::{block_side::BlockSide, block_type::BlockType, AIR},
            chunk::{ChunkDimensions, ChunkPosition, TerrainFill},
        },
    };

    fn solid_chunk(edge: i32, height: i32) -> Chunk {
        Chunk::generate(
            ChunkPosition::new(0, 0),
            ChunkDimensions::new(edge, height).unwrap(),
            &TerrainFill::Solid {
                block: BlockType::STONE.id(),
            },
        )
    }

    #[test]
    fn solid_cube_meshes_to_six_full_quads() {
        let chunk = solid_chunk(4, 4);
        let mesh = MeshBuilder::new().build_mesh(&chunk);
        assert_eq!(mesh.quad_count(), 6);

        let sides: HashSet<BlockSide> = mesh.iter().map(|quad| quad.side).collect();
        assert_eq!(sides.len(), 6);
        for quad in mesh.iter() {
            assert_eq!((quad.width, quad.height), (4, 4));
            let expected_plane = if quad.side.is_positive() { 4 } else { 0 };
            assert_eq!(quad.plane, expected_plane);
        }
    }

    #[test]
    fn non_cubic_chunks_use_per_axis_extents() {
        let chunk = solid_chunk(4, 7);
        let mesh = MeshBuilder::new().build_mesh(&chunk);
        assert_eq!(mesh.quad_count(), 6);
        let area: i32 = mesh.iter().map(|quad| quad.area()).sum();
        assert_eq!(area, 2 * (4 * 4 + 4 * 7 + 4 * 7));
    }

    #[test]
    fn empty_chunk_has_no_quads() {
        let chunk = Chunk::new(
            ChunkPosition::new(3, -1),
            ChunkDimensions::new(4, 4).unwrap(),
        );
        let mut builder = MeshBuilder::new();
        assert!(builder.build_mesh(&chunk).is_empty());
        assert!(builder
            .build_batches(&chunk, &ColorMaterials::new())
            .is_empty());
    }

    #[test]
    fn single_cavity_exposes_six_interior_faces() {
        let mut chunk = solid_chunk(4, 4);
        chunk.set(1, 1, 1, AIR);
        let mesh = MeshBuilder::new().build_mesh(&chunk);

        let extents = chunk.dimensions().extents();
        let interior: Vec<_> = mesh
            .iter()
            .filter(|quad| {
                let d = quad.side.axis().index();
                quad.plane != 0 && quad.plane != extents[d] as i32
            })
            .collect();
        assert_eq!(interior.iter().map(|quad| quad.area()).sum::<i32>(), 6);

        // Every interior face belongs to a neighbour of the cavity and points into it.
        for quad in interior {
            for face in quad.unit_faces() {
                let mut toward = [0; 3];
                toward[face.axis] = if face.positive { 1 } else { -1 };
                let neighbour = [
                    face.voxel[0] + toward[0],
                    face.voxel[1] + toward[1],
                    face.voxel[2] + toward[2],
                ];
                assert_eq!(neighbour, [1, 1, 1]);
            }
        }
    }

    #[test]
    fn greedy_covers_the_same_faces_as_naive() {
        let dimensions = ChunkDimensions::new(6, 9).unwrap();
        let mut builder = MeshBuilder::new();
        let mut rng = fastrand::Rng::with_seed(0x5eed);

        for round in 0..24 {
            let mut chunk = Chunk::new(ChunkPosition::new(round, -round), dimensions);
            let density = rng.f64();
            for index in 0..dimensions.volume() {
                if rng.f64() < density {
                    let p = dimensions.position_of(index);
                    // Mixes solid kinds with water, which is not solid.
                    let id = rng.u8(BlockType::GRASS.id()..=BlockType::GLASS.id());
                    chunk.set(p.x, p.y, p.z, id);
                }
            }

            let greedy = builder.build_mesh(&chunk);
            let naive = mesh::naive(&chunk);
            let greedy_faces = greedy.unit_faces();

            let unique: HashSet<_> = greedy_faces.iter().collect();
            assert_eq!(unique.len(), greedy_faces.len(), "round {round} has overlapping quads");
            assert_eq!(greedy_faces, naive.unit_faces(), "round {round} differs");
            assert!(greedy.quad_count() <= naive.quad_count());
        }
    }

    #[test]
    fn greedy_merges_a_flat_floor() {
        let chunk = Chunk::generate(
            ChunkPosition::new(0, 0),
            ChunkDimensions::new(8, 8).unwrap(),
            &TerrainFill::Flat { ground_level: 4 },
        );
        let mesh = MeshBuilder::new().build_mesh(&chunk);
        let grass_tops: Vec<_> = mesh
            .quads_of(BlockType::GRASS.id())
            .iter()
            .filter(|quad| quad.side == BlockSide::TOP)
            .collect();
        assert_eq!(grass_tops.len(), 1);
        assert_eq!(grass_tops[0].area(), 64);
        assert_eq!(grass_tops[0].plane, 5);
    }

    #[test]
    fn batch_triangles_face_their_normals() {
        let mut chunk = solid_chunk(4, 4);
        chunk.set(2, 3, 2, BlockType::GLASS.id());
        chunk.set(0, 0, 0, AIR);
        let batches = MeshBuilder::new().build_batches(&chunk, &ColorMaterials::new());
        assert_eq!(batches.len(), 2);

        for batch in &batches {
            for triangle in batch.indices.chunks(3) {
                let [a, b, c] = [
                    batch.vertices[triangle[0] as usize],
                    batch.vertices[triangle[1] as usize],
                    batch.vertices[triangle[2] as usize],
                ];
                let normal = Vector3::from(a.normal);
                assert_eq!(Vector3::from(b.normal), normal);
                assert_eq!(Vector3::from(c.normal), normal);
                let facing: Vector3<f32> = (b.point() - a.point()).cross(c.point() - a.point());
                assert!(facing.dot(normal) > 0.0);
            }
        }
    }

    #[test]
    fn batches_are_positioned_at_the_chunk_origin() {
        let chunk = Chunk::generate(
            ChunkPosition::new(-1, 2),
            ChunkDimensions::new(4, 4).unwrap(),
            &TerrainFill::Checkerboard {
                block: BlockType::SAND.id(),
            },
        );
        let batches = MeshBuilder::new().build_batches(&chunk, &ColorMaterials::new());
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].origin, Point3::new(-4, 0, 8));
        // A checkerboard never merges, so every solid voxel shows all six faces.
        assert_eq!(batches[0].quad_count(), chunk.count_solid() * 6);
    }
}
