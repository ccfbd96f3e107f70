//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size column of the voxel
//! world, `edge × height × edge` blocks, addressed by integer chunk coordinates.
//!
//! ## Storage
//!
//! Block ids are stored one byte per voxel in a single flat vector. Every read
//! and write goes through [`ChunkDimensions::index`], which flattens `(x, y, z)`
//! as `y * edge * edge + z * edge + x`. Nothing else computes offsets.
//!
//! ## Bounds
//!
//! Reads outside the chunk return [`AIR`] and writes outside the chunk are
//! ignored. Meshing relies on this: the boundary of a chunk reads as open air,
//! so no voxel lookup in the mesher needs its own bounds check.

use cgmath::Point3;

use super::block::{BlockId, AIR};
use crate::engine_state::{
    config::ConfigError,
    rendering::{BatchId, Scene, SurfaceBatch},
};

pub use chunk_creation::TerrainFill;
pub use chunk_iteration::SolidVoxels;

mod chunk_creation;
pub mod chunk_iteration;

/// Position of a chunk in chunk units (not block units).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    /// Chunk column along X.
    pub x: i32,
    /// Chunk column along Z.
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a chunk position.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkPosition { x, z }
    }

    /// Chebyshev (square) distance in chunks.
    pub fn chebyshev_distance(&self, other: &ChunkPosition) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dz)
    }

    /// Offsets this position by whole chunks.
    pub fn offset(&self, dx: i32, dz: i32) -> ChunkPosition {
        ChunkPosition::new(self.x + dx, self.z + dz)
    }
}

/// Edge length and height of every chunk in a world, fixed at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkDimensions {
    edge: usize,
    height: usize,
}

impl ChunkDimensions {
    /// Validates and creates chunk dimensions.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when either value is zero or negative.
    pub fn new(edge: i32, height: i32) -> Result<Self, ConfigError> {
        if edge <= 0 {
            return Err(ConfigError::ChunkEdge(edge));
        }
        if height <= 0 {
            return Err(ConfigError::WorldHeight(height));
        }
        Ok(ChunkDimensions {
            edge: edge as usize,
            height: height as usize,
        })
    }

    /// Blocks along X and Z.
    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Blocks along Y.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Extents as `[x, y, z]`.
    #[inline]
    pub fn extents(&self) -> [usize; 3] {
        [self.edge, self.height, self.edge]
    }

    /// Total number of voxels in one chunk.
    #[inline]
    pub fn volume(&self) -> usize {
        self.edge * self.edge * self.height
    }

    /// Whether a local coordinate lies inside the chunk.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.edge
            && (y as usize) < self.height
            && (z as usize) < self.edge
    }

    /// The flat storage offset of an in-bounds local coordinate.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        y * self.edge * self.edge + z * self.edge + x
    }

    /// Inverse of [`ChunkDimensions::index`].
    #[inline]
    pub fn position_of(&self, index: usize) -> Point3<i32> {
        let plane = self.edge * self.edge;
        Point3::new(
            (index % self.edge) as i32,
            (index / plane) as i32,
            ((index / self.edge) % self.edge) as i32,
        )
    }
}

/// Represents one `edge × height × edge` column of voxel blocks.
///
/// A chunk owns its voxel array and the handles of the surface batches currently
/// drawn for it. The batches themselves live in the [`Scene`]; the chunk is
/// responsible for removing them again when they are replaced or it is unloaded.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates.
    position: ChunkPosition,
    dimensions: ChunkDimensions,
    /// Block ids, flattened by `ChunkDimensions::index`.
    blocks: Vec<BlockId>,
    /// Set by every successful write, cleared when new batches are installed.
    dirty: bool,
    batches: Vec<BatchId>,
    /// Number of meshing passes installed so far.
    mesh_generation: u64,
}

impl Chunk {
    /// Creates a chunk filled with air. New chunks start dirty.
    pub fn new(position: ChunkPosition, dimensions: ChunkDimensions) -> Self {
        Chunk {
            position,
            dimensions,
            blocks: vec![AIR; dimensions.volume()],
            dirty: true,
            batches: Vec::new(),
            mesh_generation: 0,
        }
    }

    /// Creates a chunk and fills it with the given terrain.
    pub fn generate(
        position: ChunkPosition,
        dimensions: ChunkDimensions,
        terrain: &TerrainFill,
    ) -> Self {
        let mut chunk = Chunk::new(position, dimensions);
        terrain.fill(&mut chunk);
        chunk
    }

    /// The chunk coordinates of this chunk.
    pub fn position(&self) -> ChunkPosition {
        self.position
    }

    /// The dimensions this chunk was created with.
    pub fn dimensions(&self) -> ChunkDimensions {
        self.dimensions
    }

    /// Raw block storage in index order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// The block id at a local coordinate, or [`AIR`] outside the chunk.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        if self.dimensions.contains(x, y, z) {
            self.blocks[self.dimensions.index(x as usize, y as usize, z as usize)]
        } else {
            AIR
        }
    }

    /// Writes a block id at a local coordinate and marks the chunk dirty.
    ///
    /// Out-of-bounds writes are ignored. Returns whether the write happened.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block_id: BlockId) -> bool {
        if !self.dimensions.contains(x, y, z) {
            return false;
        }
        let index = self.dimensions.index(x as usize, y as usize, z as usize);
        self.blocks[index] = block_id;
        self.dirty = true;
        true
    }

    /// World-space position of this chunk's `(0, 0, 0)` voxel.
    pub fn origin(&self) -> Point3<i32> {
        let edge = self.dimensions.edge as i32;
        Point3::new(self.position.x * edge, 0, self.position.z * edge)
    }

    /// Converts a local coordinate to world space.
    pub fn local_to_world(&self, local: Point3<i32>) -> Point3<i32> {
        let origin = self.origin();
        Point3::new(origin.x + local.x, local.y, origin.z + local.z)
    }

    /// Converts a world coordinate to this chunk's local space.
    ///
    /// The result may lie outside the chunk if `world` does not belong to it.
    pub fn world_to_local(&self, world: Point3<i32>) -> Point3<i32> {
        let origin = self.origin();
        Point3::new(world.x - origin.x, world.y, world.z - origin.z)
    }

    /// Whether the chunk needs to be remeshed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces the next mesh update to regenerate this chunk.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Handles of the batches currently in the scene for this chunk.
    pub fn batches(&self) -> &[BatchId] {
        &self.batches
    }

    /// How many times new batches have been installed.
    pub fn mesh_generation(&self) -> u64 {
        self.mesh_generation
    }

    /// Removes every batch this chunk holds from the scene.
    pub fn release_batches<S: Scene>(&mut self, scene: &mut S) {
        for id in self.batches.drain(..) {
            scene.remove_batch(id);
        }
    }

    /// Replaces this chunk's batches with freshly meshed ones and clears the dirty flag.
    pub fn replace_batches<S: Scene>(&mut self, scene: &mut S, batches: Vec<SurfaceBatch>) {
        self.release_batches(scene);
        self.batches = batches
            .into_iter()
            .map(|batch| scene.add_batch(batch))
            .collect();
        self.dirty = false;
        self.mesh_generation += 1;
    }

    /// Number of non-air voxels.
    pub fn count_solid(&self) -> usize {
        self.blocks.iter().filter(|&&id| id != AIR).count()
    }

    /// Iterates over the non-air voxels of this chunk.
    pub fn solid_voxels(&self) -> SolidVoxels<'_> {
        SolidVoxels::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::{BatchScene, MaterialHandle},
        voxels::block::block_type::BlockType,
    };

    fn dims() -> ChunkDimensions {
        ChunkDimensions::new(4, 6).unwrap()
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(
            ChunkDimensions::new(0, 16),
            Err(ConfigError::ChunkEdge(0))
        ));
        assert!(matches!(
            ChunkDimensions::new(16, -1),
            Err(ConfigError::WorldHeight(-1))
        ));
    }

    #[test]
    fn set_then_get_returns_the_written_id() {
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0), dims());
        let stone = BlockType::STONE.id();
        for y in 0..6 {
            for z in 0..4 {
                for x in 0..4 {
                    let id = ((x + y + z) % 3) as BlockId + stone;
                    assert!(chunk.set(x, y, z, id));
                    assert_eq!(chunk.get(x, y, z), id);
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_reads_are_air_and_writes_are_ignored() {
        let mut chunk = Chunk::generate(
            ChunkPosition::new(0, 0),
            dims(),
            &TerrainFill::Solid {
                block: BlockType::STONE.id(),
            },
        );
        let before = chunk.blocks().to_vec();
        chunk.replace_batches(&mut BatchScene::new(), Vec::new());
        assert!(!chunk.is_dirty());

        for (x, y, z) in [(-1, 0, 0), (4, 0, 0), (0, -1, 0), (0, 6, 0), (0, 0, -1), (0, 0, 4)] {
            assert!(!chunk.set(x, y, z, BlockType::DIRT.id()));
            assert_eq!(chunk.get(x, y, z), AIR);
        }
        assert_eq!(chunk.blocks(), &before[..]);
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn index_formula_is_y_major() {
        let d = dims();
        assert_eq!(d.index(1, 0, 0), 1);
        assert_eq!(d.index(0, 0, 1), 4);
        assert_eq!(d.index(0, 1, 0), 16);
        for index in 0..d.volume() {
            let p = d.position_of(index);
            assert_eq!(d.index(p.x as usize, p.y as usize, p.z as usize), index);
        }
    }

    #[test]
    fn local_and_world_coordinates() {
        let chunk = Chunk::new(ChunkPosition::new(-2, 3), dims());
        assert_eq!(chunk.origin(), Point3::new(-8, 0, 12));
        let world = chunk.local_to_world(Point3::new(1, 5, 2));
        assert_eq!(world, Point3::new(-7, 5, 14));
        assert_eq!(chunk.world_to_local(world), Point3::new(1, 5, 2));
    }

    #[test]
    fn replacing_batches_releases_the_old_ones() {
        let mut scene = BatchScene::new();
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0), dims());
        let batch = || SurfaceBatch {
            block_id: BlockType::STONE.id(),
            material: MaterialHandle(0),
            origin: Point3::new(0, 0, 0),
            vertices: Vec::new(),
            indices: Vec::new(),
        };

        chunk.replace_batches(&mut scene, vec![batch(), batch()]);
        assert_eq!(scene.batch_count(), 2);
        assert_eq!(chunk.mesh_generation(), 1);

        chunk.replace_batches(&mut scene, vec![batch()]);
        assert_eq!(scene.batch_count(), 1);
        assert_eq!(scene.removed_total(), 2);
        assert_eq!(chunk.batches().len(), 1);

        chunk.release_batches(&mut scene);
        assert_eq!(scene.batch_count(), 0);
    }

    #[test]
    fn counts_non_air_voxels() {
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0), dims());
        assert_eq!(chunk.count_solid(), 0);
        chunk.set(0, 0, 0, BlockType::STONE.id());
        chunk.set(3, 5, 3, BlockType::WATER.id());
        assert_eq!(chunk.count_solid(), 2);
    }

    #[test]
    fn chebyshev_distance_is_square() {
        let origin = ChunkPosition::new(0, 0);
        assert_eq!(origin.chebyshev_distance(&ChunkPosition::new(3, -2)), 3);
        assert_eq!(origin.chebyshev_distance(&ChunkPosition::new(-1, -4)), 4);
    }
}
