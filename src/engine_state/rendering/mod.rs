//! Rendering-side interfaces of the voxel world.
//!
//! The world model never draws anything itself. It hands finished geometry to a
//! [`Scene`] and asks a [`MaterialProvider`] which material each block kind
//! uses. This module defines those seams, the [`SurfaceBatch`] that crosses
//! them, and the mesh generation that produces batches from chunks.

use cgmath::Point3;

use super::voxels::block::BlockId;

mod materials;
pub mod meshing;
mod scene;
mod vertex;

// Re-export commonly used types
pub use materials::{ColorMaterials, Material, MaterialQuality, Shading};
pub use scene::BatchScene;
pub use vertex::Vertex;

/// Opaque handle to a drawable material owned by the material collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub usize);

/// Handle to a batch that has been added to a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

/// Geometry for every exposed face of one block kind within one chunk.
///
/// Vertex positions are relative to `origin`. Each quad contributes four
/// vertices and six indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceBatch {
    /// The block kind drawn by this batch
    pub block_id: BlockId,
    /// Material used to draw it
    pub material: MaterialHandle,
    /// World-space offset of the owning chunk
    pub origin: Point3<i32>,
    /// Four vertices per quad
    pub vertices: Vec<Vertex>,
    /// Two triangles per quad
    pub indices: Vec<u32>,
}

impl SurfaceBatch {
    /// Number of quads in this batch.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Number of triangles in this batch.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The displayed scene that batches are added to and removed from.
pub trait Scene {
    /// Adds a batch to the scene and returns the handle used to remove it.
    fn add_batch(&mut self, batch: SurfaceBatch) -> BatchId;

    /// Removes a batch, returning it if it was present.
    fn remove_batch(&mut self, id: BatchId) -> Option<SurfaceBatch>;
}

/// Supplies the material used to draw each block kind.
pub trait MaterialProvider {
    /// The material for `block_id`, or `None` if this kind cannot be drawn.
    fn material_for(&self, block_id: BlockId) -> Option<MaterialHandle>;
}
