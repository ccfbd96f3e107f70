//! # World Module
//!
//! This module provides the `World` struct which manages the loaded chunks of the voxel world.
//! It serves as the central coordinator for chunk loading, unloading, block access and remeshing.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks near the viewpoint are kept in
//! memory. Chunks live in a hash map keyed by their horizontal chunk coordinates; every chunk
//! spans the full world height.
//!
//! ## Streaming
//!
//! Whenever the viewpoint enters a new chunk the world runs two sweeps:
//! - A load sweep creating every missing chunk within Chebyshev distance `R` of the viewpoint
//! - An unload sweep releasing every chunk farther away than `R + 1`
//!
//! The one chunk gap between the two radii keeps chunks from being reloaded over and over
//! while the viewpoint moves back and forth across a chunk border.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Meshing runs synchronously inside the call that requests it
//! - The mesh builder's scratch memory is shared by every chunk

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info, warn};

use crate::engine_state::{
    config::{ConfigError, WorldConfig},
    rendering::{meshing::MeshBuilder, MaterialProvider, Scene},
    voxels::{
        block::{BlockId, AIR},
        chunk::{Chunk, ChunkDimensions, ChunkPosition, TerrainFill},
    },
};

/// Largest supported render distance, in chunks.
pub const MAX_RENDER_DISTANCE: u32 = 64;

/// The chunked voxel world around a moving viewpoint.
///
/// The world owns its chunks and is the only writer to them. Geometry is handed to the scene
/// collaborator `S`; materials come from the collaborator `M`.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::{
///     config::WorldConfig,
///     rendering::{BatchScene, ColorMaterials},
///     voxels::world::World,
/// };
///
/// let config = WorldConfig {
///     chunk_edge: 8,
///     world_height: 16,
///     render_distance: 1,
///     ..WorldConfig::default()
/// };
/// let mut world = World::new(&config, BatchScene::new(), ColorMaterials::new()).unwrap();
/// world.initialize();
/// assert_eq!(world.loaded_count(), 9);
///
/// world.set_viewpoint(20.0, 4.0);
/// assert_eq!(world.viewpoint().x, 2);
/// ```
pub struct World<S: Scene, M: MaterialProvider> {
    /// A mapping from chunk coordinates to chunk data
    chunks: HashMap<ChunkPosition, Chunk>,
    /// Size of every chunk
    dimensions: ChunkDimensions,
    /// Contents written into newly loaded chunks
    terrain: TerrainFill,
    /// Load radius in chunks
    render_distance: u32,
    /// The chunk containing the viewpoint
    viewpoint: ChunkPosition,
    /// Mesh generation shared by all chunks
    mesh_builder: MeshBuilder,
    /// Where batches are displayed
    scene: S,
    /// Material lookup for meshing
    materials: M,
}

impl<S: Scene, M: MaterialProvider> World<S, M> {
    /// Creates an empty world from a configuration.
    ///
    /// No chunk is loaded until [`World::initialize`] or [`World::set_viewpoint`] is called.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the configuration is malformed.
    pub fn new(config: &WorldConfig, scene: S, materials: M) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(World {
            chunks: HashMap::new(),
            dimensions: config.dimensions()?,
            terrain: config.terrain.clone(),
            render_distance: config.render_distance as u32,
            viewpoint: ChunkPosition::new(0, 0),
            mesh_builder: MeshBuilder::new(),
            scene,
            materials,
        })
    }

    /// Loads every chunk around the current viewpoint.
    pub fn initialize(&mut self) {
        info!(
            "Initializing world around {:?} with render distance {}",
            self.viewpoint, self.render_distance
        );
        self.update_loaded_chunks();
    }

    /// Moves the viewpoint to the given world coordinates.
    ///
    /// Nothing happens unless the viewpoint crosses into another chunk, in which case the
    /// load and unload sweeps run around the new chunk.
    ///
    /// Non-finite coordinates are ignored. Coordinates beyond the addressable world are
    /// clamped to its last chunk.
    pub fn set_viewpoint(&mut self, world_x: f32, world_z: f32) {
        if !world_x.is_finite() || !world_z.is_finite() {
            warn!("Ignoring non-finite viewpoint ({}, {})", world_x, world_z);
            return;
        }

        let edge = self.dimensions.edge() as f32;
        let limit = self.chunk_limit();
        let position = ChunkPosition::new(
            ((world_x / edge).floor() as i32).clamp(-limit, limit),
            ((world_z / edge).floor() as i32).clamp(-limit, limit),
        );
        if position == self.viewpoint {
            return;
        }

        debug!("Viewpoint moved from {:?} to {:?}", self.viewpoint, position);
        self.viewpoint = position;
        self.update_loaded_chunks();
    }

    /// Changes the load radius and reruns the sweeps.
    ///
    /// Values above [`MAX_RENDER_DISTANCE`] are capped.
    pub fn set_render_distance(&mut self, render_distance: u32) {
        if render_distance > MAX_RENDER_DISTANCE {
            warn!(
                "Render distance {} capped to {}",
                render_distance, MAX_RENDER_DISTANCE
            );
        }
        let render_distance = render_distance.min(MAX_RENDER_DISTANCE);
        if render_distance == self.render_distance {
            return;
        }

        info!(
            "Render distance changed from {} to {}",
            self.render_distance, render_distance
        );
        self.render_distance = render_distance;
        self.update_loaded_chunks();
    }

    /// Largest chunk coordinate, in either direction, that the world will load.
    ///
    /// Keeps every voxel of a loaded chunk, and every chunk coordinate within the render
    /// distance of the viewpoint, representable as `i32`.
    fn chunk_limit(&self) -> i32 {
        i32::MAX / 2 / self.dimensions.edge() as i32
    }

    /// Runs the load sweep and then the unload sweep.
    fn update_loaded_chunks(&mut self) {
        let loaded = self.load_chunks_around_viewpoint();
        let unloaded = self.unload_distant_chunks();
        info!(
            "Chunk sweep around {:?}: {} loaded, {} unloaded, {} resident",
            self.viewpoint,
            loaded,
            unloaded,
            self.chunks.len()
        );
    }

    /// Loads and meshes every missing chunk within the render distance.
    ///
    /// # Returns
    ///
    /// The number of chunks loaded.
    fn load_chunks_around_viewpoint(&mut self) -> usize {
        let radius = self.render_distance as i32;
        let limit = self.chunk_limit();
        let mut loaded = 0;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let position = self.viewpoint.offset(dx, dz);
                if position.x.abs() > limit || position.z.abs() > limit {
                    continue;
                }
                if self.chunks.contains_key(&position) {
                    continue;
                }

                let chunk = Chunk::generate(position, self.dimensions, &self.terrain);
                self.chunks.insert(position, chunk);
                self.update_chunk_mesh(position);
                loaded += 1;
            }
        }
        loaded
    }

    /// Releases every chunk farther than one chunk beyond the render distance.
    ///
    /// # Returns
    ///
    /// The number of chunks unloaded.
    fn unload_distant_chunks(&mut self) -> usize {
        let max_distance = self.render_distance + 1;
        let viewpoint = self.viewpoint;
        let distant: Vec<ChunkPosition> = self
            .chunks
            .keys()
            .filter(|position| position.chebyshev_distance(&viewpoint) > max_distance)
            .copied()
            .collect();

        for position in distant.iter() {
            if let Some(mut chunk) = self.chunks.remove(position) {
                chunk.release_batches(&mut self.scene);
            }
        }
        distant.len()
    }

    /// Remeshes a loaded chunk if it has changed since it was last meshed.
    ///
    /// # Returns
    ///
    /// `true` if new batches were generated, `false` if the chunk is missing or clean.
    pub fn update_chunk_mesh(&mut self, position: ChunkPosition) -> bool {
        let Some(chunk) = self.chunks.get_mut(&position) else {
            return false;
        };
        if !chunk.is_dirty() {
            return false;
        }

        let batches = self.mesh_builder.build_batches(chunk, &self.materials);
        chunk.replace_batches(&mut self.scene, batches);
        true
    }

    /// The chunk containing a world-space voxel column.
    pub fn world_to_chunk(&self, world_x: i32, world_z: i32) -> ChunkPosition {
        let edge = self.dimensions.edge() as i32;
        ChunkPosition::new(world_x.div_euclid(edge), world_z.div_euclid(edge))
    }

    /// Splits world coordinates into the containing chunk and the chunk-local position.
    pub fn world_to_local(&self, world: Point3<i32>) -> (ChunkPosition, Point3<i32>) {
        let edge = self.dimensions.edge() as i32;
        (
            self.world_to_chunk(world.x, world.z),
            Point3::new(world.x.rem_euclid(edge), world.y, world.z.rem_euclid(edge)),
        )
    }

    /// Reads the block at world coordinates.
    ///
    /// Unloaded chunks and positions outside the world height read as air.
    pub fn get_block(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockId {
        let (position, local) = self.world_to_local(Point3::new(world_x, world_y, world_z));
        self.chunks
            .get(&position)
            .map_or(AIR, |chunk| chunk.get(local.x, local.y, local.z))
    }

    /// Writes a block at world coordinates and remeshes what it affects.
    ///
    /// The owning chunk is remeshed, and so is every loaded neighbour sharing the face of the
    /// edited voxel that lies on the chunk border.
    ///
    /// # Returns
    ///
    /// `false` if the chunk is not loaded or the position is outside the world height.
    pub fn set_block(&mut self, world_x: i32, world_y: i32, world_z: i32, block_id: BlockId) -> bool {
        let (position, local) = self.world_to_local(Point3::new(world_x, world_y, world_z));
        let Some(chunk) = self.chunks.get_mut(&position) else {
            return false;
        };
        if !chunk.set(local.x, local.y, local.z, block_id) {
            return false;
        }

        self.update_chunk_mesh(position);

        let last = self.dimensions.edge() as i32 - 1;
        let mut neighbours = Vec::new();
        if local.x == 0 {
            neighbours.push(position.offset(-1, 0));
        }
        if local.x == last {
            neighbours.push(position.offset(1, 0));
        }
        if local.z == 0 {
            neighbours.push(position.offset(0, -1));
        }
        if local.z == last {
            neighbours.push(position.offset(0, 1));
        }

        for neighbour in neighbours {
            if let Some(chunk) = self.chunks.get_mut(&neighbour) {
                chunk.mark_dirty();
                self.update_chunk_mesh(neighbour);
            }
        }
        true
    }

    /// Releases every chunk and its batches.
    pub fn dispose(&mut self) {
        info!("Disposing world with {} chunks", self.chunks.len());
        for chunk in self.chunks.values_mut() {
            chunk.release_batches(&mut self.scene);
        }
        self.chunks.clear();
    }

    /// The loaded chunk at `position`, if any.
    pub fn chunk(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Positions of all loaded chunks, in no particular order.
    pub fn loaded_positions(&self) -> impl Iterator<Item = ChunkPosition> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// The chunk containing the viewpoint.
    pub fn viewpoint(&self) -> ChunkPosition {
        self.viewpoint
    }

    /// The load radius in chunks.
    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    /// Dimensions shared by every chunk.
    pub fn dimensions(&self) -> ChunkDimensions {
        self.dimensions
    }

    /// The scene receiving chunk batches.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The material table used for meshing.
    pub fn materials(&self) -> &M {
        &self.materials
    }
}
