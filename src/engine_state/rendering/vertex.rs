//! Vertex data structures for voxel surface batches.
//!
//! This module defines the vertex format handed to the rendering collaborator.

use cgmath::{Point3, Vector3};

/// A vertex of a meshed voxel surface.
///
/// Positions are relative to the owning batch's origin (the chunk's world-space
/// corner), so a whole chunk can be moved by changing one offset.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the batch origin
    pub position: [f32; 3],
    /// Unit face normal, constant across a quad
    pub normal: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex from a lattice point and an integer face normal.
    pub fn new(pos: Point3<i32>, normal: Vector3<i32>) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            normal: [normal.x as f32, normal.y as f32, normal.z as f32],
        }
    }

    /// The position as a cgmath point.
    pub fn point(&self) -> Point3<f32> {
        Point3::from(self.position)
    }
}
