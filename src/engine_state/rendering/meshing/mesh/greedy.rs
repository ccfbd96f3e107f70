//! Greedy meshing implementation for voxel rendering.
//!
//! This module implements the greedy meshing algorithm, which merges adjacent
//! coplanar faces of the same block kind into larger quads. For a chunk with
//! extents `[X, Y, Z]` it sweeps a plane through the chunk along each axis:
//!
//! 1. At every plane position it builds a 2D mask recording, per cell, whether a
//!    face is needed between the voxel behind the plane and the voxel ahead of it.
//! 2. It then covers the non-zero cells of the mask with maximal rectangles,
//!    first growing each rectangle along `u` and then along `v`.
//!
//! The plane starts one step outside the chunk. [`Chunk::get`] reports air outside
//! the chunk, so the chunk boundary needs no special casing.

use crate::engine_state::voxels::{
    block::{block_side::{Axis, BlockSide}, solid_of, BlockId},
    chunk::Chunk,
};

use super::{face::Quad, mesh::ChunkMesh};

/// The mask value for the pair of voxels straddling a plane.
///
/// * `0`: no face (both solid or both empty)
/// * `+id`: `behind` is solid, the face points along `+axis`
/// * `-id`: `ahead` is solid, the face points along `-axis`
#[inline]
fn face_mask_value(behind: BlockId, ahead: BlockId) -> i16 {
    match (solid_of(behind), solid_of(ahead)) {
        (true, false) => i16::from(behind),
        (false, true) => -i16::from(ahead),
        _ => 0,
    }
}

/// Generates the greedy mesh of `chunk`, reusing `mask` as scratch space.
///
/// # Performance
/// Building the masks costs O(X·Y·Z) voxel reads per axis. Merging visits each
/// mask cell a constant number of times, so each plane costs O(u·v) regardless of
/// how many quads it produces.
pub fn greedy(chunk: &Chunk, mask: &mut Vec<i16>) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();
    let extents = chunk.dimensions().extents();

    for axis in Axis::ALL {
        let d = axis.index();
        let (u, v) = axis.plane_axes();
        let (size_u, size_v) = (extents[u], extents[v]);

        mask.clear();
        mask.resize(size_u * size_v, 0);

        let mut x = [0i32; 3];
        let mut q = [0i32; 3];
        q[d] = 1;

        x[d] = -1;
        while x[d] < extents[d] as i32 {
            // Compare the voxel at `x` with the voxel one step ahead along `d`.
            let mut n = 0;
            for j in 0..size_v {
                x[v] = j as i32;
                for i in 0..size_u {
                    x[u] = i as i32;
                    let behind = chunk.get(x[0], x[1], x[2]);
                    let ahead = chunk.get(x[0] + q[0], x[1] + q[1], x[2] + q[2]);
                    mask[n] = face_mask_value(behind, ahead);
                    n += 1;
                }
            }

            // Faces lie on the plane between `x[d]` and `x[d] + 1`.
            x[d] += 1;

            merge_mask(mask, size_u, size_v, |i, j, width, height, value| {
                mesh.push(Quad {
                    side: BlockSide::from_axis(axis, value > 0),
                    plane: x[d],
                    u: i as i32,
                    v: j as i32,
                    width: width as i32,
                    height: height as i32,
                    block_id: value.unsigned_abs() as BlockId,
                });
            });
        }
    }

    mesh
}

/// Covers every non-zero cell of `mask` with maximal rectangles of equal value.
///
/// Cells are consumed (zeroed) as rectangles are emitted. `emit` receives the
/// rectangle's minimum corner, its width and height, and the mask value.
fn merge_mask<F>(mask: &mut [i16], size_u: usize, size_v: usize, mut emit: F)
where
    F: FnMut(usize, usize, usize, usize, i16),
{
    let mut n = 0;
    for j in 0..size_v {
        let mut i = 0;
        while i < size_u {
            let value = mask[n];
            if value == 0 {
                i += 1;
                n += 1;
                continue;
            }

            let mut width = 1;
            while i + width < size_u && mask[n + width] == value {
                width += 1;
            }

            let mut height = 1;
            'grow: while j + height < size_v {
                let row = n + height * size_u;
                for k in 0..width {
                    if mask[row + k] != value {
                        break 'grow;
                    }
                }
                height += 1;
            }

            emit(i, j, width, height, value);

            for l in 0..height {
                let row = n + l * size_u;
                mask[row..row + width].fill(0);
            }

            i += width;
            n += width;
        }
    }
}
