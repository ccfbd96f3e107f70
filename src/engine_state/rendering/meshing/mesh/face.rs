use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, BlockId};

/// An axis-aligned rectangle of voxel faces that all share a block kind and side.
///
/// A quad lies in the plane `axis = plane`, where `axis` is `side.axis()`. Within
/// that plane it spans `width` cells along the `u` axis and `height` cells along the
/// `v` axis, starting at `(u, v)`. Coordinates are chunk-local lattice points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad {
    /// Which way the face points
    pub side: BlockSide,
    /// Lattice coordinate of the face plane along `side.axis()`
    pub plane: i32,
    /// Minimum corner along the in-plane `u` axis
    pub u: i32,
    /// Minimum corner along the in-plane `v` axis
    pub v: i32,
    /// Extent along `u`, in cells
    pub width: i32,
    /// Extent along `v`, in cells
    pub height: i32,
    /// The block kind of the solid voxels behind the face
    pub block_id: BlockId,
}

/// One unit face of one voxel: the voxel's position, the side, and its kind.
///
/// Any two meshes of the same chunk cover the same surface exactly when they
/// expand to the same set of descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceDescriptor {
    /// Local position of the solid voxel the face belongs to
    pub voxel: [i32; 3],
    /// Axis index of the face normal
    pub axis: usize,
    /// Whether the normal points along `+axis`
    pub positive: bool,
    /// Block kind of the voxel
    pub block_id: BlockId,
}

impl Quad {
    /// Creates a 1×1 quad covering the `side` face of the voxel at `voxel`.
    pub fn unit(voxel: Point3<i32>, side: BlockSide, block_id: BlockId) -> Self {
        let coords = [voxel.x, voxel.y, voxel.z];
        let d = side.axis().index();
        let (u, v) = side.axis().plane_axes();
        Quad {
            side,
            plane: coords[d] + i32::from(side.is_positive()),
            u: coords[u],
            v: coords[v],
            width: 1,
            height: 1,
            block_id,
        }
    }

    /// Number of unit faces covered.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// The four corners, in order `p0`, `p0 + du`, `p0 + du + dv`, `p0 + dv`.
    ///
    /// Because `u × v` points along `+axis`, this order is counter-clockwise when
    /// seen from the positive side of the plane.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        let d = self.side.axis().index();
        let (u, v) = self.side.axis().plane_axes();
        let corner = |du: i32, dv: i32| {
            let mut p = [0; 3];
            p[d] = self.plane;
            p[u] = self.u + du;
            p[v] = self.v + dv;
            Point3::from(p)
        };
        [
            corner(0, 0),
            corner(self.width, 0),
            corner(self.width, self.height),
            corner(0, self.height),
        ]
    }

    /// The six indices of this quad's two triangles, given the index of its first vertex.
    ///
    /// Back faces use the reversed winding so that every triangle faces along the normal.
    pub fn indices(&self, first_vertex: u32) -> [u32; 6] {
        let [a, b, c, d] = [
            first_vertex,
            first_vertex + 1,
            first_vertex + 2,
            first_vertex + 3,
        ];
        if self.side.is_positive() {
            [a, b, c, a, c, d]
        } else {
            [a, c, b, a, d, c]
        }
    }

    /// Expands this quad into the unit faces it covers.
    pub fn unit_faces(&self) -> impl Iterator<Item = FaceDescriptor> + '_ {
        let d = self.side.axis().index();
        let (u, v) = self.side.axis().plane_axes();
        let voxel_plane = if self.side.is_positive() {
            self.plane - 1
        } else {
            self.plane
        };
        (0..self.height).flat_map(move |dv| {
            (0..self.width).map(move |du| {
                let mut voxel = [0; 3];
                voxel[d] = voxel_plane;
                voxel[u] = self.u + du;
                voxel[v] = self.v + dv;
                FaceDescriptor {
                    voxel,
                    axis: d,
                    positive: self.side.is_positive(),
                    block_id: self.block_id,
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    #[test]
    fn unit_quad_expands_to_its_own_voxel() {
        let voxel = Point3::new(2, 5, 1);
        for side in BlockSide::all() {
            let quad = Quad::unit(voxel, side, 3);
            let faces: Vec<_> = quad.unit_faces().collect();
            assert_eq!(faces.len(), 1);
            assert_eq!(faces[0].voxel, [2, 5, 1]);
            assert_eq!(faces[0].axis, side.axis().index());
            assert_eq!(faces[0].positive, side.is_positive());
        }
    }

    #[test]
    fn triangles_face_along_the_normal() {
        for side in BlockSide::all() {
            let quad = Quad {
                side,
                plane: 1,
                u: 0,
                v: 0,
                width: 2,
                height: 3,
                block_id: 1,
            };
            let corners = quad.corners();
            let normal = side.normal().cast::<f32>().unwrap();
            for triangle in quad.indices(0).chunks(3) {
                let [a, b, c] = [
                    corners[triangle[0] as usize].cast::<f32>().unwrap(),
                    corners[triangle[1] as usize].cast::<f32>().unwrap(),
                    corners[triangle[2] as usize].cast::<f32>().unwrap(),
                ];
                let facing: Vector3<f32> = (b - a).cross(c - a);
                assert!(facing.dot(normal) > 0.0, "{:?} triangle is wound backwards", side);
            }
        }
    }
}
