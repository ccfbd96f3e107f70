//! # Block Side Module
//!
//! This module defines the principal axes of the voxel grid and the six faces of
//! a voxel block. Meshing works per axis; a face is an axis plus a direction.

use cgmath::Vector3;

/// One of the three principal axes of the grid.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Axis {
    /// The X axis, across a chunk.
    X = 0,
    /// The Y axis, world height.
    Y = 1,
    /// The Z axis, across a chunk.
    Z = 2,
}

impl Axis {
    /// All three axes in sweep order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis into `[x, y, z]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The two axes spanning the plane perpendicular to this one, as `(u, v)`.
    ///
    /// The pair is cyclic so that `u × v` points along `+self`.
    #[inline]
    pub fn plane_axes(self) -> (usize, usize) {
        let d = self.index();
        ((d + 1) % 3, (d + 2) % 3)
    }
}

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The side whose normal is `axis`, pointing along `+axis` when `positive`.
    pub fn from_axis(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => BlockSide::RIGHT,
            (Axis::X, false) => BlockSide::LEFT,
            (Axis::Y, true) => BlockSide::TOP,
            (Axis::Y, false) => BlockSide::BOTTOM,
            (Axis::Z, true) => BlockSide::FRONT,
            (Axis::Z, false) => BlockSide::BACK,
        }
    }

    /// The axis this face is perpendicular to.
    pub fn axis(self) -> Axis {
        match self {
            BlockSide::LEFT | BlockSide::RIGHT => Axis::X,
            BlockSide::BOTTOM | BlockSide::TOP => Axis::Y,
            BlockSide::FRONT | BlockSide::BACK => Axis::Z,
        }
    }

    /// Whether the face normal points along the positive direction of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, BlockSide::FRONT | BlockSide::TOP | BlockSide::RIGHT)
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<i32> {
        let sign = if self.is_positive() { 1 } else { -1 };
        let mut normal = [0; 3];
        normal[self.axis().index()] = sign;
        Vector3::from(normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_axes_are_right_handed() {
        for axis in Axis::ALL {
            let (u, v) = axis.plane_axes();
            let mut eu = [0; 3];
            let mut ev = [0; 3];
            eu[u] = 1;
            ev[v] = 1;
            let cross = Vector3::from(eu).cross(Vector3::from(ev));
            assert_eq!(cross, BlockSide::from_axis(axis, true).normal());
        }
    }

    #[test]
    fn sides_round_trip_through_axis_and_sign() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_axis(side.axis(), side.is_positive()), side);
        }
    }
}
