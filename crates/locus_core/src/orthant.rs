//! Dimension-generic geometry of `2^D`-ary trees.
//!
//! A node of a quadtree (D = 2) or octree (D = 3) is split into `2^D` orthants. Child `i` of a node lies on the positive side
//! of axis `k` iff bit `k` of `i` is set. The same convention numbers the corners of a box and orders the bits of Morton
//! codes, so a child index is always the lowest `D` bits of the child's Morton code.

use crate::{point::point_traits::*, ExtentN, Morton2, Morton3, Point2f, Point3f, PointN};

use std::fmt::Debug;

/// A point type that can address cells of a `2^D`-ary tree.
pub trait TreePoint:
    Point<Scalar = f32> + LatticeOrder + MinMaxComponent<Scalar = f32> + Debug
{
    /// The number of axes, D.
    const DIM: u32;

    /// `2^D`
    const NUM_CHILDREN: u32;

    /// The deepest level whose location code still fits in 31 bits.
    const MAX_DEPTH: u32;

    /// The Morton code of the cell with edge length `cell_edge` that contains this (non-negative) grid point.
    fn cell_morton(&self, cell_edge: f32) -> u32;

    /// The unit direction from a node's center toward the center of child `child`. Component `k` is `+1` if bit `k` of
    /// `child` is set, else `-1`.
    fn orthant_direction(child: u32) -> Self;

    /// Corner `corner` of the box `[min, max]`. Component `k` comes from `max` if bit `k` of `corner` is set, else from `min`.
    fn box_corner(min: Self, max: Self, corner: u32) -> Self;
}

#[inline]
fn bit_sign(i: u32, k: u32) -> f32 {
    if i & (1 << k) != 0 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
fn bit_select(i: u32, k: u32, min: f32, max: f32) -> f32 {
    if i & (1 << k) != 0 {
        max
    } else {
        min
    }
}

impl TreePoint for Point2f {
    const DIM: u32 = 2;
    const NUM_CHILDREN: u32 = 4;
    const MAX_DEPTH: u32 = 31 / Self::DIM;

    #[inline]
    fn cell_morton(&self, cell_edge: f32) -> u32 {
        Morton2::encode((self.x() / cell_edge) as u32, (self.y() / cell_edge) as u32).0
    }

    #[inline]
    fn orthant_direction(child: u32) -> Self {
        PointN([bit_sign(child, 0), bit_sign(child, 1)])
    }

    #[inline]
    fn box_corner(min: Self, max: Self, corner: u32) -> Self {
        PointN([
            bit_select(corner, 0, min.x(), max.x()),
            bit_select(corner, 1, min.y(), max.y()),
        ])
    }
}

impl TreePoint for Point3f {
    const DIM: u32 = 3;
    const NUM_CHILDREN: u32 = 8;
    const MAX_DEPTH: u32 = 31 / Self::DIM;

    #[inline]
    fn cell_morton(&self, cell_edge: f32) -> u32 {
        Morton3::encode(
            (self.x() / cell_edge) as u32,
            (self.y() / cell_edge) as u32,
            (self.z() / cell_edge) as u32,
        )
        .0
    }

    #[inline]
    fn orthant_direction(child: u32) -> Self {
        PointN([bit_sign(child, 0), bit_sign(child, 1), bit_sign(child, 2)])
    }

    #[inline]
    fn box_corner(min: Self, max: Self, corner: u32) -> Self {
        PointN([
            bit_select(corner, 0, min.x(), max.x()),
            bit_select(corner, 1, min.y(), max.y()),
            bit_select(corner, 2, min.z(), max.z()),
        ])
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: TreePoint,
{
    /// All `2^D` corners of the extent, numbered like child orthants.
    pub fn corners(&self) -> impl Iterator<Item = PointN<N>> {
        let min = self.minimum;
        let max = self.max();

        (0..PointN::<N>::NUM_CHILDREN).map(move |i| PointN::box_corner(min, max, i))
    }

    /// The extent of orthant `child` when this extent is split in half on every axis.
    pub fn orthant(&self, child: u32) -> Self {
        let half = self.half_extent();
        let child_half = half * 0.5;

        Self::from_center_and_half_extent(
            self.center() + child_half * PointN::orthant_direction(child),
            child_half,
        )
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
