//! Location codes identify the nodes of a hashed `2^D`-ary tree.
//!
//! A node at depth `d` whose path from the root is the Morton code `m` (`d * D` bits, `D` bits per level, root-most level in
//! the highest bits) has the location code `(1 << (d * D)) | m`. The leading marker bit encodes the depth, so codes of
//! different depths never collide. Walking toward the root is a right shift by `D`, and the root is the code `1`.
//!
//! ```
//! use locus_index::LocationCode;
//!
//! // Quadtree (D = 2), depth 2, path 0b01_10.
//! let code = LocationCode::new(2, 0b0110, 2);
//! assert_eq!(code, LocationCode(0b1_01_10));
//! assert_eq!(code.depth(2), 2);
//! assert_eq!(code.child_index(2), 0b10);
//! assert_eq!(code.parent(2), Some(LocationCode(0b1_01)));
//! assert_eq!(LocationCode::ROOT.parent(2), None);
//! ```

use std::fmt;

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LocationCode(pub u32);

impl LocationCode {
    /// The depth-0 node. Also the fallback bucket for elements that can't be placed precisely.
    pub const ROOT: Self = Self(1);

    /// Prefixes the `depth * dim` bits of `morton` with the depth marker bit. Higher bits of `morton` are discarded.
    #[inline]
    pub fn new(depth: u32, morton: u32, dim: u32) -> Self {
        let marker = 1 << (depth * dim);
        debug_assert!(depth * dim < 32);

        Self(marker | (morton & (marker - 1)))
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    #[inline]
    pub fn depth(self, dim: u32) -> u32 {
        debug_assert!(self.0 != 0);

        (31 - self.0.leading_zeros()) / dim
    }

    /// The path from the root with the marker bit removed.
    #[inline]
    pub fn morton(self, dim: u32) -> u32 {
        self.0 & !(1 << (self.depth(dim) * dim))
    }

    /// Returns `None` for the root.
    #[inline]
    pub fn parent(self, dim: u32) -> Option<Self> {
        if self.0 > 1 {
            Some(Self(self.0 >> dim))
        } else {
            None
        }
    }

    #[inline]
    pub fn child(self, child_index: u32, dim: u32) -> Self {
        debug_assert!(child_index < 1 << dim);

        Self((self.0 << dim) | child_index)
    }

    /// The index of this node among its siblings, i.e. its bit in the parent's child bitmask.
    #[inline]
    pub fn child_index(self, dim: u32) -> u32 {
        self.0 & ((1 << dim) - 1)
    }
}

impl Default for LocationCode {
    #[inline]
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Debug for LocationCode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} = {:b}", self.0, self.0)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn root_is_depth_zero() {
        assert_eq!(LocationCode::new(0, 0, 2), LocationCode::ROOT);
        assert_eq!(LocationCode::new(0, 0b111, 3), LocationCode::ROOT);
        assert_eq!(LocationCode::ROOT.depth(3), 0);
        assert!(LocationCode::default().is_root());
    }

    #[test]
    fn codes_of_different_depths_never_collide() {
        let shallow = LocationCode::new(1, 0, 3);
        let deep = LocationCode::new(2, 0, 3);

        assert_ne!(shallow, deep);
        assert_eq!(shallow.morton(3), deep.morton(3));
        assert_eq!(deep.parent(3), Some(shallow));
    }

    #[test]
    fn parent_and_child_are_inverses() {
        let code = LocationCode::new(10, (1 << 30) - 1, 3);
        assert_eq!(code.depth(3), 10);
        assert_eq!(code.morton(3), (1 << 30) - 1);

        for i in 0..8 {
            let child = LocationCode::new(3, 0b101_011_000, 3).child(i, 3);
            assert_eq!(child.child_index(3), i);
            assert_eq!(child.depth(3), 4);
            assert_eq!(child.parent(3), Some(LocationCode::new(3, 0b101_011_000, 3)));
        }
    }

    #[test]
    fn walking_up_ends_at_root() {
        let mut code = LocationCode::new(15, 0x1234_5678, 2);
        let mut steps = 0;
        while let Some(parent) = code.parent(2) {
            code = parent;
            steps += 1;
        }

        assert_eq!(steps, 15);
        assert_eq!(code, LocationCode::ROOT);
    }
}
