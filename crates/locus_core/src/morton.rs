use morton_encoding::{morton_decode, morton_encode};
use std::fmt;

// ██████╗ ██████╗
// ╚════██╗██╔══██╗
//  █████╔╝██║  ██║
// ██╔═══╝ ██║  ██║
// ███████╗██████╔╝
// ╚══════╝╚═════╝

/// A Morton-encoded pair of unsigned grid coordinates. Each coordinate keeps its lowest `MAX_BITS` bits, so the code always
/// fits in a `u32`. Bit `b` of coordinate `k` (X = 0, Y = 1) lands at position `2 * b + k`.
///
/// <https://en.wikipedia.org/wiki/Z-order_curve>
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Morton2(pub u32);

impl Morton2 {
    pub const MAX_BITS: u32 = 16;
    const MASK: u32 = (1 << Self::MAX_BITS) - 1;

    #[inline]
    pub fn encode(x: u32, y: u32) -> Self {
        Self(morton_encode([y & Self::MASK, x & Self::MASK]) as u32)
    }

    /// Returns the `[x, y]` coordinates.
    #[inline]
    pub fn decode(self) -> [u32; 2] {
        let yx: [u32; 2] = morton_decode(self.0 as u64);

        [yx[1], yx[0]]
    }
}

impl fmt::Debug for Morton2 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} = {:b}", self.0, self.0)
    }
}

impl From<[u32; 2]> for Morton2 {
    #[inline]
    fn from(xy: [u32; 2]) -> Self {
        Self::encode(xy[0], xy[1])
    }
}

impl From<Morton2> for [u32; 2] {
    #[inline]
    fn from(m: Morton2) -> Self {
        m.decode()
    }
}

// ██████╗ ██████╗
// ╚════██╗██╔══██╗
//  █████╔╝██║  ██║
//  ╚═══██╗██║  ██║
// ██████╔╝██████╔╝
// ╚═════╝ ╚═════╝

/// A Morton-encoded triple of unsigned grid coordinates. Each coordinate keeps its lowest `MAX_BITS` bits, so the code always
/// fits in a `u32`. Bit `b` of coordinate `k` (X = 0, Y = 1, Z = 2) lands at position `3 * b + k`.
///
/// <https://en.wikipedia.org/wiki/Z-order_curve>
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Morton3(pub u32);

impl Morton3 {
    pub const MAX_BITS: u32 = 10;
    const MASK: u32 = (1 << Self::MAX_BITS) - 1;

    #[inline]
    pub fn encode(x: u32, y: u32, z: u32) -> Self {
        Self(morton_encode([z & Self::MASK, y & Self::MASK, x & Self::MASK]) as u32)
    }

    /// Returns the `[x, y, z]` coordinates.
    #[inline]
    pub fn decode(self) -> [u32; 3] {
        let zyx: [u32; 3] = morton_decode(self.0 as u128);

        [zyx[2], zyx[1], zyx[0]]
    }
}

impl fmt::Debug for Morton3 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} = {:b}", self.0, self.0)
    }
}

impl From<[u32; 3]> for Morton3 {
    #[inline]
    fn from(xyz: [u32; 3]) -> Self {
        Self::encode(xyz[0], xyz[1], xyz[2])
    }
}

impl From<Morton3> for [u32; 3] {
    #[inline]
    fn from(m: Morton3) -> Self {
        m.decode()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
