//! Hashed quadtrees and octrees for finding the world-positioned rectangles and boxes that may intersect a query, e.g. for UI
//! hit-testing and culling, without rebuilding a tree every frame.
//!
//! This library is organized into a couple of crates:
//! - **core**: point, extent, and ray types, plus Morton codes and the geometry of tree cells
//! - **index**: the `HashTree` itself, its element keys and bound tests, and the batching `TreeRegistry`
//!
//! ```
//! use locus::prelude::*;
//!
//! let mut tree = HashOctree::<u32>::new(HashTreeConfig::octree_default());
//! tree.add_rect(
//!     1,
//!     [
//!         PointN([0.0, 0.0, 0.0]),
//!         PointN([100.0, 0.0, 0.0]),
//!         PointN([100.0, 50.0, 0.0]),
//!         PointN([0.0, 50.0, 0.0]),
//!     ],
//! );
//!
//! let ray = Ray3::new(PointN([10.0, 10.0, 100.0]), PointN([0.0, 0.0, -1.0]));
//! let mut hits = Vec::new();
//! tree.raycast(&ray, |element, _t| hits.push(*element));
//! assert_eq!(hits, vec![1]);
//! ```

pub use locus_core as core;
pub use locus_index as index;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::index::prelude::*;
}
