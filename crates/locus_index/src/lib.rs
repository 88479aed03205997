//! Hashed quadtrees and octrees for finding the world-positioned rectangles and boxes that may intersect a query volume.
//!
//! The core type is the `HashTree`, with the aliases:
//!   - `HashQuadTree`: 2D, elements carry no payload
//!   - `HashOctree`: 3D, elements cache the corners of a rectangle for precise ray casts
//!
//! Nodes are stored in a hash map keyed by `LocationCode`, so inserting, moving, and removing an element only touches the nodes
//! on one root-to-leaf path. Queries are driven by a `BoundTest` that prunes cells and an `ElementVisitor` that receives the
//! candidates. Some ready-made bound tests live in the `query` module.
//!
//! Elements are identified by any `ElementKey`. Weak references (`WeakRef` and `SyncWeakRef`) let the tree outlive the objects
//! it indexes; expired elements are dropped lazily during queries.
//!
//! For many trees that share a configuration and receive batched updates, there is the `TreeRegistry`.

pub mod config;
pub mod element;
pub mod hash_tree;
pub mod location_code;
pub mod query;
pub mod registry;

pub use config::{ConfigError, GridTransform, HashTreeConfig};
pub use element::{ElementKey, SyncWeakRef, WeakRef};
pub use hash_tree::{HashOctree, HashQuadTree, HashTree, TreeNode};
pub use location_code::LocationCode;
pub use query::{
    ray_intersects_quad, ray_intersects_triangle, AcceptAll, BoundTest, ElementVisitor,
    ExtentBoundTest, PointBoundTest, QuadCorners, RayBoundTest,
};
pub use registry::{CornerProvider, GroupElementVisitor, TreeRegistry};

// Hash types to use for small keys like `LocationCode`.
pub type SmallKeyHashMap<K, V> = ahash::AHashMap<K, V>;
pub type SmallKeyHashSet<K> = ahash::AHashSet<K>;

pub mod prelude {
    pub use super::{
        ray_intersects_quad, AcceptAll, BoundTest, ConfigError, CornerProvider, ElementKey,
        ElementVisitor, ExtentBoundTest, GroupElementVisitor, HashOctree, HashQuadTree, HashTree,
        HashTreeConfig, LocationCode, PointBoundTest, QuadCorners, RayBoundTest, SyncWeakRef,
        TreeRegistry, WeakRef,
    };
}
