//! The `HashTree` is a dynamic quadtree or octree of world-positioned rectangles and boxes. Often referred to as a "hashed
//! tree" because nodes are not linked by pointers. Instead every node is an entry in a hash map keyed by its
//! `LocationCode`, and the structure is implied by the codes plus a child bitmask per node.
//!
//! Each element lives in exactly one node: the deepest node whose cell contains every corner of the element's bounds. Nodes
//! are created lazily along with any missing ancestors, and they are removed as soon as they hold no elements and have no
//! children, so the tree never contains empty leaves.
//!
//! Elements whose bounds can't be placed in the indexed region (out of range, too large, or not finite) go to the root node,
//! which every query visits.
//!
//! # Example
//!
//! ```
//! use locus_core::prelude::*;
//! use locus_index::prelude::*;
//!
//! let mut tree = HashQuadTree::<u32>::new(HashTreeConfig::quadtree_default());
//!
//! let button = [PointN([10.0, 10.0]), PointN([90.0, 40.0])];
//! let code = tree.add_element(1, &button, ());
//! assert!(!code.is_root());
//!
//! // Far away from the button.
//! let mut query = ExtentBoundTest::new(Extent2f::from_min_and_max(PointN([500.0; 2]), PointN([600.0; 2])));
//! let mut found = Vec::new();
//! tree.find_elements(&mut query, &mut |element: &u32, _: &()| found.push(*element));
//! assert!(found.is_empty());
//!
//! // Overlapping the button.
//! let mut query = PointBoundTest::new(PointN([50.0, 20.0]));
//! tree.find_elements(&mut query, &mut |element: &u32, _: &()| found.push(*element));
//! assert_eq!(found, vec![1]);
//! ```

use crate::{
    query::{ray_intersects_quad, RayBoundTest},
    BoundTest, ConfigError, ElementKey, ElementVisitor, GridTransform, HashTreeConfig,
    LocationCode, QuadCorners, SmallKeyHashMap,
};

use locus_core::prelude::*;

use itertools::Itertools;
use smallvec::SmallVec;
use std::marker::PhantomData;

/// A hashed quadtree. Elements carry no payload.
pub type HashQuadTree<K> = HashTree<[f32; 2], K, ()>;

/// A hashed octree of rectangles in 3D space. Each element caches its four world-space corners for precise ray casts.
pub type HashOctree<K> = HashTree<[f32; 3], K, QuadCorners>;

/// A node of a `HashTree`.
#[derive(Clone, Debug)]
pub struct TreeNode<K, P> {
    elements: SmallKeyHashMap<K, P>,
    child_bitmask: u8,
}

impl<K, P> TreeNode<K, P> {
    fn new() -> Self {
        Self {
            elements: SmallKeyHashMap::default(),
            child_bitmask: 0,
        }
    }

    #[inline]
    pub fn elements(&self) -> &SmallKeyHashMap<K, P> {
        &self.elements
    }

    /// Bit `i` is set iff child `i` exists.
    #[inline]
    pub fn child_bitmask(&self) -> u8 {
        self.child_bitmask
    }

    /// A node with no elements and no children must not stay in the tree.
    #[inline]
    fn is_superfluous(&self) -> bool {
        self.elements.is_empty() && self.child_bitmask == 0
    }
}

/// A dynamic `2^D`-ary spatial tree over points of type `PointN<N>`, indexing elements of type `K` with payloads of type `P`.
#[derive(Clone, Debug)]
pub struct HashTree<N, K, P = ()> {
    config: HashTreeConfig,
    grid: GridTransform,
    nodes: SmallKeyHashMap<LocationCode, TreeNode<K, P>>,
    element_codes: SmallKeyHashMap<K, LocationCode>,
    marker: PhantomData<N>,
}

impl<N, K, P> HashTree<N, K, P>
where
    PointN<N>: TreePoint,
    K: ElementKey,
{
    /// Edge lengths of the cells at each layer, in units of the finest cell. Layer 0 is the deepest level of the tree.
    pub const DEPTH_CELL_SIZES: [u32; 16] = [
        1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    ];

    const DIM: u32 = <PointN<N> as TreePoint>::DIM;

    /// Constructs an empty tree. Parameters of `config` that are out of range are clamped.
    pub fn new(config: HashTreeConfig) -> Self {
        Self {
            config,
            grid: GridTransform::new::<N>(&config),
            nodes: SmallKeyHashMap::default(),
            element_codes: SmallKeyHashMap::default(),
            marker: PhantomData,
        }
    }

    /// Like `new`, but fails instead of clamping invalid parameters.
    pub fn try_new(config: HashTreeConfig) -> Result<Self, ConfigError> {
        config.validate::<N>()?;

        Ok(Self::new(config))
    }

    /// Removes every element and starts over with `config`.
    pub fn reset(&mut self, config: HashTreeConfig) {
        self.clear();
        self.config = config;
        self.grid = GridTransform::new::<N>(&config);
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.element_codes.clear();
    }

    #[inline]
    pub fn config(&self) -> &HashTreeConfig {
        &self.config
    }

    /// The depth of the finest cells, after clamping the configured number of layers.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.grid.max_depth()
    }

    /// The world-space extent covered by the root cell.
    #[inline]
    pub fn root_extent(&self) -> ExtentN<N> {
        self.grid.root_extent()
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.element_codes.len()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.element_codes.is_empty()
    }

    #[inline]
    pub fn contains_element(&self, element: &K) -> bool {
        self.element_codes.contains_key(element)
    }

    /// The code of the node that holds `element`.
    #[inline]
    pub fn location_of(&self, element: &K) -> Option<LocationCode> {
        self.element_codes.get(element).cloned()
    }

    /// Returns `None` if there is no node at `code`.
    #[inline]
    pub fn child_bitmask(&self, code: LocationCode) -> Option<u8> {
        self.nodes.get(&code).map(|node| node.child_bitmask)
    }

    #[inline]
    pub fn node(&self, code: LocationCode) -> Option<&TreeNode<K, P>> {
        self.nodes.get(&code)
    }

    /// The world-space extent of the cell at `code`.
    pub fn cell_extent(&self, code: LocationCode) -> ExtentN<N> {
        let mut cell = self.root_extent();
        let depth = code.depth(Self::DIM);
        for level in (0..depth).rev() {
            let child = (code.0 >> (level * Self::DIM)) & ((1 << Self::DIM) - 1);
            cell = cell.orthant(child);
        }

        cell
    }

    /// Returns the code of the node where an element with the given world-space corners would be stored.
    pub fn locate(&self, world_corners: &[PointN<N>]) -> LocationCode {
        if !world_corners
            .iter()
            .all(|c| c.all_components(f32::is_finite))
        {
            return LocationCode::ROOT;
        }
        let bound = match bounding_extent(world_corners.iter().cloned()) {
            Some(b) => b,
            None => return LocationCode::ROOT,
        };

        let min = bound.minimum;
        let max = bound.max();
        let grid_corners: SmallVec<[PointN<N>; 8]> = (0..PointN::<N>::NUM_CHILDREN)
            .map(|i| self.grid.world_to_grid(PointN::box_corner(min, max, i)))
            .collect();
        if !grid_corners.iter().all(|&c| self.grid.grid_contains(c)) {
            return LocationCode::ROOT;
        }

        let max_depth = self.grid.max_depth();
        let cell_extent = (bound.shape.max_component() / self.grid.cell_size()).ceil();
        let layer = (Self::DEPTH_CELL_SIZES.partition_point(|&s| (s as f32) < cell_extent) as u32)
            .min(max_depth);
        let mut depth = max_depth - layer;

        let cell_edge = Self::DEPTH_CELL_SIZES[layer as usize] as f32;
        let mut codes: SmallVec<[u32; 8]> = grid_corners
            .iter()
            .map(|c| c.cell_morton(cell_edge))
            .collect();

        // Walk up until every corner lies in the same cell.
        while depth > 0 && !codes.iter().all_equal() {
            for code in codes.iter_mut() {
                *code >>= Self::DIM;
            }
            depth -= 1;
        }

        LocationCode::new(depth, codes[0], Self::DIM)
    }

    /// Inserts `element` into the node whose cell fits the bounds of `world_corners`, or moves it there if it was already in
    /// the tree. The cached `payload` is always replaced.
    ///
    /// Any number of corners is accepted. Returns the code of the node that holds the element.
    pub fn add_element(&mut self, element: K, world_corners: &[PointN<N>], payload: P) -> LocationCode {
        let code = self.locate(world_corners);

        #[cfg(feature = "tracing")]
        {
            if code.is_root() {
                tracing::trace!("element bounds can't be placed precisely; using the root node");
            } else {
                tracing::trace!(code = ?code, depth = code.depth(Self::DIM), "placing element");
            }
        }

        self.add_node(element, code, payload);

        code
    }

    fn add_node(&mut self, element: K, code: LocationCode, payload: P) {
        if let Some(old_code) = self.element_codes.get(&element).cloned() {
            if old_code == code {
                if let Some(node) = self.nodes.get_mut(&code) {
                    node.elements.insert(element, payload);
                    return;
                }
                debug_assert!(false, "element maps to missing node {:?}", code);
            } else {
                self.remove_from_node(&element, old_code);
            }
        }

        self.nodes
            .entry(code)
            .or_insert_with(TreeNode::new)
            .elements
            .insert(element.clone(), payload);
        self.element_codes.insert(element, code);
        self.add_parent_node(code);
    }

    /// Sets the bit for `code` in its parent, creating ancestors until one already exists.
    fn add_parent_node(&mut self, mut code: LocationCode) {
        while let Some(parent) = code.parent(Self::DIM) {
            let bit = 1 << code.child_index(Self::DIM);
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.child_bitmask |= bit;
                return;
            }

            let mut parent_node = TreeNode::new();
            parent_node.child_bitmask = bit;
            self.nodes.insert(parent, parent_node);
            code = parent;
        }
    }

    /// Removes `element` from the tree, returning its payload if it was present.
    pub fn remove_element(&mut self, element: &K) -> Option<P> {
        let code = self.element_codes.remove(element)?;

        self.remove_from_node(element, code)
    }

    fn remove_from_node(&mut self, element: &K, code: LocationCode) -> Option<P> {
        let node = self.nodes.get_mut(&code)?;
        let payload = node.elements.remove(element);
        if node.is_superfluous() {
            self.remove_node(code);
        }

        payload
    }

    /// Removes the node at `code` and every ancestor that is left superfluous.
    fn remove_node(&mut self, mut code: LocationCode) {
        loop {
            self.nodes.remove(&code);

            let parent = match code.parent(Self::DIM) {
                Some(p) => p,
                None => return,
            };
            let parent_node = match self.nodes.get_mut(&parent) {
                Some(n) => n,
                None => return,
            };
            parent_node.child_bitmask &= !(1 << code.child_index(Self::DIM));
            if !parent_node.is_superfluous() {
                return;
            }
            code = parent;
        }
    }

    /// Visits every live element of the root and of every node whose cell passes `bound_test`. A child is only tested if its
    /// parent was visited.
    ///
    /// Expired elements found along the way are removed from the tree.
    pub fn find_elements(
        &mut self,
        bound_test: &mut impl BoundTest<N>,
        visitor: &mut impl ElementVisitor<K, P>,
    ) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("find_elements").entered();

        let root = self.root_extent();
        self.visit_node(
            LocationCode::ROOT,
            root.center(),
            root.half_extent(),
            bound_test,
            visitor,
        );
    }

    fn visit_node(
        &mut self,
        code: LocationCode,
        center: PointN<N>,
        half_extent: PointN<N>,
        bound_test: &mut impl BoundTest<N>,
        visitor: &mut impl ElementVisitor<K, P>,
    ) {
        let node = match self.nodes.get(&code) {
            Some(n) => n,
            None => return,
        };

        let mut expired: SmallVec<[K; 4]> = SmallVec::new();
        for (element, payload) in node.elements.iter() {
            if element.is_alive() {
                visitor.visit_element(element, payload);
            } else {
                expired.push(element.clone());
            }
        }
        let child_bitmask = node.child_bitmask;

        if !expired.is_empty() {
            self.remove_expired(code, &expired);
        }

        let child_half_extent = half_extent * 0.5;
        for child in 0..PointN::<N>::NUM_CHILDREN {
            if child_bitmask & (1 << child) == 0 {
                continue;
            }
            let child_center = center + child_half_extent * PointN::orthant_direction(child);
            if bound_test.test_bound(child_center, child_half_extent) {
                self.visit_node(
                    code.child(child, Self::DIM),
                    child_center,
                    child_half_extent,
                    bound_test,
                    visitor,
                );
            }
        }
    }

    fn remove_expired(&mut self, code: LocationCode, expired: &[K]) {
        #[cfg(feature = "tracing")]
        tracing::trace!(code = ?code, count = expired.len(), "removing expired elements");

        let node = match self.nodes.get_mut(&code) {
            Some(n) => n,
            None => return,
        };
        for element in expired.iter() {
            node.elements.remove(element);
            self.element_codes.remove(element);
        }
        if node.is_superfluous() {
            self.remove_node(code);
        }
    }
}

impl<K> HashTree<[f32; 3], K, QuadCorners>
where
    K: ElementKey,
{
    /// Inserts a rectangle in 3D space, given its four corners in winding order. The corners are cached for `raycast`.
    pub fn add_rect(&mut self, element: K, corners: QuadCorners) -> LocationCode {
        self.add_element(element, &corners, corners)
    }

    /// Visits every live rectangle hit by `ray`, along with the ray parameter of the hit.
    pub fn raycast(&mut self, ray: &Ray3, mut visitor: impl FnMut(&K, f32)) {
        let mut bound_test = RayBoundTest::new(ray);
        self.find_elements(&mut bound_test, &mut |element: &K, corners: &QuadCorners| {
            if let Some(t) = ray_intersects_quad(ray, corners) {
                visitor(element, t);
            }
        });
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
