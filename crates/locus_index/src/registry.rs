//! A `TreeRegistry` keeps one `HashTree` per group of elements, e.g. one per canvas of a UI, and batches changes between
//! queries.
//!
//! Elements are not inserted immediately. `add_target` and `remove_target` only record the change, and the next `flush`
//! (which every query does first) asks a `CornerProvider` for the current world-space corners of each added element. Adding and
//! then removing the same element before a flush cancels out.

use crate::{BoundTest, ElementKey, HashTree, HashTreeConfig, SmallKeyHashMap, SmallKeyHashSet};

use auto_impl::auto_impl;
use locus_core::prelude::*;

/// Supplies the world-space corners of elements when they are flushed into a tree.
#[auto_impl(&, &mut, Box)]
pub trait CornerProvider<N, K, P> {
    /// Returns `None` if `element` should not be indexed right now.
    fn world_corners(&self, element: &K) -> Option<(Vec<PointN<N>>, P)>;
}

/// Like `ElementVisitor`, but also told which group's tree the element was found in.
pub trait GroupElementVisitor<G, K, P> {
    fn visit_group_element(&mut self, group: &G, element: &K, payload: &P);
}

impl<G, K, P, F> GroupElementVisitor<G, K, P> for F
where
    F: FnMut(&G, &K, &P),
{
    #[inline]
    fn visit_group_element(&mut self, group: &G, element: &K, payload: &P) {
        (self)(group, element, payload)
    }
}

/// One `HashTree` per live group `G`, with pending additions and removals.
pub struct TreeRegistry<G, N, K, P = ()> {
    config: HashTreeConfig,
    trees: SmallKeyHashMap<G, HashTree<N, K, P>>,
    pending_adds: SmallKeyHashMap<G, SmallKeyHashSet<K>>,
    pending_removes: SmallKeyHashMap<G, SmallKeyHashSet<K>>,
    dirty: bool,
}

impl<G, N, K, P> TreeRegistry<G, N, K, P>
where
    G: ElementKey,
    PointN<N>: TreePoint,
    K: ElementKey,
{
    /// Every tree created by this registry uses `config`.
    pub fn new(config: HashTreeConfig) -> Self {
        Self {
            config,
            trees: SmallKeyHashMap::default(),
            pending_adds: SmallKeyHashMap::default(),
            pending_removes: SmallKeyHashMap::default(),
            dirty: false,
        }
    }

    /// Schedules `element` to be (re)inserted into the tree of `group`. Cancels a pending removal.
    pub fn add_target(&mut self, group: G, element: K) {
        if let Some(removes) = self.pending_removes.get_mut(&group) {
            removes.remove(&element);
        }
        self.pending_adds.entry(group).or_default().insert(element);
        self.dirty = true;
    }

    /// Schedules `element` to be removed from the tree of `group`. Cancels a pending addition.
    pub fn remove_target(&mut self, group: G, element: K) {
        if let Some(adds) = self.pending_adds.get_mut(&group) {
            adds.remove(&element);
        }
        self.pending_removes.entry(group).or_default().insert(element);
        self.dirty = true;
    }

    /// Drops the tree and all pending changes of `group`.
    pub fn remove_group(&mut self, group: &G) {
        self.trees.remove(group);
        self.pending_adds.remove(group);
        self.pending_removes.remove(group);
    }

    /// Applies all pending changes. Trees that end up empty, and everything belonging to expired groups, are dropped.
    pub fn flush(&mut self, provider: &impl CornerProvider<N, K, P>) {
        if !self.dirty {
            return;
        }

        let config = self.config;
        #[cfg(feature = "tracing")]
        let (mut num_added, mut num_removed) = (0, 0);

        for (group, mut elements) in self.pending_adds.drain() {
            if !group.is_alive() {
                continue;
            }
            let tree = self
                .trees
                .entry(group)
                .or_insert_with(|| HashTree::new(config));
            for element in elements.drain() {
                if let Some((corners, payload)) = provider.world_corners(&element) {
                    tree.add_element(element, &corners, payload);
                    #[cfg(feature = "tracing")]
                    {
                        num_added += 1;
                    }
                }
            }
        }

        for (group, elements) in self.pending_removes.drain() {
            if let Some(tree) = self.trees.get_mut(&group) {
                for element in elements.iter() {
                    if tree.remove_element(element).is_some() {
                        #[cfg(feature = "tracing")]
                        {
                            num_removed += 1;
                        }
                    }
                }
            }
        }

        self.trees
            .retain(|group, tree| group.is_alive() && !tree.is_empty());
        self.dirty = false;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            added = num_added,
            removed = num_removed,
            trees = self.trees.len(),
            "flushed tree registry"
        );
    }

    /// Flushes, then runs `HashTree::find_elements` on the tree of every live group. The `visitor` also receives the group.
    pub fn find_elements(
        &mut self,
        provider: &impl CornerProvider<N, K, P>,
        bound_test: &mut impl BoundTest<N>,
        visitor: &mut impl GroupElementVisitor<G, K, P>,
    ) {
        self.flush(provider);

        for (group, tree) in self.trees.iter_mut() {
            if !group.is_alive() {
                continue;
            }
            tree.find_elements(bound_test, &mut |element: &K, payload: &P| {
                visitor.visit_group_element(group, element, payload)
            });
        }
    }

    #[inline]
    pub fn tree(&self, group: &G) -> Option<&HashTree<N, K, P>> {
        self.trees.get(group)
    }

    #[inline]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Returns `true` iff there are changes that haven't been flushed.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
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
    use crate::{AcceptAll, PointBoundTest, WeakRef};

    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct Layout {
        rects: HashMap<u32, [Point2f; 2]>,
    }

    impl CornerProvider<[f32; 2], u32, ()> for Layout {
        fn world_corners(&self, element: &u32) -> Option<(Vec<Point2f>, ())> {
            self.rects.get(element).map(|r| (r.to_vec(), ()))
        }
    }

    fn layout() -> Layout {
        let mut layout = Layout::default();
        layout.rects.insert(1, [PointN([0.0, 0.0]), PointN([100.0, 30.0])]);
        layout.rects.insert(2, [PointN([200.0, 0.0]), PointN([300.0, 30.0])]);

        layout
    }

    type Registry<G> = TreeRegistry<G, [f32; 2], u32>;

    fn find_all<G: ElementKey>(registry: &mut Registry<G>, layout: &Layout) -> Vec<(G, u32)> {
        let mut found = Vec::new();
        registry.find_elements(layout, &mut AcceptAll, &mut |group: &G, element: &u32, _: &()| {
            found.push((group.clone(), *element))
        });

        found
    }

    #[test]
    fn pending_add_then_remove_indexes_nothing() {
        let layout = layout();
        let mut registry = Registry::<u32>::new(HashTreeConfig::quadtree_default());

        registry.add_target(0, 1);
        registry.remove_target(0, 1);
        assert!(registry.is_dirty());

        assert_eq!(find_all(&mut registry, &layout), vec![]);
        assert!(!registry.is_dirty());
        assert_eq!(registry.num_trees(), 0);
    }

    #[test]
    fn flush_builds_one_tree_per_group() {
        let layout = layout();
        let mut registry = Registry::<u32>::new(HashTreeConfig::quadtree_default());

        registry.add_target(0, 1);
        registry.add_target(7, 2);
        // Unknown to the layout.
        registry.add_target(7, 3);
        registry.flush(&layout);

        assert_eq!(registry.num_trees(), 2);
        assert_eq!(registry.tree(&7).map(|t| t.num_elements()), Some(1));

        let mut found = Vec::new();
        registry.find_elements(
            &layout,
            &mut PointBoundTest::new(PointN([250.0, 15.0])),
            &mut |group: &u32, element: &u32, _: &()| found.push((*group, *element)),
        );
        assert_eq!(found, vec![(7, 2)]);
    }

    #[derive(Default)]
    struct CountPerGroup {
        counts: HashMap<u32, usize>,
    }

    impl GroupElementVisitor<u32, u32, ()> for CountPerGroup {
        fn visit_group_element(&mut self, group: &u32, _element: &u32, _payload: &()) {
            *self.counts.entry(*group).or_default() += 1;
        }
    }

    #[test]
    fn visitor_struct_receives_group_of_each_element() {
        let layout = layout();
        let mut registry = Registry::<u32>::new(HashTreeConfig::quadtree_default());
        registry.add_target(0, 1);
        registry.add_target(0, 2);
        registry.add_target(5, 2);

        let mut visitor = CountPerGroup::default();
        registry.find_elements(&layout, &mut AcceptAll, &mut visitor);

        assert_eq!(visitor.counts.get(&0), Some(&2));
        assert_eq!(visitor.counts.get(&5), Some(&1));
    }

    #[test]
    fn removing_last_element_drops_tree() {
        let layout = layout();
        let mut registry = Registry::<u32>::new(HashTreeConfig::quadtree_default());

        registry.add_target(0, 1);
        registry.flush(&layout);
        assert_eq!(registry.num_trees(), 1);

        registry.remove_target(0, 1);
        registry.flush(&layout);
        assert_eq!(registry.num_trees(), 0);
    }

    #[test]
    fn dead_groups_are_dropped() {
        let layout = layout();
        let mut registry = Registry::<WeakRef<()>>::new(HashTreeConfig::quadtree_default());

        let canvas1 = Rc::new(());
        let canvas2 = Rc::new(());
        registry.add_target(WeakRef::new(&canvas1), 1);
        registry.add_target(WeakRef::new(&canvas2), 2);
        registry.flush(&layout);
        assert_eq!(registry.num_trees(), 2);

        drop(canvas2);
        let found = find_all(&mut registry, &layout);
        assert_eq!(found, vec![(WeakRef::new(&canvas1), 1)]);

        // Any change triggers cleanup.
        registry.add_target(WeakRef::new(&canvas1), 2);
        registry.flush(&layout);
        assert_eq!(registry.num_trees(), 1);
        assert_eq!(
            registry.tree(&WeakRef::new(&canvas1)).map(|t| t.num_elements()),
            Some(2)
        );
    }
}
