use core::cmp::Ordering;

use super::arena::Handle;
use super::node::SearchResult;
use super::raw_tree::RawTree;
use crate::compare::Comparator;

impl<K, C: Comparator<K>> RawTree<K, C> {
    /// Inserts into a non-empty tree, splitting every full node met on the way
    /// down before descending into it.
    ///
    /// A read-only search runs first so that a duplicate never triggers a
    /// preemptive split.
    pub(super) fn insert_top_down(&mut self, key: K) -> bool {
        let Some(mut root) = self.root else {
            unreachable!("`RawTree::insert_top_down()` - empty tree");
        };
        if self.contains(&key) {
            return false;
        }

        if self.nodes.get(root).key_count() == self.order.max_keys() {
            let (median, sibling) = self.split_node(root);
            root = self.grow_root(root, median, sibling);
        }

        self.insert_non_full(root, key);
        self.len += 1;
        true
    }

    /// Places `key` in the subtree rooted at `current`, which has room for
    /// one more key.
    fn insert_non_full(&mut self, mut current: Handle, key: K) {
        loop {
            let node = self.nodes.get(current);
            debug_assert!(
                node.key_count() < self.order.max_keys(),
                "`RawTree::insert_non_full()` - descended into a full node"
            );
            let mut idx = match node.search(&key, &self.cmp) {
                SearchResult::NotFound(idx) => idx,
                SearchResult::Found(_) => unreachable!("`RawTree::insert_non_full()` - duplicate key after search"),
            };

            if node.is_leaf() {
                self.nodes.get_mut(current).insert_key(idx, key);
                return;
            }

            let child = node.child(idx);
            if self.nodes.get(child).key_count() == self.order.max_keys() {
                self.split_child(current, idx);
                // The promoted median now sits at `idx`; it decides which half
                // receives the key.
                if self.cmp.compare(&key, self.nodes.get(current).key(idx)) == Ordering::Greater {
                    idx += 1;
                }
            }
            current = self.nodes.get(current).child(idx);
        }
    }

    /// Splits the full child at `idx` of `parent`, promoting its median into
    /// `parent` at `idx` and linking the new sibling at `idx + 1`.
    pub(super) fn split_child(&mut self, parent: Handle, idx: usize) {
        let child = self.nodes.get(parent).child(idx);
        let (median, sibling) = self.split_node(child);
        self.nodes.get_mut(parent).insert_child(idx, median, sibling);
    }
}
