use super::arena::Handle;
use super::node::SearchResult;
use super::raw_tree::RawTree;
use crate::compare::Comparator;

impl<K, C: Comparator<K>> RawTree<K, C> {
    /// Inserts into a non-empty tree by descending to the target leaf and
    /// splitting only on overflow.
    ///
    /// A duplicate found at any level aborts before anything is modified.
    pub(super) fn insert_bottom_up(&mut self, key: K) -> bool {
        let Some(mut current) = self.root else {
            unreachable!("`RawTree::insert_bottom_up()` - empty tree");
        };

        let idx = loop {
            let node = self.nodes.get(current);
            match node.search(&key, &self.cmp) {
                SearchResult::Found(_) => return false,
                SearchResult::NotFound(idx) if node.is_leaf() => break idx,
                SearchResult::NotFound(idx) => current = node.child(idx),
            }
        };

        // No comparator calls past this point: the tree is only mutated once
        // the descent has succeeded. The leaf may briefly hold M keys; the
        // split below restores the bound.
        let leaf = self.nodes.get_mut(current);
        leaf.insert_key(idx, key);
        if leaf.key_count() > self.order.max_keys() {
            self.split_and_propagate(current);
        }
        self.len += 1;
        true
    }

    /// Splits an overflowing node and walks the parent chain, pushing each
    /// promoted median into the parent until one absorbs it or a new root is
    /// created.
    fn split_and_propagate(&mut self, mut node: Handle) {
        loop {
            let (median, sibling) = self.split_node(node);

            let Some(parent) = self.nodes.get(node).parent() else {
                self.grow_root(node, median, sibling);
                return;
            };

            // The median belongs in the parent at the slot of the child that
            // was split, located by handle rather than by comparing keys.
            let parent_node = self.nodes.get_mut(parent);
            let Some(idx) = parent_node.children().iter().position(|&child| child == node) else {
                unreachable!("`RawTree::split_and_propagate()` - `node` is not a child of its parent!");
            };
            debug_assert_eq!(
                parent_node.child(idx),
                node,
                "`RawTree::split_and_propagate()` - parent link does not match child slot"
            );

            #[cfg(feature = "tracing")]
            tracing::trace!(node = ?node, parent = ?parent, slot = idx, "promote");

            parent_node.insert_child(idx, median, sibling);
            if parent_node.key_count() <= self.order.max_keys() {
                return;
            }
            node = parent;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::{Config, SplitStrategy};
    use crate::raw::raw_tree::tests::{new_tree, tripwire};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use pretty_assertions::assert_eq;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    /// Fills a root leaf of order `m` with 10, 20, ..., then inserts `key` to
    /// overflow it. Returns (root keys, left leaf, right leaf).
    fn overflow_root_leaf(m: usize, key: i32) -> (Vec<i32>, Vec<i32>, Vec<i32>) {
        let mut tree = new_tree(m, SplitStrategy::BottomUp);
        for k in 1..m {
            tree.insert(10 * k as i32);
        }
        assert_eq!(tree.height(), 0);
        assert!(tree.insert(key));
        tree.validate_invariants();
        assert_eq!(tree.height(), 1);

        let flat = |nodes: Vec<Vec<&i32>>| -> Vec<Vec<i32>> {
            nodes.into_iter().map(|n| n.into_iter().copied().collect()).collect()
        };
        let root = flat(tree.level(0)).remove(0);
        let mut leaves = flat(tree.level(1));
        assert_eq!(leaves.len(), 2);
        let right = leaves.pop().unwrap();
        let left = leaves.pop().unwrap();
        (root, left, right)
    }

    #[test]
    fn ternary_new_key_below_both() {
        assert_eq!(overflow_root_leaf(3, 5), (vec![10], vec![5], vec![20]));
    }

    #[test]
    fn ternary_new_key_between() {
        assert_eq!(overflow_root_leaf(3, 15), (vec![15], vec![10], vec![20]));
    }

    #[test]
    fn ternary_new_key_above_both() {
        assert_eq!(overflow_root_leaf(3, 25), (vec![20], vec![10], vec![25]));
    }

    #[test]
    fn order_16_new_key_below_all() {
        let (root, left, right) = overflow_root_leaf(16, 5);
        assert_eq!(root, [70]);
        assert_eq!(left, [5, 10, 20, 30, 40, 50, 60]);
        assert_eq!(right, [80, 90, 100, 110, 120, 130, 140, 150]);
    }

    #[test]
    fn order_16_new_key_between() {
        let (root, left, right) = overflow_root_leaf(16, 75);
        assert_eq!(root, [75]);
        assert_eq!(left, [10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(right, [80, 90, 100, 110, 120, 130, 140, 150]);
    }

    #[test]
    fn order_16_new_key_above_all() {
        let (root, left, right) = overflow_root_leaf(16, 155);
        assert_eq!(root, [80]);
        assert_eq!(left, [10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(right, [90, 100, 110, 120, 130, 140, 150, 155]);
    }

    #[test]
    fn ternary_scenario() {
        let mut tree = new_tree(3, SplitStrategy::BottomUp);
        for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            assert!(tree.insert(key));
            tree.validate_invariants();
        }
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);

        // 5, 3 -> [3 5]; 8 splits -> [5] / [3] [8]; 1 -> [1 3]; 4 splits the
        // left leaf and fills the root -> [3 5] / [1] [4] [8]; 7 -> [7 8];
        // 9 splits [7 8 9], promoting 8 into a full root, which splits -> [5];
        // 2 -> [1 2]; 6 -> [6 7].
        assert_eq!(tree.level(0), [[&5]]);
        assert_eq!(tree.level(1), [[&3], [&8]]);
        assert_eq!(tree.level(2), [vec![&1, &2], vec![&4], vec![&6, &7], vec![&9]]);
    }

    #[test]
    fn propagation_through_middle_child() {
        // Root [20 40] with three leaves; overflow the middle one so the
        // promoted key lands between the root's keys and splits it.
        let mut tree = new_tree(3, SplitStrategy::BottomUp);
        for key in [20, 40, 10, 30, 50] {
            tree.insert(key);
        }
        assert_eq!(tree.level(0), [[&20, &40]]);
        assert_eq!(tree.level(1), [[&10], [&30], [&50]]);

        tree.insert(25);
        tree.insert(35);
        tree.validate_invariants();
        assert_eq!(tree.level(0), [[&30]]);
        assert_eq!(tree.level(1), [[&20], [&40]]);
        assert_eq!(tree.level(2), [[&10], [&25], [&35], [&50]]);
    }

    #[test]
    fn parent_links_follow_moved_children() {
        let mut tree = new_tree(3, SplitStrategy::BottomUp);
        for key in 0..200 {
            tree.insert(key);
        }
        // `validate_invariants` checks every parent link against the actual
        // structure.
        tree.validate_invariants();
        assert!(tree.height() >= 4);
    }

    #[test]
    fn duplicate_anywhere_on_path_is_rejected() {
        let mut tree = new_tree(3, SplitStrategy::BottomUp);
        for key in 0..20 {
            tree.insert(key);
        }
        let nodes = tree.node_count();
        for key in 0..20 {
            assert!(!tree.insert(key), "duplicate {key} accepted");
        }
        assert_eq!(tree.node_count(), nodes);
        assert_eq!(tree.len(), 20);
        tree.validate_invariants();
    }

    #[test]
    fn comparator_panic_during_insert_loses_nothing() {
        let mut aborted = 0;
        let mut completed = 0;
        for budget in 0..8 {
            let armed = Rc::new(Cell::new(None));
            let mut tree = RawTree::new(&Config::two_three(), tripwire(Rc::clone(&armed)));
            for key in [20, 35, 10, 30, 40, 31] {
                assert!(tree.insert(key));
            }
            assert_eq!(tree.level(0), [[&20, &35]]);
            assert_eq!(tree.level(1), [vec![&10], vec![&30, &31], vec![&40]]);

            // 33 overflows [30 31], and the promoted 31 overflows the root.
            armed.set(Some(budget));
            let outcome = catch_unwind(AssertUnwindSafe(|| tree.insert(33)));
            armed.set(None);

            tree.validate_invariants();
            let keys: Vec<i32> = tree.iter().copied().collect();
            if let Ok(inserted) = outcome {
                completed += 1;
                assert!(inserted);
                assert_eq!(keys, [10, 20, 30, 31, 33, 35, 40], "budget {budget}");
                assert_eq!(tree.height(), 2);
            } else {
                aborted += 1;
                assert_eq!(keys, [10, 20, 30, 31, 35, 40], "budget {budget}");
                assert_eq!(tree.height(), 1);
            }
        }
        assert!(aborted > 0 && completed > 0);
    }
}
