#[cfg(test)]
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Handle;
use crate::compare::Comparator;

/// Keys stored inline before a node spills to the heap. Covers every node of
/// the default order 16, including the transient overflow slot used while a
/// bottom-up split is in flight.
pub(crate) const INLINE_KEYS: usize = 16;
pub(crate) const INLINE_CHILDREN: usize = INLINE_KEYS + 1;

/// A B-tree node: up to `M - 1` ordered keys and, for internal nodes, one more
/// child than keys.
///
/// `children[i]` holds every key strictly between `keys[i - 1]` and `keys[i]`.
/// A node is a leaf exactly when it has no children.
pub(crate) struct Node<K> {
    // Non-owning back-reference, only read by bottom-up split propagation.
    parent: Option<Handle>,
    keys: SmallVec<[K; INLINE_KEYS]>,
    children: SmallVec<[Handle; INLINE_CHILDREN]>,
}

/// Result of searching for a key in a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is where it would be inserted, which is also
    /// the child to descend into.
    NotFound(usize),
}

impl<K> Node<K> {
    /// Creates a leaf holding a single key.
    pub(crate) fn leaf(key: K) -> Self {
        let mut keys = SmallVec::new();
        keys.push(key);
        Self {
            parent: None,
            keys,
            children: SmallVec::new(),
        }
    }

    /// Creates a root with one key separating two existing subtrees.
    pub(crate) fn root(key: K, left: Handle, right: Handle) -> Self {
        let mut node = Self::leaf(key);
        node.children.push(left);
        node.children.push(right);
        node
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Splits the node into its keys and child handles.
    pub(crate) fn into_parts(self) -> (SmallVec<[K; INLINE_KEYS]>, SmallVec<[Handle; INLINE_CHILDREN]>) {
        (self.keys, self.children)
    }

    /// Binary-searches this node's keys.
    #[inline]
    pub(crate) fn search<C>(&self, key: &K, cmp: &C) -> SearchResult
    where
        C: Comparator<K>,
    {
        match self.keys.binary_search_by(|k| cmp.compare(k, key)) {
            Ok(idx) => SearchResult::Found(idx),
            Err(idx) => SearchResult::NotFound(idx),
        }
    }

    /// Inserts a key into a leaf at `index`, shifting later keys right.
    pub(crate) fn insert_key(&mut self, index: usize, key: K) {
        debug_assert!(self.is_leaf(), "`Node::insert_key()` - called on an internal node");
        self.keys.insert(index, key);
    }

    /// Inserts `key` at `index` and `right` immediately after the child that
    /// was split to produce them.
    pub(crate) fn insert_child(&mut self, index: usize, key: K, right: Handle) {
        debug_assert!(!self.is_leaf(), "`Node::insert_child()` - called on a leaf");
        self.keys.insert(index, key);
        self.children.insert(index + 1, right);
    }

    /// Splits this node around its median key.
    ///
    /// With `len` keys the median sits at `(len - 1) / 2`: the keys before it
    /// stay here, the keys after it move to the returned sibling along with
    /// the matching children. The sibling inherits this node's parent; the
    /// caller re-points the moved children once the sibling has a handle.
    pub(crate) fn split(&mut self) -> (K, Node<K>) {
        let len = self.keys.len();
        assert!(len >= 2, "`Node::split()` - node has {len} keys, need at least 2");
        let mid = (len - 1) / 2;

        let right_keys: SmallVec<[K; INLINE_KEYS]> = self.keys.drain(mid + 1..).collect();
        let right_children: SmallVec<[Handle; INLINE_CHILDREN]> = if self.is_leaf() {
            SmallVec::new()
        } else {
            self.children.drain(mid + 1..).collect()
        };
        let Some(median) = self.keys.pop() else {
            unreachable!("`Node::split()` - median slot is empty");
        };

        let right = Node {
            parent: self.parent,
            keys: right_keys,
            children: right_children,
        };
        (median, right)
    }
}

impl<K: Clone> Clone for Node<K> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent,
            keys: self.keys.clone(),
            children: self.children.clone(),
        }
    }
}

/// Checks that `keys` is strictly ascending under `cmp`.
#[cfg(test)]
pub(crate) fn strictly_ascending<K, C: Comparator<K>>(keys: &[K], cmp: &C) -> bool {
    keys.windows(2).all(|w| cmp.compare(&w[0], &w[1]) == Ordering::Less)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;
    use alloc::vec;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    /// Builds a full leaf of order `m` (keys 10, 20, ..., 10 * (m - 1)), inserts
    /// `key` where it belongs, and splits the resulting overflow.
    fn overflow_split(m: usize, key: u32) -> (Vec<u32>, u32, Vec<u32>) {
        let mut node = Node::leaf(10);
        for k in 2..m {
            node.keys.push(10 * k as u32);
        }
        assert_eq!(node.key_count(), m - 1);

        let SearchResult::NotFound(idx) = node.search(&key, &NaturalOrder) else {
            panic!("{key} is already present");
        };
        node.insert_key(idx, key);
        let (median, right) = node.split();
        (node.keys().to_vec(), median, right.keys().to_vec())
    }

    #[test]
    fn ternary_overflow_below_all() {
        assert_eq!(overflow_split(3, 5), (vec![5], 10, vec![20]));
    }

    #[test]
    fn ternary_overflow_between() {
        assert_eq!(overflow_split(3, 15), (vec![10], 15, vec![20]));
    }

    #[test]
    fn ternary_overflow_above_all() {
        assert_eq!(overflow_split(3, 25), (vec![10], 20, vec![25]));
    }

    #[test]
    fn order_16_overflow_below_all() {
        assert_eq!(
            overflow_split(16, 5),
            (vec![5, 10, 20, 30, 40, 50, 60], 70, vec![80, 90, 100, 110, 120, 130, 140, 150])
        );
    }

    #[test]
    fn order_16_overflow_between() {
        assert_eq!(
            overflow_split(16, 75),
            (vec![10, 20, 30, 40, 50, 60, 70], 75, vec![80, 90, 100, 110, 120, 130, 140, 150])
        );
        assert_eq!(
            overflow_split(16, 15),
            (vec![10, 15, 20, 30, 40, 50, 60], 70, vec![80, 90, 100, 110, 120, 130, 140, 150])
        );
        assert_eq!(
            overflow_split(16, 135),
            (vec![10, 20, 30, 40, 50, 60, 70], 80, vec![90, 100, 110, 120, 130, 135, 140, 150])
        );
    }

    #[test]
    fn order_16_overflow_above_all() {
        assert_eq!(
            overflow_split(16, 155),
            (vec![10, 20, 30, 40, 50, 60, 70], 80, vec![90, 100, 110, 120, 130, 140, 150, 155])
        );
    }

    #[test]
    fn full_node_split_for_even_orders() {
        // A full node of even order M holds M - 1 keys and splits into two
        // halves of M/2 - 1 keys each.
        for m in (4..=32).step_by(2) {
            let mut node = Node::leaf(0u32);
            for k in 1..(m as u32 - 1) {
                node.keys.push(k);
            }
            let (median, right) = node.split();
            assert_eq!(node.key_count(), m / 2 - 1, "left half for M={m}");
            assert_eq!(right.key_count(), m / 2 - 1, "right half for M={m}");
            assert_eq!(median as usize, m / 2 - 1, "median for M={m}");
        }
    }

    #[test]
    fn internal_split_moves_matching_children() {
        let handles: Vec<Handle> = (0..5).map(Handle::new).collect();
        let mut node = Node::root(10u32, handles[0], handles[1]);
        node.insert_child(1, 20, handles[2]);
        node.insert_child(2, 30, handles[3]);
        node.insert_child(3, 40, handles[4]);
        node.set_parent(Some(Handle::new(99)));

        let (median, right) = node.split();
        assert_eq!(median, 20);
        assert_eq!(node.keys(), [10]);
        assert_eq!(node.children(), &handles[..2]);
        assert_eq!(right.keys(), [30, 40]);
        assert_eq!(right.children(), &handles[2..]);
        assert_eq!(right.parent(), Some(Handle::new(99)));
    }

    #[test]
    fn search_reports_insertion_point() {
        let mut node = Node::leaf(10);
        node.insert_key(1, 30);
        node.insert_key(1, 20);
        assert_eq!(node.search(&20, &NaturalOrder), SearchResult::Found(1));
        assert_eq!(node.search(&5, &NaturalOrder), SearchResult::NotFound(0));
        assert_eq!(node.search(&25, &NaturalOrder), SearchResult::NotFound(2));
        assert_eq!(node.search(&35, &NaturalOrder), SearchResult::NotFound(3));
        assert!(strictly_ascending(node.keys(), &NaturalOrder));
    }
}
