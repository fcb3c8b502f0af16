use super::arena::{Arena, Handle};
use super::iter::{self, Iter};
use super::node::{Node, SearchResult};
use crate::compare::Comparator;
use crate::config::{Config, Order, SplitStrategy};

/// The core order-M B-tree backing `MBTreeSet`.
///
/// The tree exclusively owns every node through its arena. Parent links are
/// plain handles and are kept consistent by every split, whichever strategy
/// performed it.
pub(crate) struct RawTree<K, C> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    pub(super) root: Option<Handle>,
    /// Number of distinct keys in the tree.
    pub(super) len: usize,
    pub(super) order: Order,
    pub(super) strategy: SplitStrategy,
    pub(super) cmp: C,
}

impl<K, C> RawTree<K, C> {
    /// Creates an empty tree without reserving any node storage.
    pub(crate) const fn empty(order: Order, strategy: SplitStrategy, cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            order,
            strategy,
            cmp,
        }
    }

    /// Creates an empty tree. `config` must already be validated.
    pub(crate) fn new(config: &Config, cmp: C) -> Self {
        debug_assert!(config.validate().is_ok(), "`RawTree::new()` - unvalidated config {config:?}");
        let mut tree = Self::empty(config.get_order(), config.get_strategy(), cmp);
        if config.get_capacity() > 0 {
            tree.reserve(config.get_capacity());
        }
        tree
    }

    /// Reserves node storage for at least `additional` more keys.
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional.div_ceil(self.order.min_keys()));
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn order(&self) -> Order {
        self.order
    }

    pub(crate) const fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Number of keys the reserved node storage can hold without growing.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity() * self.order.min_keys()
    }

    /// Number of allocated nodes.
    pub(crate) const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Number of edges from the root to any leaf. All leaves share one depth,
    /// so following the leftmost spine is enough.
    pub(crate) fn height(&self) -> usize {
        let Some(mut current) = self.root else {
            return 0;
        };
        let mut height = 0;
        loop {
            let node = self.nodes.get(current);
            if node.is_leaf() {
                return height;
            }
            current = node.child(0);
            height += 1;
        }
    }

    /// Number of keys held by the root node.
    pub(crate) fn root_key_count(&self) -> usize {
        self.root.map_or(0, |root| self.nodes.get(root).key_count())
    }

    pub(crate) fn first(&self) -> Option<&K> {
        let mut node = self.nodes.get(self.root?);
        while !node.is_leaf() {
            node = self.nodes.get(node.child(0));
        }
        node.keys().first()
    }

    pub(crate) fn last(&self) -> Option<&K> {
        let mut node = self.nodes.get(self.root?);
        while !node.is_leaf() {
            node = self.nodes.get(node.child(node.key_count()));
        }
        node.keys().last()
    }

    /// Lazy in-order traversal.
    pub(crate) fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.nodes, self.root, self.len)
    }

    /// Consumes the tree, returning its keys in ascending order.
    pub(crate) fn into_sorted_vec(self) -> alloc::vec::Vec<K> {
        iter::drain_in_order(self.nodes, self.root, self.len)
    }
}

impl<K, C: Comparator<K>> RawTree<K, C> {
    /// Searches for a key and returns the node holding it and its index there.
    ///
    /// Visits `O(log_M n)` nodes with a binary search of `O(log M)` comparisons in
    /// each.
    pub(crate) fn search(&self, key: &K) -> Option<(Handle, usize)> {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            match node.search(key, &self.cmp) {
                SearchResult::Found(idx) => return Some((current, idx)),
                SearchResult::NotFound(_) if node.is_leaf() => return None,
                SearchResult::NotFound(idx) => current = node.child(idx),
            }
        }
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    pub(crate) fn get(&self, key: &K) -> Option<&K> {
        let (handle, idx) = self.search(key)?;
        Some(self.nodes.get(handle).key(idx))
    }

    /// Inserts a key with the configured split strategy.
    ///
    /// Returns `false` without touching the tree if an equal key is present.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        if self.root.is_none() {
            let leaf = self.nodes.alloc(Node::leaf(key));
            self.root = Some(leaf);
            self.len = 1;
            return true;
        }

        match self.strategy {
            SplitStrategy::TopDown => self.insert_top_down(key),
            SplitStrategy::BottomUp => self.insert_bottom_up(key),
        }
    }
}

impl<K, C> RawTree<K, C> {
    /// Splits `node` around its median, allocating the right sibling.
    ///
    /// Returns the median, which the caller must promote, and the sibling's
    /// handle. Children moved into the sibling are re-pointed at it.
    pub(super) fn split_node(&mut self, node: Handle) -> (K, Handle) {
        let (median, right) = self.nodes.get_mut(node).split();
        let left_keys = self.nodes.get(node).key_count();
        let right_keys = right.key_count();
        debug_assert!(
            left_keys >= self.order.min_keys() && right_keys >= self.order.min_keys(),
            "`RawTree::split_node()` - split below occupancy floor ({left_keys} | {right_keys})"
        );
        debug_assert!(
            left_keys <= self.order.max_keys() && right_keys <= self.order.max_keys(),
            "`RawTree::split_node()` - split above capacity ({left_keys} | {right_keys})"
        );

        let sibling = self.nodes.alloc(right);
        for i in 0..self.nodes.get(sibling).children().len() {
            let child = self.nodes.get(sibling).child(i);
            self.nodes.get_mut(child).set_parent(Some(sibling));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?node, sibling = ?sibling, left_keys, right_keys, "split");

        (median, sibling)
    }

    /// Installs a new root above `left` and `right`; the tree grows one level.
    pub(super) fn grow_root(&mut self, left: Handle, median: K, right: Handle) -> Handle {
        debug_assert_eq!(self.root, Some(left), "`RawTree::grow_root()` - `left` is not the root");
        let root = self.nodes.alloc(Node::root(median, left, right));
        self.nodes.get_mut(left).set_parent(Some(root));
        self.nodes.get_mut(right).set_parent(Some(root));
        self.root = Some(root);

        #[cfg(feature = "tracing")]
        tracing::debug!(height = self.height(), strategy = ?self.strategy, "root split");

        root
    }
}

impl<K: Clone, C: Clone> Clone for RawTree<K, C> {
    fn clone(&self) -> Self {
        // Handles are arena indices, so a slot-for-slot copy keeps every
        // child and parent link valid.
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            order: self.order,
            strategy: self.strategy,
            cmp: self.cmp.clone(),
        }
    }
}
