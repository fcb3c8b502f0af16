use super::MBTreeSet;
use crate::compare::NaturalOrder;
use crate::config::Config;
use crate::raw::RawTree;

impl<T> MBTreeSet<T> {
    /// Creates an empty set of order 16 with node storage reserved for at
    /// least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set: MBTreeSet<i32> = MBTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        MBTreeSet {
            tree: RawTree::new(&Config::new().capacity(capacity), NaturalOrder),
        }
    }
}

impl<T, C> MBTreeSet<T, C> {
    /// Returns the number of elements the set can hold before its node
    /// storage has to grow.
    ///
    /// The figure assumes every node sits at the occupancy floor, so the set
    /// usually holds more before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::{Config, MBTreeSet};
    ///
    /// let set: MBTreeSet<i32> = MBTreeSet::with_config(Config::two_three().capacity(100)).unwrap();
    /// assert!(set.capacity() >= 100);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
