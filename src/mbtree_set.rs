use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::compare::{Comparator, NaturalOrder};
use crate::config::{Config, Order, SplitStrategy};
use crate::error::Result;
use crate::raw::{self, RawTree};

mod capacity;

/// An ordered set based on an order-`M` B-tree.
///
/// Every node holds at most `M - 1` keys and every non-root node at least
/// `⌈M/2⌉ - 1`, so a set of `n` keys is never deeper than `O(log_M n)`. The
/// order and the way full nodes are split are chosen at construction through
/// a [`Config`]; the default is order 16 with top-down splitting.
///
/// Keys are ordered by a [`Comparator`]. Sets created with [`new`] or
/// [`with_config`] use the key type's [`Ord`]; [`with_comparator`] injects any
/// other total order, which is then used for every comparison the set makes.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the set. The
/// behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `MBTreeSet` that observed it and will not result in
/// undefined behavior.
///
/// The set only grows: keys can be inserted and queried but not removed,
/// short of [`clear`]ing the whole set.
///
/// [`new`]: MBTreeSet::new
/// [`with_config`]: MBTreeSet::with_config
/// [`with_comparator`]: MBTreeSet::with_comparator
/// [`clear`]: MBTreeSet::clear
///
/// # Examples
///
/// ```
/// use mbtree::MBTreeSet;
///
/// let mut books = MBTreeSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A 2-3 tree, with bottom-up splitting:
///
/// ```
/// use mbtree::{Config, MBTreeSet};
///
/// let mut set = MBTreeSet::with_config(Config::two_three()).unwrap();
/// set.extend([5, 3, 8, 1, 4, 7, 9, 2, 6]);
/// assert_eq!(set.to_vec(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
/// ```
pub struct MBTreeSet<T, C = NaturalOrder> {
    tree: RawTree<T, C>,
}

/// Shape of an [`MBTreeSet`] at a point in time.
///
/// This `struct` is created by the [`stats`](MBTreeSet::stats) method.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TreeStats {
    /// Number of keys in the set.
    pub len: usize,
    /// Number of edges on every root-to-leaf path; `0` for an empty set or a
    /// lone root leaf.
    pub height: usize,
    /// Number of nodes in the tree.
    pub nodes: usize,
    /// Number of keys held by the root node.
    pub root_keys: usize,
}

/// An iterator over the items of an `MBTreeSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`MBTreeSet`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use mbtree::MBTreeSet;
///
/// let set = MBTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&3));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: MBTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: raw::Iter<'a, T>,
}

/// An owning iterator over the elements of an `MBTreeSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`MBTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: MBTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> MBTreeSet<T> {
    /// Makes a new, empty `MBTreeSet` of order 16 with top-down splitting,
    /// ordered by `T`'s [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut set = MBTreeSet::new();
    ///
    /// // entries can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> MBTreeSet<T> {
        MBTreeSet {
            tree: RawTree::empty(Order::DEFAULT, SplitStrategy::TopDown, NaturalOrder),
        }
    }

    /// Makes a new, empty `MBTreeSet` with the given order, split strategy and
    /// capacity, ordered by `T`'s [`Ord`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOrder`](crate::Error::UnsupportedOrder) if
    /// the strategy cannot be used at the configured order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::{Config, Error, MBTreeSet, SplitStrategy};
    ///
    /// let config = Config::new().order(4).unwrap();
    /// let set: MBTreeSet<u32> = MBTreeSet::with_config(config).unwrap();
    /// assert_eq!(set.order().get(), 4);
    ///
    /// let odd = Config::new().order(5).unwrap();
    /// assert_eq!(
    ///     MBTreeSet::<u32>::with_config(odd).unwrap_err(),
    ///     Error::UnsupportedOrder { order: 5, strategy: SplitStrategy::TopDown }
    /// );
    /// ```
    pub fn with_config(config: Config) -> Result<MBTreeSet<T>> {
        MBTreeSet::with_config_and_comparator(config, NaturalOrder)
    }
}

impl<T, C> MBTreeSet<T, C> {
    /// Makes a new, empty `MBTreeSet` of order 16 with top-down splitting,
    /// ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut set = MBTreeSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// set.insert("ccc");
    /// set.insert("a");
    /// assert!(!set.insert("bbb"));
    /// assert_eq!(set.to_vec(), ["a", "ccc"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn with_comparator(cmp: C) -> MBTreeSet<T, C> {
        MBTreeSet {
            tree: RawTree::empty(Order::DEFAULT, SplitStrategy::TopDown, cmp),
        }
    }

    /// Makes a new, empty `MBTreeSet` with the given configuration, ordered by
    /// `cmp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOrder`](crate::Error::UnsupportedOrder) if
    /// the strategy cannot be used at the configured order.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::cmp::Reverse;
    /// use mbtree::{Config, MBTreeSet};
    ///
    /// let mut set = MBTreeSet::with_config_and_comparator(Config::two_three(), |a: &i32, b: &i32| {
    ///     Reverse(a).cmp(&Reverse(b))
    /// })
    /// .unwrap();
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.to_vec(), [3, 2, 1]);
    /// ```
    pub fn with_config_and_comparator(config: Config, cmp: C) -> Result<MBTreeSet<T, C>> {
        config.validate()?;
        Ok(MBTreeSet {
            tree: RawTree::new(&config, cmp),
        })
    }

    /// Clears the set, removing all elements and releasing every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut v = MBTreeSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a reference to the first (smallest) element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut set = MBTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the last (largest) element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut set = MBTreeSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(1);
    /// assert_eq!(set.last(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Gets an iterator that visits the elements in the set in ascending order.
    ///
    /// Each call starts a fresh walk from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Calls `f` on every element in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from([30, 10, 20]);
    /// let mut total = 0;
    /// set.for_each(|x| total += x);
    /// assert_eq!(total, 60);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(f);
    }

    /// Calls `f` with the rank and value of every element in ascending order.
    /// Ranks run from `0` to `len() - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from(['c', 'a', 'b']);
    /// let mut seen = Vec::new();
    /// set.for_each_indexed(|rank, &c| seen.push((rank, c)));
    /// assert_eq!(seen, [(0, 'a'), (1, 'b'), (2, 'c')]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn for_each_indexed<F>(&self, mut f: F)
    where
        F: FnMut(usize, &T),
    {
        for (rank, value) in self.iter().enumerate() {
            f(rank, value);
        }
    }

    /// Copies the elements into a `Vec` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from([2, 3, 1, 2]);
    /// assert_eq!(set.to_vec(), [1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().cloned());
        out
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut a = MBTreeSet::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1);
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut a = MBTreeSet::new();
    /// assert!(a.is_empty());
    /// a.insert(1);
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of edges from the root to any leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut set = MBTreeSet::new();
    /// assert_eq!(set.height(), 0);
    /// set.extend(0..15);
    /// assert_eq!(set.height(), 0);
    /// set.insert(15);
    /// assert_eq!(set.height(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns a snapshot of the tree's shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::{Config, MBTreeSet, TreeStats};
    ///
    /// let mut set = MBTreeSet::with_config(Config::two_three()).unwrap();
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.stats(), TreeStats { len: 3, height: 1, nodes: 3, root_keys: 1 });
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            len: self.tree.len(),
            height: self.tree.height(),
            nodes: self.tree.node_count(),
            root_keys: self.tree.root_key_count(),
        }
    }

    /// Returns the order `M` of the tree.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.tree.order()
    }

    /// Returns the strategy used to split full nodes.
    #[must_use]
    pub const fn strategy(&self) -> SplitStrategy {
        self.tree.strategy()
    }

    /// Returns the comparator ordering the set.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }
}

impl<T, C: Comparator<T>> MBTreeSet<T, C> {
    /// Returns `true` if the set contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.get(value)
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned,
    ///   and neither the set nor its tree structure is modified: the original
    ///   value is not replaced, and the value passed as argument is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let mut set = MBTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// `O(M log_M n)`
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }
}

impl<T: PartialEq, C> PartialEq for MBTreeSet<T, C> {
    fn eq(&self, other: &MBTreeSet<T, C>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for MBTreeSet<T, C> {}

impl<T: Clone, C: Clone> Clone for MBTreeSet<T, C> {
    fn clone(&self) -> Self {
        MBTreeSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: Hash, C> Hash for MBTreeSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for MBTreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for MBTreeSet<T, C> {
    /// Creates an empty `MBTreeSet` of order 16 with top-down splitting.
    fn default() -> Self {
        MBTreeSet::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for MBTreeSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = MBTreeSet::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for MBTreeSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Comparator<T>> Extend<&'a T> for MBTreeSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for MBTreeSet<T> {
    /// Converts a `[T; N]` into an `MBTreeSet<T>`.
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set1 = MBTreeSet::from([1, 2, 3, 4]);
    /// let set2: MBTreeSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a MBTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> IntoIterator for MBTreeSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `MBTreeSet`'s contents in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbtree::MBTreeSet;
    ///
    /// let set = MBTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `mbtree_set::Iter`.
    ///
    /// ```
    /// # use mbtree::mbtree_set;
    /// let iter: mbtree_set::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            inner: raw::Iter::default(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `mbtree_set::IntoIter`.
    ///
    /// ```
    /// # use mbtree::mbtree_set;
    /// let iter: mbtree_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}
