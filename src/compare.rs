use core::cmp::Ordering;

/// A total order over keys of type `T`.
///
/// A tree uses its comparator for every comparison it makes, including the
/// ones made while splitting and promoting keys. The comparator must be
/// consistent: equal results for the same pair of keys for the lifetime of
/// the tree.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator.
///
/// # Examples
///
/// ```
/// use mbtree::MBTreeSet;
///
/// let mut set = MBTreeSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// set.extend([1, 3, 2]);
/// assert_eq!(set.to_vec(), [3, 2, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The key type's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<T: ?Sized + Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
