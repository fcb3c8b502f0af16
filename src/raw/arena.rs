use alloc::vec::Vec;
use core::num::NonZero;

/// Index of a node slot in an [`Arena`].
///
/// Stored as `index + 1` so that `Option<Handle>` costs nothing extra; parent
/// back-references are plain `Option<Handle>` values and never own a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<u32>);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as u32;
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Append-only slab owning every node of a tree.
///
/// The tree never frees individual nodes: splits mutate the existing node in
/// place and allocate exactly one sibling, so a node stays reachable for the
/// lifetime of the tree. [`Arena::clear`] drops everything at once.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        assert!(self.slots.len() <= Handle::MAX, "`Arena::alloc()` - arena is at maximum capacity ({})", Handle::MAX);
        let handle = Handle::new(self.slots.len());
        self.slots.push(element);
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots.get(handle.index()).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots.get_mut(handle.index()).expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Gives up the slots; slot `i` is the element behind `Handle::new(i)`.
    pub(crate) fn into_vec(self) -> Vec<T> {
        self.slots
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // `Option<Handle>` parent links must stay as small as a bare index.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, u32);

    #[test]
    #[should_panic(expected = "`Handle::new()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::new(Handle::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_handle_after_clear() {
        let mut arena = Arena::new();
        let handle = arena.alloc(7u32);
        arena.clear();
        let _ = arena.get(handle);
    }

    #[test]
    fn arena_capacity() {
        let mut arena: Arena<u32> = Arena::new();
        arena.reserve(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.is_empty());
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::new(index).index(), index);
        }

        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::Set(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Set(usize, u32),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            10 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Set(which, value)),
            1 => Just(Operation::Clear),
        ]
    }
}
