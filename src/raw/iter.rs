use alloc::vec::Vec;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::{Arena, Handle};
use super::node::Node;

type Path = SmallVec<[(Handle, usize); 24]>;

/// Double-ended in-order cursor over a tree's keys.
///
/// Each end keeps one frame per level on its current root-to-leaf path, so
/// it never allocates for trees of realistic height. A front frame holds the
/// index of the next key to yield; a back frame holds the number of keys of
/// that node not yet yielded from the back. The ends never cross because
/// both stop once `remaining` reaches zero.
pub(crate) struct Iter<'a, K> {
    nodes: Option<&'a Arena<Node<K>>>,
    front: Path,
    back: Path,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Handle>, len: usize) -> Self {
        let mut iter = Self {
            nodes: Some(nodes),
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend_front(nodes, root);
            iter.descend_back(nodes, root);
        }
        iter
    }

    /// Pushes `handle` and its leftmost descendants onto the front path.
    fn descend_front(&mut self, nodes: &'a Arena<Node<K>>, mut handle: Handle) {
        loop {
            self.front.push((handle, 0));
            let node = nodes.get(handle);
            if node.is_leaf() {
                return;
            }
            handle = node.child(0);
        }
    }

    /// Pushes `handle` and its rightmost descendants onto the back path.
    fn descend_back(&mut self, nodes: &'a Arena<Node<K>>, mut handle: Handle) {
        loop {
            let node = nodes.get(handle);
            self.back.push((handle, node.key_count()));
            if node.is_leaf() {
                return;
            }
            handle = node.child(node.key_count());
        }
    }
}

impl<K> Default for Iter<'_, K> {
    fn default() -> Self {
        Self {
            nodes: None,
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes?;
        loop {
            let top = self.front.last_mut()?;
            let (handle, idx) = *top;
            let node = nodes.get(handle);
            if idx == node.key_count() {
                self.front.pop();
                continue;
            }

            top.1 += 1;
            if !node.is_leaf() {
                self.descend_front(nodes, node.child(idx + 1));
            }
            self.remaining -= 1;
            return Some(node.key(idx));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes?;
        loop {
            let top = self.back.last_mut()?;
            let (handle, left) = *top;
            if left == 0 {
                self.back.pop();
                continue;
            }

            top.1 -= 1;
            let node = nodes.get(handle);
            if !node.is_leaf() {
                self.descend_back(nodes, node.child(left - 1));
            }
            self.remaining -= 1;
            return Some(node.key(left - 1));
        }
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

/// Moves every key out of `nodes` in ascending order.
///
/// Each node's keys are consumed front to back, which is exactly the order
/// an in-order walk visits them in.
pub(crate) fn drain_in_order<K>(nodes: Arena<Node<K>>, root: Option<Handle>, len: usize) -> Vec<K> {
    let mut out = Vec::with_capacity(len);
    let Some(root) = root else {
        return out;
    };

    let (mut keys, children): (Vec<_>, Vec<_>) = nodes
        .into_vec()
        .into_iter()
        .map(|node| {
            let (keys, children) = node.into_parts();
            (keys.into_iter(), children)
        })
        .unzip();

    let descend = |path: &mut Path, mut handle: Handle| {
        loop {
            path.push((handle, 0));
            match children[handle.index()].first() {
                Some(&first) => handle = first,
                None => return,
            }
        }
    };

    let mut path = Path::new();
    descend(&mut path, root);
    while let Some(top) = path.last_mut() {
        let (handle, idx) = *top;
        let Some(key) = keys[handle.index()].next() else {
            path.pop();
            continue;
        };
        top.1 += 1;
        out.push(key);
        if let Some(&next) = children[handle.index()].get(idx + 1) {
            descend(&mut path, next);
        }
    }
    out
}
