mod arena;
mod bottom_up;
mod iter;
mod node;
mod raw_tree;
mod top_down;

pub(crate) use iter::Iter;
pub(crate) use raw_tree::RawTree;
