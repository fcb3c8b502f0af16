//! Order-`M` B-tree sets for Rust.
//!
//! This crate provides [`MBTreeSet`], an insert-only ordered set backed by a
//! B-tree whose order `M` (the maximum number of children per node) is chosen
//! at construction. Two interchangeable insertion strategies run over the
//! same node layout:
//!
//! - [`SplitStrategy::TopDown`] splits every full node met on the way down,
//!   so an insertion never has to walk back up. Requires an even order.
//! - [`SplitStrategy::BottomUp`] descends to the leaf first and only splits
//!   on overflow, propagating promoted keys upward through parent
//!   back-references. Works for every order, including the 2-3 tree.
//!
//! # Example
//!
//! ```
//! use mbtree::{Config, MBTreeSet, SplitStrategy};
//!
//! // Order 16, top-down splitting.
//! let mut set = MBTreeSet::new();
//! for i in (0..100).rev() {
//!     set.insert(i);
//! }
//! assert!(set.contains(&42));
//! assert!(!set.insert(42));
//! assert_eq!(set.len(), 100);
//!
//! // A 2-3 tree built bottom-up.
//! let mut two_three: MBTreeSet<usize> = MBTreeSet::with_config(Config::two_three()).unwrap();
//! two_three.extend([5, 3, 8, 1, 4, 7, 9, 2, 6]);
//! assert_eq!(two_three.strategy(), SplitStrategy::BottomUp);
//! assert_eq!(two_three.to_vec(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
//!
//! // Ranked traversal.
//! two_three.for_each_indexed(|rank, &key| assert_eq!(rank + 1, key));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Configurable order** - Any `M` in `3..=256`, validated up front
//! - **Injected ordering** - Natural [`Ord`] or any [`Comparator`], used consistently, splits included
//! - **`tracing`** (optional feature) - Split and root-growth events
//!
//! # Implementation
//!
//! Nodes live in a slab and refer to each other by index, which lets the
//! bottom-up strategy keep a parent link in every node without shared
//! ownership. Keys are kept in small inline vectors and searched with a
//! binary search, and traversal is an explicit-stack iterator.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod config;
mod error;
mod raw;

pub mod mbtree_set;

pub use compare::{Comparator, NaturalOrder};
pub use config::{Config, Order, SplitStrategy};
pub use error::{Error, Result};
pub use mbtree_set::{MBTreeSet, TreeStats};
