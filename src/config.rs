use core::fmt;

use crate::error::{Error, Result};

/// The order `M` of a B-tree: the maximum number of children per node.
///
/// A node of order `M` holds at most `M - 1` keys, and every non-root node
/// holds at least `⌈M/2⌉ - 1` keys.
///
/// # Examples
///
/// ```
/// use mbtree::Order;
///
/// let order = Order::new(16).unwrap();
/// assert_eq!(order.max_keys(), 15);
/// assert_eq!(order.min_keys(), 7);
///
/// assert!(Order::new(2).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Order(usize);

impl Order {
    /// The smallest supported order (a 2-3 tree).
    pub const MIN: usize = 3;
    /// The largest supported order.
    pub const MAX: usize = 256;

    /// Order 3: the ternary ("2-3") tree.
    pub const TERNARY: Self = Self(3);
    /// Order 16: the compact default node.
    pub const DEFAULT: Self = Self(16);

    /// Validates and wraps an order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrderOutOfRange`] if `order` is outside
    /// `Order::MIN..=Order::MAX`.
    pub const fn new(order: usize) -> Result<Self> {
        if order < Self::MIN || order > Self::MAX {
            return Err(Error::OrderOutOfRange {
                order,
            });
        }
        Ok(Self(order))
    }

    /// Returns `M`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Maximum number of children per node (`M`).
    #[must_use]
    pub const fn max_children(self) -> usize {
        self.0
    }

    /// Maximum number of keys per node (`M - 1`).
    #[must_use]
    pub const fn max_keys(self) -> usize {
        self.0 - 1
    }

    /// Occupancy floor for non-root nodes (`⌈M/2⌉ - 1`).
    #[must_use]
    pub const fn min_keys(self) -> usize {
        self.0.div_ceil(2) - 1
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How a full node is split during insertion.
///
/// Both strategies operate on the same node layout and produce trees with the
/// same invariants; they differ only in *when* splits happen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SplitStrategy {
    /// Split every full child on the way down, before descending into it.
    ///
    /// The node being inserted into always has room, so a split never
    /// propagates more than one level. Requires an even order.
    #[default]
    TopDown,
    /// Descend to the leaf first, then split on overflow and propagate the
    /// promoted key upward through parent back-references.
    ///
    /// Supports every order, including the ternary (2-3) tree.
    BottomUp,
}

impl SplitStrategy {
    /// Returns `true` if this strategy can maintain the occupancy floor at
    /// `order`.
    #[must_use]
    pub const fn supports(self, order: Order) -> bool {
        match self {
            SplitStrategy::TopDown => order.get().is_multiple_of(2),
            SplitStrategy::BottomUp => true,
        }
    }
}

/// Construction-time settings for an [`MBTreeSet`](crate::MBTreeSet).
///
/// # Examples
///
/// ```
/// use mbtree::{Config, MBTreeSet, SplitStrategy};
///
/// let config = Config::new().order(8).unwrap().strategy(SplitStrategy::BottomUp).capacity(1024);
/// let mut set = MBTreeSet::with_config(config).unwrap();
/// assert!(set.insert(42));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    order: Order,
    strategy: SplitStrategy,
    capacity: usize,
}

impl Config {
    /// Order 16, top-down splitting, no pre-reserved capacity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: Order::DEFAULT,
            strategy: SplitStrategy::TopDown,
            capacity: 0,
        }
    }

    /// Order 3 with bottom-up splitting: a classic 2-3 tree.
    #[must_use]
    pub const fn two_three() -> Self {
        Self {
            order: Order::TERNARY,
            strategy: SplitStrategy::BottomUp,
            capacity: 0,
        }
    }

    /// Sets the order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrderOutOfRange`] if `order` is not a valid [`Order`].
    pub const fn order(mut self, order: usize) -> Result<Self> {
        match Order::new(order) {
            Ok(order) => {
                self.order = order;
                Ok(self)
            }
            Err(e) => Err(e),
        }
    }

    /// Sets the split strategy.
    #[must_use]
    pub const fn strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of keys to reserve node storage for up front.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the configured order.
    #[must_use]
    pub const fn get_order(&self) -> Order {
        self.order
    }

    /// Returns the configured split strategy.
    #[must_use]
    pub const fn get_strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Returns the configured key capacity.
    #[must_use]
    pub const fn get_capacity(&self) -> usize {
        self.capacity
    }

    /// Checks that the strategy can be used at the configured order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOrder`] for top-down splitting with an odd
    /// order.
    pub const fn validate(&self) -> Result<()> {
        if self.strategy.supports(self.order) {
            Ok(())
        } else {
            Err(Error::UnsupportedOrder {
                order: self.order.get(),
                strategy: self.strategy,
            })
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
