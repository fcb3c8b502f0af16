//! Error types for `mbtree`.
//!
//! Only configuration can fail recoverably. Duplicate inserts are a normal
//! `false` outcome, and misuse of internal handles panics.

use thiserror::Error;

use crate::config::SplitStrategy;

/// Result type alias for fallible `mbtree` operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported while validating a tree [`Config`](crate::Config).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested order is outside `3..=Order::MAX`.
    #[error("order {order} is out of range (expected 3..={max})", max = crate::Order::MAX)]
    OrderOutOfRange {
        /// The rejected order.
        order: usize,
    },

    /// The split strategy cannot keep the occupancy floor at this order.
    ///
    /// Top-down splitting divides a full node of `M - 1` keys around a single
    /// median, which only yields two halves at the floor when `M` is even.
    #[error("order {order} is not supported by the {strategy:?} split strategy")]
    UnsupportedOrder {
        /// The rejected order.
        order: usize,
        /// The strategy it was paired with.
        strategy: SplitStrategy,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::OrderOutOfRange { order: 2 }.to_string(), "order 2 is out of range (expected 3..=256)");
        assert_eq!(
            Error::UnsupportedOrder {
                order: 5,
                strategy: SplitStrategy::TopDown,
            }
            .to_string(),
            "order 5 is not supported by the TopDown split strategy"
        );
    }
}
