//! Error types for book and registry operations

use common::{Px, Qty};
use thiserror::Error;

/// Failure kinds for book and registry operations.
///
/// Every variant is an ordinary, expected outcome of operating on
/// caller-supplied ids and prices; none is fatal and nothing is retried
/// internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Non-positive price or quantity supplied to an add.
    #[error("invalid order terms: price {price}, quantity {quantity}")]
    InvalidOrderTerms {
        /// Rejected price.
        price: Px,
        /// Rejected quantity.
        quantity: Qty,
    },

    /// Remove or replace targeted a price with no resting level.
    #[error("no resting level at price {price}")]
    LevelNotFound {
        /// Probed price.
        price: Px,
    },

    /// Add targeted an order id already tracked.
    #[error("order {id} already exists")]
    DuplicateOrder {
        /// Offending order id.
        id: u64,
    },

    /// Remove, replace or query targeted an unknown order id.
    #[error("no order with id {id}")]
    OrderNotFound {
        /// Unknown order id.
        id: u64,
    },

    /// Positional query targeted an instrument with no book yet.
    #[error("no book for instrument {symbol}")]
    BookNotFound {
        /// Queried instrument symbol.
        symbol: String,
    },

    /// Positional query index exceeds the side's current depth.
    #[error("level index {index} out of range (depth {depth})")]
    LevelIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current depth of the queried side.
        depth: usize,
    },
}
