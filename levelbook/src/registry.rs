//! Order-to-book routing and per-order state
//!
//! The registry is the single owner of every live order record and every
//! book. Books are created lazily on the first order for an instrument and
//! live as long as the registry. Order records are the authoritative source
//! of "what quantity at what price this order contributes"; the books only
//! hold aggregates.

use ahash::{AHashMap, RandomState};
use common::{Px, Qty};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::hash::BuildHasher;
use tracing::warn;

use crate::book::{BookConfig, PriceLevelBook};
use crate::errors::BookError;
use crate::ladder::Side;

/// A single resting order's identifiers and terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Caller-assigned id, unique among live orders.
    pub id: u64,
    /// Which side of the book the order rests on.
    pub side: Side,
    /// Limit price.
    pub price: Px,
    /// Resting quantity.
    pub quantity: Qty,
    /// Instrument the order belongs to.
    pub symbol: String,
}

/// Top-level manager: order-id map plus instrument-keyed books.
///
/// Every operation is synchronous and total: it runs to completion on the
/// caller's thread and reports failure through [`BookError`] instead of
/// panicking. Nothing here retries; a failed call leaves no partial state.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    orders: AHashMap<u64, Order>,
    books: AHashMap<u64, PriceLevelBook>,
    // Instrument-to-book-key derivation. Seeded per registry, so equal
    // symbols always resolve to the same book for this registry's lifetime.
    book_keys: RandomState,
    config: BookConfig,
}

impl OrderRegistry {
    /// Create an empty registry with unbounded books.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose lazily created books use `config`.
    #[must_use]
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn book_key(&self, symbol: &str) -> u64 {
        self.book_keys.hash_one(symbol)
    }

    /// Track a new order and fold it into its instrument's book.
    ///
    /// The book is created lazily for a first-seen instrument, and neither
    /// the book nor the order record is committed unless the book accepts the
    /// order's terms.
    pub fn add_order(&mut self, order: Order) -> Result<(), BookError> {
        if self.orders.contains_key(&order.id) {
            warn!(id = order.id, "duplicate order id");
            return Err(BookError::DuplicateOrder { id: order.id });
        }
        let key = self.book_key(&order.symbol);
        match self.books.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().add(order.side, order.price, order.quantity)?;
            }
            Entry::Vacant(entry) => {
                let mut book = PriceLevelBook::with_config(order.symbol.clone(), self.config);
                book.add(order.side, order.price, order.quantity)?;
                entry.insert(book);
            }
        }
        self.orders.insert(order.id, order);
        Ok(())
    }

    /// Remove a live order, shrinking or deleting its level.
    ///
    /// The record is erased only after the book accepts the removal; the
    /// removed order is returned to the caller.
    pub fn remove_order(&mut self, order_id: u64) -> Result<Order, BookError> {
        let Some(order) = self.orders.get(&order_id) else {
            warn!(id = order_id, "remove targeted an unknown order");
            return Err(BookError::OrderNotFound { id: order_id });
        };
        let key = self.book_key(&order.symbol);
        let Some(book) = self.books.get_mut(&key) else {
            return Err(BookError::BookNotFound {
                symbol: order.symbol.clone(),
            });
        };
        book.remove(order.side, order.price, order.quantity)?;
        let removed = self.orders.remove(&order_id);
        debug_assert!(removed.is_some());
        removed.ok_or(BookError::OrderNotFound { id: order_id })
    }

    /// Change a live order's quantity in place; price and side never change.
    ///
    /// The level's new quantity is computed here as
    /// `current level quantity - old order quantity + new quantity`, so other
    /// orders resting at the same price are unaffected. The order record
    /// keeps the new quantity on success, which is what keeps later removes
    /// drift-free.
    pub fn replace_order(&mut self, order_id: u64, quantity: Qty) -> Result<(), BookError> {
        let Some(order) = self.orders.get(&order_id) else {
            warn!(id = order_id, "replace targeted an unknown order");
            return Err(BookError::OrderNotFound { id: order_id });
        };
        let key = self.book_key(&order.symbol);
        let Some(book) = self.books.get_mut(&key) else {
            return Err(BookError::BookNotFound {
                symbol: order.symbol.clone(),
            });
        };
        let level_quantity = book.level_quantity(order.side, order.price);
        let new_level_quantity = level_quantity.sub(order.quantity).add(quantity);
        book.replace(order.side, order.price, new_level_quantity)?;
        if let Some(order) = self.orders.get_mut(&order_id) {
            order.quantity = quantity;
        }
        Ok(())
    }

    /// Price at `index` levels from the best on `side` of `symbol`'s book.
    pub fn price_at_level(&self, side: Side, index: usize, symbol: &str) -> Result<Px, BookError> {
        self.book(symbol)
            .ok_or_else(|| BookError::BookNotFound {
                symbol: symbol.to_owned(),
            })?
            .level_at(side, index)
            .map(|level| level.price)
    }

    /// Quantity at `index` levels from the best on `side` of `symbol`'s book.
    pub fn quantity_at_level(
        &self,
        side: Side,
        index: usize,
        symbol: &str,
    ) -> Result<Qty, BookError> {
        self.book(symbol)
            .ok_or_else(|| BookError::BookNotFound {
                symbol: symbol.to_owned(),
            })?
            .level_at(side, index)
            .map(|level| level.quantity)
    }

    /// Borrow the book for `symbol`, if one has been created. The borrow is
    /// scoped to the call; snapshots are the way to retain state.
    #[must_use]
    pub fn book(&self, symbol: &str) -> Option<&PriceLevelBook> {
        self.books.get(&self.book_key(symbol))
    }

    /// Borrow a live order record.
    #[must_use]
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// True when `order_id` is tracked.
    #[must_use]
    pub fn order_exists(&self, order_id: u64) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// True when a book exists for `symbol`.
    #[must_use]
    pub fn book_exists(&self, symbol: &str) -> bool {
        self.books.contains_key(&self.book_key(symbol))
    }

    /// Number of live orders across all books.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of books created so far.
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Iterate live orders resting at `price` on `side` of `symbol`. Useful
    /// for audits that reconcile level aggregates against order records.
    pub fn orders_at(
        &self,
        side: Side,
        price: Px,
        symbol: &str,
    ) -> impl Iterator<Item = &Order> {
        self.orders
            .values()
            .filter(move |o| o.side == side && o.price == price && o.symbol == symbol)
    }
}
