//! Aggregated price-level books with order-lifecycle routing
//!
//! Each instrument gets a book of two independently sorted ladders: bids
//! descending by price, offers ascending, every level carrying the total
//! resting quantity and the count of contributing orders. On top sits the
//! [`OrderRegistry`], which maps live order ids to their terms and routes
//! add/remove/replace to the owning book so per-order state and per-level
//! aggregates never diverge.
//!
//! This is a pure aggregator, not a matcher: sides are independent, a crossed
//! book is representable, and no trade ever executes here. The API is
//! single-threaded and synchronous; callers that need concurrent readers
//! should publish [`BookSnapshot`]s from the writing thread.

#![warn(missing_docs)]

pub mod book;
pub mod errors;
pub mod ladder;
pub mod registry;

pub use crate::book::{BookConfig, BookSnapshot, PriceLevelBook};
pub use crate::errors::BookError;
pub use crate::ladder::{Ladder, PriceLevel, Side};
pub use crate::registry::{Order, OrderRegistry};
