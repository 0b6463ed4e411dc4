//! Sorted price-level sequence for one side of a book
//!
//! This is the algorithmic core: a single binary search with a side-specific
//! comparator locates every target, growth happens in place on a price hit,
//! and inserts/deletes shift the tail. Realistic depth is tens of levels, so
//! the O(n) shift stays cheap and no tree is warranted.

use common::{Px, Qty};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::errors::BookError;

/// Side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side; best = highest price.
    Bid,
    /// Sell side (offers); best = lowest price.
    Ask,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

/// Aggregate state at one price point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// The level's price, unique within its side.
    pub price: Px,
    /// Sum of live order quantities resting at this price.
    pub quantity: Qty,
    /// Number of live orders contributing to this level.
    pub count: u32,
}

/// One side's strictly sorted sequence of price levels.
///
/// Bids sort descending (index 0 = highest), asks ascending (index 0 =
/// lowest); no duplicate price ever exists and no level survives with
/// `count == 0`.
#[derive(Debug, Clone)]
pub struct Ladder {
    side: Side,
    levels: SmallVec<[PriceLevel; 16]>,
}

impl Ladder {
    /// Create an empty ladder for the given side.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: SmallVec::new(),
        }
    }

    /// Which side this ladder holds.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Locate `price` under this side's sort order. `Ok` carries the exact
    /// match index, `Err` the sort-preserving insertion point.
    fn locate(&self, price: Px) -> Result<usize, usize> {
        match self.side {
            Side::Bid => self.levels.binary_search_by(|l| price.cmp(&l.price)),
            Side::Ask => self.levels.binary_search_by(|l| l.price.cmp(&price)),
        }
    }

    /// Fold one order's terms into the ladder.
    ///
    /// Grows the level in place when `price` already rests, otherwise inserts
    /// a fresh `{price, qty, count: 1}` at the sorted position. Rejects
    /// non-positive price or quantity without mutating.
    pub fn add(&mut self, price: Px, quantity: Qty) -> Result<(), BookError> {
        if !price.is_valid() || !quantity.is_valid() {
            warn!(%price, %quantity, "rejecting add with non-positive terms");
            return Err(BookError::InvalidOrderTerms { price, quantity });
        }
        match self.locate(price) {
            Ok(idx) => {
                let level = &mut self.levels[idx];
                level.quantity = level.quantity.add(quantity);
                level.count += 1;
            }
            Err(idx) => {
                self.levels.insert(
                    idx,
                    PriceLevel {
                        price,
                        quantity,
                        count: 1,
                    },
                );
            }
        }
        Ok(())
    }

    /// Take one order's terms out of the ladder.
    ///
    /// When the level holds a single order the whole level is deleted and the
    /// passed quantity is ignored: the last order's quantity is by definition
    /// the level's remainder. Otherwise the level loses `quantity` and one
    /// count; it is never deleted on quantity alone, only when the last order
    /// leaves.
    pub fn remove(&mut self, price: Px, quantity: Qty) -> Result<(), BookError> {
        let Ok(idx) = self.locate(price) else {
            warn!(%price, "remove targeted a price with no resting level");
            return Err(BookError::LevelNotFound { price });
        };
        if self.levels[idx].count == 1 {
            self.levels.remove(idx);
        } else {
            let level = &mut self.levels[idx];
            level.quantity = level.quantity.sub(quantity);
            level.count -= 1;
        }
        Ok(())
    }

    /// Overwrite the resting quantity at `price`, leaving the count alone.
    ///
    /// The caller supplies the full new level quantity (existing level
    /// quantity minus the old order quantity plus the new one); see
    /// [`crate::OrderRegistry::replace_order`].
    pub fn replace(&mut self, price: Px, quantity: Qty) -> Result<(), BookError> {
        let Ok(idx) = self.locate(price) else {
            warn!(%price, "replace targeted a price with no resting level");
            return Err(BookError::LevelNotFound { price });
        };
        self.levels[idx].quantity = quantity;
        Ok(())
    }

    /// Resting quantity at `price`, `Qty::ZERO` when no level exists.
    #[must_use]
    pub fn quantity_at(&self, price: Px) -> Qty {
        match self.locate(price) {
            Ok(idx) => self.levels[idx].quantity,
            Err(_) => Qty::ZERO,
        }
    }

    /// Number of levels currently resting.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// True when no level rests on this side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at `index`, where index 0 is the best price for this side.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<PriceLevel> {
        self.levels.get(index).copied()
    }

    /// Best level (highest bid / lowest offer).
    #[must_use]
    pub fn best(&self) -> Option<PriceLevel> {
        self.levels.first().copied()
    }

    /// Iterate levels best-first.
    pub fn iter(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.iter()
    }

    /// Drop the worst-priced level (lowest bid / highest offer), if any.
    /// Used by the opt-in depth bound.
    pub(crate) fn evict_worst(&mut self) -> Option<PriceLevel> {
        self.levels.pop()
    }
}
