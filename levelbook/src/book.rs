//! Per-instrument book: two independent ladders plus derived queries

use common::{Px, Qty};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::BookError;
use crate::ladder::{Ladder, PriceLevel, Side};

/// Book construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookConfig {
    /// Optional bound on levels per side. When set, every insert that grows a
    /// side past the bound evicts the worst-priced level (lowest bid /
    /// highest offer). Default: unbounded.
    pub max_depth: Option<usize>,
}

/// Read-only copy of a book's top levels, safe to hand to other threads or
/// serialize onto a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Instrument this snapshot was taken from.
    pub instrument: String,
    /// Bid levels, best (highest) first.
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best (lowest) first.
    pub asks: Vec<PriceLevel>,
}

/// Aggregated price-level book for one instrument.
///
/// The two sides are independent: nothing enforces an uncrossed market, this
/// is an aggregator fed by someone else's order flow, not a matcher. All
/// mutation goes through `&mut self`; queries return copies or call-scoped
/// borrows, never retained handles onto live state.
#[derive(Debug, Clone)]
pub struct PriceLevelBook {
    instrument: String,
    bids: Ladder,
    asks: Ladder,
    config: BookConfig,
}

impl PriceLevelBook {
    /// Create an empty, unbounded book.
    #[must_use]
    pub fn new(instrument: impl Into<String>) -> Self {
        Self::with_config(instrument, BookConfig::default())
    }

    /// Create an empty book with explicit options.
    #[must_use]
    pub fn with_config(instrument: impl Into<String>, config: BookConfig) -> Self {
        let instrument = instrument.into();
        debug!(%instrument, ?config.max_depth, "creating book");
        Self {
            instrument,
            bids: Ladder::new(Side::Bid),
            asks: Ladder::new(Side::Ask),
            config,
        }
    }

    /// Instrument this book aggregates.
    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Fold an order's terms into one side. See [`Ladder::add`].
    pub fn add(&mut self, side: Side, price: Px, quantity: Qty) -> Result<(), BookError> {
        let max_depth = self.config.max_depth;
        let ladder = self.ladder_mut(side);
        ladder.add(price, quantity)?;
        if let Some(max) = max_depth {
            while ladder.depth() > max {
                if let Some(evicted) = ladder.evict_worst() {
                    debug!(price = %evicted.price, "depth bound evicting worst level");
                }
            }
        }
        Ok(())
    }

    /// Take an order's terms out of one side. See [`Ladder::remove`].
    pub fn remove(&mut self, side: Side, price: Px, quantity: Qty) -> Result<(), BookError> {
        self.ladder_mut(side).remove(price, quantity)
    }

    /// Overwrite the level quantity at `price` on one side. See
    /// [`Ladder::replace`].
    pub fn replace(&mut self, side: Side, price: Px, quantity: Qty) -> Result<(), BookError> {
        self.ladder_mut(side).replace(price, quantity)
    }

    /// Resting quantity at `price`, `Qty::ZERO` when no level exists.
    #[must_use]
    pub fn level_quantity(&self, side: Side, price: Px) -> Qty {
        self.ladder(side).quantity_at(price)
    }

    /// Number of levels on one side.
    #[must_use]
    pub fn depth(&self, side: Side) -> usize {
        self.ladder(side).depth()
    }

    /// Level at `index` on one side, index 0 = best price.
    pub fn level_at(&self, side: Side, index: usize) -> Result<PriceLevel, BookError> {
        let ladder = self.ladder(side);
        ladder.get(index).ok_or(BookError::LevelIndexOutOfRange {
            index,
            depth: ladder.depth(),
        })
    }

    /// Best level on one side.
    #[must_use]
    pub fn best(&self, side: Side) -> Option<PriceLevel> {
        self.ladder(side).best()
    }

    /// Best bid and ask prices.
    #[must_use]
    pub fn bbo(&self) -> (Option<Px>, Option<Px>) {
        (
            self.bids.best().map(|l| l.price),
            self.asks.best().map(|l| l.price),
        )
    }

    /// Spread in ticks, when both sides are populated.
    #[must_use]
    pub fn spread(&self) -> Option<i64> {
        match self.bbo() {
            (Some(bid), Some(ask)) => Some(ask.as_i64() - bid.as_i64()),
            _ => None,
        }
    }

    /// True when the best bid meets or exceeds the best ask. Contradictory
    /// input produces a crossed book; this reports it, nothing resolves it.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        match self.bbo() {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Copies of the top `n` levels on one side, best first.
    #[must_use]
    pub fn levels(&self, side: Side, n: usize) -> Vec<PriceLevel> {
        self.ladder(side).iter().take(n).copied().collect()
    }

    /// Owned copy of the top `n` levels of both sides.
    #[must_use]
    pub fn snapshot(&self, n: usize) -> BookSnapshot {
        BookSnapshot {
            instrument: self.instrument.clone(),
            bids: self.levels(Side::Bid, n),
            asks: self.levels(Side::Ask, n),
        }
    }
}
