//! Fixed-point price and quantity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticks per unit: four decimal places of precision.
pub const SCALE: i64 = 10_000;

/// Price in ticks (1 tick = 0.0001 units).
///
/// Stored as `i64` so prices are `Ord` + `Hash` and comparisons are exact;
/// `f64` conversions exist only for the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Px(i64);

impl Px {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a float value, rounding to the nearest tick.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(to_ticks(value))
    }

    /// Create a price from raw ticks.
    #[must_use]
    pub const fn from_i64(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Price as raw ticks.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Price as `f64`, for display and external APIs only.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        {
            self.0 as f64 / SCALE as f64
        }
    }

    /// True for prices a book will accept (strictly positive).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.0 / SCALE, (self.0 % SCALE).abs())
    }
}

/// Quantity in ticks (1 tick = 0.0001 units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Qty(i64);

impl Qty {
    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Create a quantity from a float value, rounding to the nearest tick.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(to_ticks(value))
    }

    /// Create a quantity from raw ticks.
    #[must_use]
    pub const fn from_i64(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Quantity as raw ticks.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Quantity as `f64`, for display and external APIs only.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        {
            self.0 as f64 / SCALE as f64
        }
    }

    /// Saturating fixed-point sum.
    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating fixed-point difference. May go negative; callers that
    /// require positivity check `is_valid`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// True for quantities a book will accept (strictly positive).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.0 / SCALE, (self.0 % SCALE).abs())
    }
}

fn to_ticks(value: f64) -> i64 {
    let scaled = (value * SCALE as f64).round();
    if scaled >= i64::MAX as f64 {
        i64::MAX
    } else if scaled <= i64::MIN as f64 {
        i64::MIN
    } else {
        #[allow(clippy::cast_possible_truncation)]
        {
            scaled as i64
        }
    }
}
