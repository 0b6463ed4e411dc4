//! Shared market primitives
//!
//! Fixed-point price and quantity types used across the workspace. All
//! arithmetic and ordering happens on `i64` ticks so books stay deterministic
//! and hashable; floats only appear at the API boundary.

#![warn(missing_docs)]

pub mod types;

pub use types::{Px, Qty, SCALE};
