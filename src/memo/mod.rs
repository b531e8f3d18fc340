//! Single-slot memoization.
//!
//! This module provides the caching used by every reducer:
//! - `MemoSlot`: last arguments and last result, nothing more
//! - `Memoized`: a function paired with its slot
//! - `Equality`: pluggable argument comparison

mod equality;
mod memo;

pub use equality::{ByValue, Equality, Identity, Pairwise, StateEquality};
pub use memo::{memoize, memoize_with, MemoSlot, Memoized};
