//! # Redep
//!
//! Memoized reducers that can depend on each other.
//!
//! A reducer is a pure function `(state, action) -> state`. Redep adds two
//! things on top of plain reducer composition:
//!
//! ## Memoization
//!
//! Every reducer built here keeps its last `(state, action)` pair and result:
//! - Repeating the same input returns the same [`State`] handle
//! - The same reducer bound under several names computes once per input
//! - Equality is pluggable through [`Equality`] and [`StateEquality`]
//!
//! ## Dependencies
//!
//! A reducer created with [`create_reducer_with`] names other reducers and
//! reads their states *after* they handled the same action:
//! - Dependency states are unwrapped before the reducer sees them
//! - The result is stored in an [`Envelope`] next to the dependency snapshot
//!
//! ```
//! use redep::{combine_reducers, create_reducer, create_reducer_with, State};
//!
//! #[derive(Clone, PartialEq)]
//! enum Action { Increment }
//!
//! let count = create_reducer(|state: Option<&State>, _: &Action| {
//!     Ok(State::from(state.and_then(State::as_i64).unwrap_or(0) + 1))
//! });
//! let next = create_reducer_with([("count", count.clone())], |_, _: &Action, deps| {
//!     Ok(State::from(deps["count"].as_i64().unwrap_or(0) + 1))
//! })?;
//! let root = combine_reducers([("count", count), ("next", next)])?;
//!
//! let state = root.reduce(None, &Action::Increment)?;
//! assert_eq!(state.get("count").and_then(State::as_i64), Some(1));
//! assert_eq!(state.get("next").map(State::unwrapped).and_then(State::as_i64), Some(2));
//! # Ok::<(), redep::Error>(())
//! ```

pub mod error;
pub mod memo;
pub mod reducer;
pub mod state;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use memo::{
    memoize, memoize_with, ByValue, Equality, Identity, MemoSlot, Memoized, Pairwise,
    StateEquality,
};
pub use reducer::{
    combine_reducers, create_reducer, create_reducer_with, map_values, try_map_values, Action,
    Reducer, ReducerBuilder,
};
pub use state::{envelope, Envelope, Slices, State, StateNode};
