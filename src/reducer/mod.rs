//! Reducer construction and composition.
//!
//! This module provides the building blocks for reducer trees:
//! - `create_reducer` / `create_reducer_with`: memoized reducers, optionally
//!   reading the updated states of other reducers
//! - `combine_reducers`: one reducer per named slice
//! - `map_values`: key-preserving mapping helper

mod combine;
mod map;
mod reducer;

pub use combine::combine_reducers;
pub use map::{map_values, try_map_values};
pub use reducer::{create_reducer, create_reducer_with, Action, Reducer, ReducerBuilder};
